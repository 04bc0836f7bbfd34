//! Macros for building models and rows
//!
//! [`lp_model_builder!`](crate::lp_model_builder) creates a builder with a
//! fresh brand, and [`constraint!`](crate::constraint) spells rows with the
//! comparison operators.

/// Create a new LP model builder with a unique brand
///
/// Every invocation defines its own brand type, so variables cannot migrate
/// between the builders it returns.
///
/// ```rust
/// use blendopt::lp_model_builder;
/// use blendopt::lp_solver::VariableType;
///
/// let mut purchasing = lp_model_builder!(Purchasing);
/// let mut refining = lp_model_builder!();
///
/// let buy = purchasing.add_variable("buy", VariableType::Continuous, 0.0, 100.0);
/// let refine = refining.add_variable("refine", VariableType::Continuous, 0.0, 24.0);
///
/// // refining.add_constraint(constraint!((buy) <= 50.0)); // does not compile
/// # let _ = (buy, refine);
/// ```
#[macro_export]
macro_rules! lp_model_builder {
    ($brand_name:ident) => {{
        struct $brand_name;
        $crate::lp_solver::LPModelBuilder::<$brand_name>::new()
    }};

    // A block-local type is distinct on every expansion.
    () => {{
        struct UniqueBrand;
        $crate::lp_solver::LPModelBuilder::<UniqueBrand>::new()
    }};
}

/// Create a [`Constraint`](crate::lp_solver::Constraint) from comparison syntax
///
/// The left-hand side goes in parentheses. An optional leading name tags the
/// row; anything convertible into `Arc<str>` is accepted.
///
/// ```rust
/// use blendopt::constraint;
/// use blendopt::lp_model_builder;
/// use blendopt::lp_solver::{ConstraintSense, VariableType};
///
/// let mut builder = lp_model_builder!(Stock);
/// let opening = builder.add_variable("opening", VariableType::Continuous, 0.0, 1000.0);
/// let closing = builder.add_variable("closing", VariableType::Continuous, 0.0, 1000.0);
///
/// let carry = constraint!("carry", (closing - opening) == 0.0);
/// assert_eq!(carry.name(), "carry");
/// assert_eq!(carry.sense(), ConstraintSense::Equal);
///
/// builder.add_constraint(carry);
/// builder.add_constraint(constraint!((opening) <= 500));
/// ```
#[macro_export]
macro_rules! constraint {
    (($lhs:expr) == $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::Equal,
            $rhs as f64,
        )
    };
    (($lhs:expr) <= $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::LessEqual,
            $rhs as f64,
        )
    };
    (($lhs:expr) >= $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $lhs,
            $crate::lp_solver::ConstraintSense::GreaterEqual,
            $rhs as f64,
        )
    };
    ($name:expr, ($lhs:expr) $op:tt $rhs:expr) => {
        $crate::constraint!(($lhs) $op $rhs).named($name)
    };
}

#[cfg(test)]
mod tests {
    use crate::lp_solver::{ConstraintSense, VariableType};

    #[test]
    fn test_named_brand_lp_model_builder() {
        let mut model1 = lp_model_builder!(TestModel1);
        let mut model2 = lp_model_builder!(TestModel2);

        let x1 = model1.add_variable("x1", VariableType::Continuous, 0.0, 10.0);
        let x2 = model2.add_variable("x2", VariableType::Continuous, 0.0, 10.0);

        let _expr1 = x1 + 5.0;
        let _expr2 = x2 + 5.0;
        assert_eq!(model1.num_variables(), 1);
        assert_eq!(model2.num_variables(), 1);
    }

    #[test]
    fn test_named_constraints_keep_sense_and_rhs() {
        let mut model = lp_model_builder!(ConstraintTestModel);
        let x = model.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = model.add_variable("y", VariableType::Continuous, 0.0, 10.0);

        let family = "balance";
        let c1 = constraint!(format!("{family}[1]"), (x + y) == 10);
        let c2 = constraint!("cap", (x * 2.0) <= 20.0);
        let c3 = constraint!("floor", (y) >= 1.5);

        assert_eq!(c1.name(), "balance[1]");
        assert_eq!(c1.rhs(), 10.0);
        assert_eq!(c2.sense(), ConstraintSense::LessEqual);
        assert_eq!(c3.sense(), ConstraintSense::GreaterEqual);

        model.add_constraint(c1);
        model.add_constraint(c2);
        model.add_constraint(c3);
        assert_eq!(model.num_constraints(), 3);
        assert!(model.constraints().any(|c| c.name() == "cap"));
    }
}
