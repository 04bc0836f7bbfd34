//! Arithmetic on variables and linear expressions
//!
//! The compound-assignment operators on [`LinearExpression`] do the work; the
//! binary operators are generated from them for every combination of
//! expression, variable and scalar operands, so `2.0 * x + y - 3.0`,
//! `(x - y) * 0.5` and `-x` all produce a `LinearExpression` of the same brand.
//! Summing an iterator of variables or expressions works too:
//!
//! ```rust
//! use blendopt::lp_model_builder;
//! use blendopt::lp_solver::{LinearExpression, VariableType};
//!
//! let mut builder = lp_model_builder!();
//! let xs: Vec<_> = (0..3)
//!     .map(|i| builder.add_variable(format!("x{i}"), VariableType::Continuous, 0.0, 1.0))
//!     .collect();
//! let total: LinearExpression<_> = xs.iter().copied().sum();
//! assert_eq!(total.terms.len(), 3);
//! ```
//!
//! Terms are not merged; a variable appearing twice yields two terms, which
//! every backend accumulates.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::{LinearExpression, VariableId};

impl<Brand> AddAssign<LinearExpression<Brand>> for LinearExpression<Brand> {
    fn add_assign(&mut self, rhs: LinearExpression<Brand>) {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
    }
}

impl<Brand> AddAssign<VariableId<Brand>> for LinearExpression<Brand> {
    fn add_assign(&mut self, rhs: VariableId<Brand>) {
        self.add_term(1.0, rhs);
    }
}

impl<Brand> AddAssign<f64> for LinearExpression<Brand> {
    fn add_assign(&mut self, rhs: f64) {
        self.constant += rhs;
    }
}

impl<Brand> SubAssign<LinearExpression<Brand>> for LinearExpression<Brand> {
    fn sub_assign(&mut self, rhs: LinearExpression<Brand>) {
        *self += -rhs;
    }
}

impl<Brand> SubAssign<VariableId<Brand>> for LinearExpression<Brand> {
    fn sub_assign(&mut self, rhs: VariableId<Brand>) {
        self.add_term(-1.0, rhs);
    }
}

impl<Brand> SubAssign<f64> for LinearExpression<Brand> {
    fn sub_assign(&mut self, rhs: f64) {
        self.constant -= rhs;
    }
}

impl<Brand> Mul<f64> for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(mut self, rhs: f64) -> Self::Output {
        for term in &mut self.terms {
            term.coefficient *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl<Brand> Mul<f64> for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(self, rhs: f64) -> Self::Output {
        let mut expr = LinearExpression::new(0.0);
        expr.add_term(rhs, self);
        expr
    }
}

impl<Brand> Neg for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl<Brand> Neg for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

/// `Add` and `Sub` for `$lhs<Brand> op $rhs`, in terms of the assign operators.
macro_rules! derived_binary_ops {
    (@impl $lhs:ident, $rhs:ty) => {
        impl<Brand> Add<$rhs> for $lhs<Brand> {
            type Output = LinearExpression<Brand>;

            fn add(self, rhs: $rhs) -> Self::Output {
                let mut out = LinearExpression::from(self);
                out += rhs;
                out
            }
        }

        impl<Brand> Sub<$rhs> for $lhs<Brand> {
            type Output = LinearExpression<Brand>;

            fn sub(self, rhs: $rhs) -> Self::Output {
                let mut out = LinearExpression::from(self);
                out -= rhs;
                out
            }
        }
    };
    ($lhs:ident, scalar) => {
        derived_binary_ops!(@impl $lhs, f64);
    };
    ($lhs:ident, $rhs:ident) => {
        derived_binary_ops!(@impl $lhs, $rhs<Brand>);
    };
}

derived_binary_ops!(LinearExpression, LinearExpression);
derived_binary_ops!(LinearExpression, VariableId);
derived_binary_ops!(LinearExpression, scalar);
derived_binary_ops!(VariableId, LinearExpression);
derived_binary_ops!(VariableId, VariableId);
derived_binary_ops!(VariableId, scalar);

impl<Brand> Mul<LinearExpression<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, rhs: LinearExpression<Brand>) -> Self::Output {
        rhs * self
    }
}

impl<Brand> Mul<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, rhs: VariableId<Brand>) -> Self::Output {
        rhs * self
    }
}

impl<Brand> Add<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn add(self, rhs: VariableId<Brand>) -> Self::Output {
        rhs + self
    }
}

impl<Brand> Sub<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn sub(self, rhs: VariableId<Brand>) -> Self::Output {
        -rhs + self
    }
}

impl<Brand> Sum<LinearExpression<Brand>> for LinearExpression<Brand> {
    fn sum<I: Iterator<Item = LinearExpression<Brand>>>(iter: I) -> Self {
        iter.fold(LinearExpression::new(0.0), |mut acc, expr| {
            acc += expr;
            acc
        })
    }
}

impl<Brand> Sum<VariableId<Brand>> for LinearExpression<Brand> {
    fn sum<I: Iterator<Item = VariableId<Brand>>>(iter: I) -> Self {
        iter.fold(LinearExpression::new(0.0), |mut acc, var| {
            acc += var;
            acc
        })
    }
}
