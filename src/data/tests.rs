#[cfg(test)]
mod data_unit_tests {
    use crate::data::*;
    use crate::error::DataValidationError;

    fn validate(input: BlendInput) -> Result<BlendData, DataValidationError> {
        BlendData::validate(input)
    }

    #[test]
    fn test_canonical_dataset_validates() {
        let data = validate(canonical_input()).expect("canonical data should validate");

        assert_eq!(data.horizon(), 6);
        assert_eq!(data.materials().len(), 5);
        assert_eq!(data.groups().len(), 2);
        assert_eq!(data.sale_price(), 150.0);

        let veg1 = data.index_of(&"VEG1".into()).expect("VEG1");
        let oil3 = data.index_of(&"OIL3".into()).expect("OIL3");
        assert_eq!(data.material(veg1).quality, 8.8);
        assert_eq!(data.terms(veg1, 6).cost, 90.0);
        assert_eq!(data.terms(oil3, 3).cost, 95.0);
        assert_eq!(data.terms(oil3, 3).storage_cost, 5.0);
        assert!(data.implications().contains(&(veg1, oil3)));

        let veg_groups: Vec<_> = data.groups_of(veg1).map(|g| g.name.clone()).collect();
        assert_eq!(veg_groups, vec![Symbol::from("VEG")]);
    }

    #[test]
    fn test_relaxed_drops_logic_only() {
        let input = canonical_input();
        assert!(input.spec.has_logic());

        let relaxed = input.clone().relaxed();
        assert!(!relaxed.spec.has_logic());
        assert_eq!(relaxed.spec.quality_lower, input.spec.quality_lower);
        assert_eq!(relaxed.spec.quality_upper, input.spec.quality_upper);
        assert_eq!(relaxed.materials, input.materials);
    }

    #[test]
    fn test_empty_horizon() {
        let mut input = canonical_input();
        input.periods.clear();
        input.records.clear();
        assert_eq!(validate(input).unwrap_err(), DataValidationError::EmptyHorizon);
    }

    #[test]
    fn test_gapped_horizon() {
        let mut input = canonical_input();
        input.periods = vec![1, 2, 4];
        assert_eq!(
            validate(input).unwrap_err(),
            DataValidationError::NonContiguousPeriods {
                position: 2,
                found: 4
            }
        );
    }

    #[test]
    fn test_missing_quality() {
        let mut input = canonical_input();
        input.materials[1].quality = None;
        assert_eq!(
            validate(input).unwrap_err(),
            DataValidationError::MissingQuality("VEG2".into())
        );
    }

    #[test]
    fn test_duplicate_material() {
        let mut input = canonical_input();
        let copy = input.materials[0].clone();
        input.materials.push(copy);
        assert_eq!(
            validate(input).unwrap_err(),
            DataValidationError::DuplicateMaterial("VEG1".into())
        );
    }

    #[test]
    fn test_missing_record() {
        let mut input = canonical_input();
        input
            .records
            .retain(|r| !(r.material == Symbol::from("OIL2") && r.period == 4));
        assert_eq!(
            validate(input).unwrap_err(),
            DataValidationError::MissingRecord {
                material: "OIL2".into(),
                period: 4
            }
        );
    }

    #[test]
    fn test_missing_cost() {
        let mut input = canonical_input();
        input.records[0].cost = None;
        assert_eq!(
            validate(input).unwrap_err(),
            DataValidationError::MissingCost {
                material: "VEG1".into(),
                period: 1
            }
        );
    }

    #[test]
    fn test_duplicate_record() {
        let mut input = canonical_input();
        let copy = input.records[3].clone();
        input.records.push(copy);
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::DuplicateRecord { period: 4, .. }
        ));
    }

    #[test]
    fn test_record_outside_horizon() {
        let mut input = canonical_input();
        input.records[0].period = 7;
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::UnknownPeriod { period: 7, .. }
        ));
    }

    #[test]
    fn test_unknown_material_references() {
        let mut input = canonical_input();
        input.records[0].material = "OIL9".into();
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::UnknownMaterial { .. }
        ));

        let mut input = canonical_input();
        input.capacity_groups[0].members.push("VEG3".into());
        match validate(input).unwrap_err() {
            DataValidationError::UnknownMaterial { context, material } => {
                assert_eq!(material, Symbol::from("VEG3"));
                assert!(context.contains("VEG"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let mut input = canonical_input();
        input.spec.implications[1].then_used = "OIL4".into();
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::UnknownMaterial { .. }
        ));
    }

    #[test]
    fn test_negative_and_non_finite_numbers() {
        let mut input = canonical_input();
        input.records[5].cost = Some(-1.0);
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::InvalidNumber { field: "cost", .. }
        ));

        let mut input = canonical_input();
        input.materials[2].storage_capacity = Some(f64::NAN);
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::InvalidNumber {
                field: "storage_capacity",
                ..
            }
        ));

        let mut input = canonical_input();
        input.capacity_groups[1].limit = f64::INFINITY;
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::InvalidNumber { field: "limit", .. }
        ));

        let mut input = canonical_input();
        input.materials[3].quality = Some(-4.2);
        match validate(input).unwrap_err() {
            DataValidationError::InvalidNumber {
                field: "quality",
                owner,
                value,
            } => {
                assert_eq!(owner, "OIL2");
                assert_eq!(value, -4.2);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let mut input = canonical_input();
        input.sale_price = -150.0;
        assert!(matches!(
            validate(input).unwrap_err(),
            DataValidationError::InvalidNumber {
                field: "sale_price",
                ..
            }
        ));
    }

    #[test]
    fn test_inverted_quality_band() {
        let mut input = canonical_input();
        input.spec.quality_lower = 7.0;
        input.spec.quality_upper = 6.0;
        assert_eq!(
            validate(input).unwrap_err(),
            DataValidationError::InvertedQualityBand {
                lower: 7.0,
                upper: 6.0
            }
        );
    }

    #[test]
    fn test_degenerate_band_is_allowed() {
        let mut input = canonical_input();
        input.spec.quality_lower = 5.0;
        input.spec.quality_upper = 5.0;
        assert!(validate(input).is_ok());
    }

    #[test]
    fn test_json_round_trip_preserves_dataset() {
        let input = canonical_input();
        let mut buffer = Vec::new();
        write_input(&input, &mut buffer).expect("serialise");

        let json = String::from_utf8(buffer).expect("utf-8");
        assert!(json.contains("\"VEG1\""));
        assert!(json.contains("\"max_distinct\": 3"));

        let parsed: BlendInput = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, input);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "periods": [1],
            "materials": [{"id": "A", "quality": 4.0}],
            "records": [{"material": "A", "period": 1, "cost": 10.0}],
            "spec": {"quality_lower": 3.0, "quality_upper": 6.0},
            "sale_price": 20.0
        }"#;
        let input: BlendInput = serde_json::from_str(json).expect("parse");
        assert!(!input.spec.has_logic());
        assert!(input.capacity_groups.is_empty());

        let data = validate(input).expect("validate");
        assert_eq!(data.material(0).initial_stock, 0.0);
        assert_eq!(data.material(0).final_stock, None);
        assert_eq!(data.terms(0, 1).storage_cost, 0.0);
        assert_eq!(data.terms(0, 1).buy_capacity, None);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("oils.json");
        let mut file = std::fs::File::create(&path).expect("create");
        write_input(&canonical_input(), &mut file).expect("write");
        drop(file);

        let input = read_input(&path).expect("read");
        assert_eq!(input, canonical_input());

        let missing = read_input(&dir.path().join("absent.json"));
        assert!(missing.is_err());
    }
}
