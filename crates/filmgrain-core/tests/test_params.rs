use filmgrain_core::params::{BooleanField, GrainParameters, GrainType, NumericField, ParameterStore};

// ---------------------------------------------------------------------------
// Numeric parsing
// ---------------------------------------------------------------------------

#[test]
fn test_valid_numeric_strings_are_stored() {
    let cases = [
        (NumericField::GrainPower, "2.3", 2.3),
        (NumericField::Scale, "0.1", 0.1),
        (NumericField::Shadows, " 0.5 ", 0.5),
        (NumericField::Highs, "1e-1", 0.1),
        (NumericField::GrainSat, "-0", 0.0),
        (NumericField::Sharpen, "3", 3.0),
    ];
    for (field, raw, expected) in cases {
        let mut store = ParameterStore::default();
        assert!(store.set_numeric(field, raw), "{field} <- {raw:?}");
        assert_eq!(store.get().numeric(field), expected, "{field} <- {raw:?}");
    }
}

#[test]
fn test_non_numeric_strings_leave_field_unchanged() {
    for raw in ["", "abc", "1.2.3", "NaN", "nan", "inf", "-infinity", "0x10"] {
        let mut store = ParameterStore::default();
        assert!(!store.set_numeric(NumericField::GrainPower, raw), "{raw:?}");
        assert_eq!(store.snapshot(), GrainParameters::default(), "{raw:?}");
    }
}

#[test]
fn test_update_touches_only_one_field() {
    let mut store = ParameterStore::default();
    assert!(store.set_numeric(NumericField::Highs, "0.9"));

    let expected = GrainParameters {
        highs: 0.9,
        ..GrainParameters::default()
    };
    assert_eq!(store.snapshot(), expected);
}

#[test]
fn test_out_of_range_values_pass_through() {
    let mut store = ParameterStore::default();
    assert!(store.set_numeric(NumericField::GrainSat, "7.5"));
    assert!(store.set_numeric(NumericField::Scale, "-2"));
    assert_eq!(store.get().grain_sat, 7.5);
    assert_eq!(store.get().scale, -2.0);
}

#[test]
fn test_set_value_rejects_non_finite() {
    let mut store = ParameterStore::default();
    assert!(!store.set_value(NumericField::Scale, f64::NAN));
    assert!(!store.set_value(NumericField::Scale, f64::INFINITY));
    assert_eq!(store.get().scale, 1.0);
}

// ---------------------------------------------------------------------------
// Integer fields
// ---------------------------------------------------------------------------

#[test]
fn test_grain_type_accepts_known_variants() {
    let mut store = ParameterStore::default();
    assert!(store.set_numeric(NumericField::GrainType, "3"));
    assert_eq!(store.get().grain_type, GrainType::Coarse);
    assert!(store.set_numeric(NumericField::GrainType, "4.0"));
    assert_eq!(store.get().grain_type, GrainType::Coarser);
}

#[test]
fn test_grain_type_rejects_unknown_or_fractional() {
    let mut store = ParameterStore::default();
    for raw in ["0", "5", "2.5", "-1"] {
        assert!(!store.set_numeric(NumericField::GrainType, raw), "{raw:?}");
    }
    assert_eq!(store.get().grain_type, GrainType::Fine);
}

#[test]
fn test_src_type_membership() {
    let mut store = ParameterStore::default();
    assert!(store.set_numeric(NumericField::SrcType, "2"));
    assert_eq!(store.get().src_type, 2);
    assert!(!store.set_numeric(NumericField::SrcType, "9"));
    assert_eq!(store.get().src_type, 2);
}

// ---------------------------------------------------------------------------
// Booleans and reset
// ---------------------------------------------------------------------------

#[test]
fn test_set_boolean_always_applies() {
    let mut store = ParameterStore::default();
    store.set_boolean(BooleanField::Gray, true);
    assert!(store.get().gray);
    store.set_boolean(BooleanField::Gray, false);
    assert!(!store.get().boolean(BooleanField::Gray));
}

#[test]
fn test_reset_restores_defaults() {
    let mut store = ParameterStore::default();
    store.set_numeric(NumericField::GrainPower, "4");
    store.set_boolean(BooleanField::Gray, true);
    store.reset();
    assert_eq!(store.snapshot(), GrainParameters::default());
}

#[test]
fn test_form_fields_follow_store() {
    let mut store = ParameterStore::default();
    store.set_numeric(NumericField::GrainPower, "2.3");
    store.set_boolean(BooleanField::Gray, true);
    let fields = store.get().form_fields();
    assert!(fields.contains(&("grain_power", "2.3".to_string())));
    assert!(fields.contains(&("gray", "true".to_string())));
}
