//! Value algebra tests: rendering, arithmetic, conversion, and parsing.
//!
//! The algebra carries a few deliberate quirks (min-only splicing, the
//! divide-negates quirk, ms rescaling); the tests here pin them down so a
//! well-meaning refactor cannot silently "fix" them.

use proptest::prelude::*;

use stylum::value::{Unit, cm, em, mm, ms, number, percent, px, s};
use stylum::{Error, NumericValue};

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_zero_renders_as_bare_zero_for_every_unit() {
    for unit in [Unit::Px, Unit::Percent, Unit::Number, Unit::Fr, Unit::Ms] {
        assert_eq!(NumericValue::unit(0.0, unit).to_string(), "0");
    }
}

#[test]
fn test_nonzero_renders_value_and_suffix() {
    assert_eq!(px(12.5).to_string(), "12.5px");
    assert_eq!(percent(33.0).to_string(), "33%");
    assert_eq!(number(7.0).to_string(), "7");
    assert_eq!(stylum::value::fr(3.0).to_string(), "3");
    assert_eq!(stylum::value::deg(-45.0).to_string(), "-45deg");
}

#[test]
fn test_sum_text_follows_join_rules() {
    let a = px(10.0);
    let b = em(2.0);
    let sum = NumericValue::sum(vec![a.clone(), b.clone()]).unwrap();
    assert_eq!(
        sum.css_text(),
        format!("{} + {}", a.to_css(true), b.to_css(true))
    );

    let negated = NumericValue::sum(vec![a.clone(), NumericValue::negate(b.clone())]).unwrap();
    assert_eq!(
        negated.css_text(),
        format!("{} - {}", a.to_css(true), b.to_css(true))
    );
}

#[test]
fn test_non_nested_math_wraps_in_calc() {
    let sum = NumericValue::sum(vec![px(1.0), em(1.0)]).unwrap();
    assert_eq!(sum.to_string(), "calc( 1px + 1em )");
    assert_eq!(sum.to_css(true), "1px + 1em");
}

#[test]
fn test_min_max_render_function_syntax() {
    let min = NumericValue::min_of(vec![px(1.0), percent(50.0)]).unwrap();
    assert_eq!(min.css_text(), "min( 1px, 50% )");
    let max = NumericValue::max_of(vec![px(1.0), percent(50.0)]).unwrap();
    assert_eq!(max.css_text(), "max( 1px, 50% )");
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_unitless_round_trip() {
    let a = number(42.0);
    let b = number(17.0);
    let round_tripped = a.add([b.clone()]).sub([b]);
    assert_eq!(round_tripped.as_unit_value().unwrap().value, 42.0);
}

#[test]
fn test_unit_receiver_folds_plain_numbers() {
    assert_eq!(px(10.0).add([1.0, 2.0]).to_string(), "13px");
    assert_eq!(px(10.0).sub([4.0]).to_string(), "6px");
    assert_eq!(s(2.0).mul([3.0]).to_string(), "6s");
    assert_eq!(percent(100.0).div([2.0]).to_string(), "50%");
}

#[test]
fn test_mixed_units_never_coerce() {
    let result = px(10.0).add([em(1.0)]);
    assert!(matches!(result, NumericValue::Sum { .. }));
    let result = px(10.0).mul([percent(50.0)]);
    assert!(matches!(result, NumericValue::Product { .. }));
}

#[test]
fn test_min_splices_into_add_and_mul_but_max_does_not() {
    let min = NumericValue::min_of(vec![px(1.0), px(2.0)]).unwrap();
    let max = NumericValue::max_of(vec![px(1.0), px(2.0)]).unwrap();

    let with_min = number(0.0).add([min.clone(), em(1.0)]);
    assert_eq!(with_min.css_text(), "1px + 2px + 1em");

    let with_max = number(0.0).add([max.clone(), em(1.0)]);
    assert_eq!(with_max.css_text(), "max( 1px, 2px ) + 1em");

    // Even max() itself only splices min() operands.
    let nested = px(3.0).max([max]);
    assert_eq!(nested.css_text(), "max( max( 1px, 2px ) )");
    let flattened = px(3.0).min([min]);
    assert_eq!(flattened.css_text(), "min( 1px, 2px )");
}

#[test]
fn test_div_negates_unit_operands_instead_of_inverting() {
    let quotient = px(10.0).div([em(2.0)]);
    assert_eq!(quotient.css_text(), "-2em");

    // Non-unit operands do get a proper inversion.
    let sum = NumericValue::sum(vec![px(1.0), em(1.0)]).unwrap();
    let quotient = px(10.0).div([sum]);
    assert_eq!(quotient.css_text(), "1 / 1px + 1em");
    assert!(matches!(quotient, NumericValue::Product { .. }));
}

#[test]
fn test_empty_operand_lists_return_the_receiver() {
    let a = px(5.0);
    assert_eq!(a.add(Vec::<NumericValue>::new()), a);
    assert_eq!(a.sub(Vec::<NumericValue>::new()), a);
    assert_eq!(a.mul(Vec::<NumericValue>::new()), a);
    assert_eq!(a.div(Vec::<NumericValue>::new()), a);
    assert_eq!(a.max(Vec::<NumericValue>::new()), a);
}

#[test]
fn test_zero_operand_math_nodes_are_construction_errors() {
    assert!(matches!(NumericValue::sum(vec![]), Err(Error::Construction(_))));
    assert!(matches!(NumericValue::product(vec![]), Err(Error::Construction(_))));
    assert!(matches!(NumericValue::min_of(vec![]), Err(Error::Construction(_))));
    assert!(matches!(NumericValue::max_of(vec![]), Err(Error::Construction(_))));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_defined_conversions() {
    let v = cm(1.0).to(Unit::Mm).unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 10.0);
    assert_eq!(v.as_unit_value().unwrap().unit, Unit::Mm);

    let v = cm(2.54).to(Unit::In).unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 1.0);

    let v = s(1.5).to(Unit::Ms).unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 1500.0);
}

#[test]
fn test_number_projects_into_any_unit() {
    for unit in [Unit::Px, Unit::Deg, Unit::Khz, Unit::Fr] {
        let v = number(4.0).to(unit).unwrap();
        assert_eq!(v.as_unit_value().unwrap().unit, unit);
        assert_eq!(v.as_unit_value().unwrap().value, 4.0);
    }
}

#[test]
fn test_unsupported_conversions_fail_loudly() {
    assert_eq!(
        px(1.0).to(Unit::Cm),
        Err(Error::UnsupportedConversion {
            from: Unit::Px,
            to: Unit::Cm
        })
    );
    assert!(em(1.0).to(Unit::Px).is_err());
    assert!(percent(50.0).to(Unit::Number).is_err());
    assert!(ms(1.0).to(Unit::S).is_err());
}

#[test]
fn test_ms_to_ms_rescales() {
    let v = ms(3000.0).to(Unit::Ms).unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 3.0);
}

#[test]
fn test_mm_to_in_uses_its_own_constant() {
    let v = mm(0.254).to(Unit::In).unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 1.0);
    let v = mm(10.0).to(Unit::Cm).unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 1.0);
}

#[test]
fn test_structural_cast_through_wrappers() {
    let negated = NumericValue::negate(number(2.0));
    assert_eq!(negated.to(Unit::Px).unwrap().to_string(), "-2px");

    let inverted = NumericValue::invert(number(2.0));
    assert_eq!(inverted.to(Unit::Px).unwrap().css_text(), "1 / 2px");

    let single = NumericValue::min_of(vec![number(2.0)]).unwrap();
    assert_eq!(single.to(Unit::Px).unwrap().to_string(), "2px");

    let many = NumericValue::min_of(vec![px(1.0), px(2.0)]).unwrap();
    assert_eq!(many.to(Unit::Px), Err(Error::AmbiguousCast(2)));
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_number_with_unit() {
    let v = NumericValue::parse("10px").unwrap();
    let u = v.as_unit_value().unwrap();
    assert_eq!((u.value, u.unit), (10.0, Unit::Px));
}

#[test]
fn test_parse_percent_and_bare_number() {
    let u = NumericValue::parse("50%").unwrap();
    assert_eq!(u.as_unit_value().unwrap().unit, Unit::Percent);
    assert_eq!(u.as_unit_value().unwrap().value, 50.0);

    let u = NumericValue::parse("0.25").unwrap();
    assert_eq!(u.as_unit_value().unwrap().unit, Unit::Number);
    assert_eq!(u.as_unit_value().unwrap().value, 0.25);
}

#[test]
fn test_parse_keeps_decimal_text_exact() {
    let v = NumericValue::parse("2.54cm").unwrap();
    assert_eq!(v.as_unit_value().unwrap().value, 2.54);
    assert_eq!(v.to(Unit::In).unwrap().as_unit_value().unwrap().value, 1.0);
}

#[test]
fn test_parse_rejects_non_numeric_input() {
    for bad in ["abc", "", "red", "px10", "10foo"] {
        assert!(
            matches!(NumericValue::parse(bad), Err(Error::Parse(_))),
            "{bad:?} should not parse"
        );
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn prop_integer_add_sub_round_trips(a in -1_000_000i32..1_000_000, b in -1_000_000i32..1_000_000) {
        let value = number(a as f64).add([b as f64]).sub([b as f64]);
        prop_assert_eq!(value.as_unit_value().unwrap().value, a as f64);
    }

    #[test]
    fn prop_nonzero_unit_values_render_value_then_suffix(v in prop::num::i32::ANY.prop_filter("nonzero", |v| *v != 0)) {
        let rendered = px(v as f64).to_string();
        prop_assert_eq!(rendered, format!("{}px", v as f64));
    }

    #[test]
    fn prop_fold_keeps_receiver_unit(v in -1000i32..1000, ops in proptest::collection::vec(-100i32..100, 1..5)) {
        let ops: Vec<f64> = ops.into_iter().map(f64::from).collect();
        let folded = px(v as f64).add(ops);
        prop_assert_eq!(folded.as_unit_value().unwrap().unit, Unit::Px);
    }
}
