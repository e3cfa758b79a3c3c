//! Style sink tests: interning, promotion thresholds, combination caching,
//! and the resolver boundary.

use std::cell::RefCell;
use std::rc::Rc;

use stylum::{
    Error, PropsBag, StyleDescription, StyleResolver, StyleSink, StyleTarget, SyntheticStyleSheet,
    panel_rules,
};

fn shared_sheet() -> Rc<RefCell<SyntheticStyleSheet>> {
    Rc::new(RefCell::new(SyntheticStyleSheet::new()))
}

fn sink_with(sheet: &Rc<RefCell<SyntheticStyleSheet>>, threshold: usize) -> StyleSink {
    StyleSink::with_threshold(Box::new(sheet.clone()), threshold)
}

fn color(value: &str) -> StyleDescription {
    StyleDescription::new().with("color", value)
}

// ============================================================================
// Single-property promotion
// ============================================================================

#[test]
fn test_promotion_after_threshold_is_exceeded() {
    let sheet = shared_sheet();
    let mut sink = sink_with(&sheet, 2);

    for _ in 0..2 {
        let desc = sink.get_desc(&color("red"));
        assert_eq!(desc.class_name, "");
        assert_eq!(desc.style.get("color").unwrap().to_string(), "red");
        assert!(sheet.borrow().rules().is_empty());
    }

    let desc = sink.get_desc(&color("red"));
    assert!(!desc.class_name.is_empty());
    assert!(desc.style.is_empty());
    assert_eq!(sheet.borrow().len(), 1);

    // Stable class name on every further call.
    let again = sink.get_desc(&color("red"));
    assert_eq!(again.class_name, desc.class_name);
    assert_eq!(sheet.borrow().len(), 1);
}

#[test]
fn test_distinct_values_have_independent_counters() {
    let sheet = shared_sheet();
    let mut sink = sink_with(&sheet, 2);
    sink.get_desc(&color("red"));
    sink.get_desc(&color("red"));
    sink.get_desc(&color("red"));

    let desc = sink.get_desc(&color("blue"));
    assert_eq!(desc.class_name, "");
    assert_eq!(desc.style.get("color").unwrap().to_string(), "blue");
}

#[test]
fn test_inserted_rule_text_shape() {
    let sheet = shared_sheet();
    let mut sink = sink_with(&sheet, 0);
    let desc = sink.get_desc(&StyleDescription::new().with("minWidth", stylum::value::px(10.0)));

    let rules = sheet.borrow().rules().to_vec();
    // Single-declaration rule plus the immediately promoted combination.
    assert!(!rules.is_empty());
    assert!(rules[0].contains("min-width: 10px"));
    assert!(rules[0].starts_with(".\u{1F485}"));
    assert!(desc.class_name.starts_with('\u{1F485}'));
}

#[test]
fn test_identical_declarations_share_a_class_across_sinks() {
    let sheet_a = shared_sheet();
    let sheet_b = shared_sheet();
    let mut a = sink_with(&sheet_a, 0);
    let mut b = sink_with(&sheet_b, 0);
    assert_eq!(
        a.get_desc(&color("red")).class_name,
        b.get_desc(&color("red")).class_name
    );
}

// ============================================================================
// Combination promotion
// ============================================================================

#[test]
fn test_combination_of_promoted_classes_converges_across_orderings() {
    let sheet = shared_sheet();
    let mut sink = sink_with(&sheet, 2);

    let forward = StyleDescription::new()
        .with("color", "red")
        .with("width", stylum::value::px(10.0));
    let reversed = StyleDescription::new()
        .with("width", stylum::value::px(10.0))
        .with("color", "red");

    // Two calls per property pair keep everything inline.
    sink.get_desc(&forward);
    sink.get_desc(&forward);

    // Third call promotes both properties; the combination is fresh.
    let first = sink.get_desc(&forward);
    let classes: Vec<&str> = first.class_name.split(' ').collect();
    assert_eq!(classes.len(), 2);
    assert_eq!(sheet.borrow().len(), 2);

    // Same set in the other order walks the same trie path and promotes
    // the combined class.
    let second = sink.get_desc(&reversed);
    assert!(!second.class_name.contains(' '));
    assert_eq!(sheet.borrow().len(), 3);

    // Both orderings now map to the one combined class.
    let third = sink.get_desc(&forward);
    assert_eq!(third.class_name, second.class_name);
    assert_eq!(sheet.borrow().len(), 3);
}

#[test]
fn test_combined_rule_concatenates_member_declarations() {
    let sheet = shared_sheet();
    let mut sink = sink_with(&sheet, 1);
    let styles = StyleDescription::new()
        .with("color", "red")
        .with("opacity", 0.5);

    sink.get_desc(&styles); // inline
    sink.get_desc(&styles); // promotes both members, combination count 1
    sink.get_desc(&styles); // promotes the combination

    let rules = sheet.borrow().rules().to_vec();
    let combined = rules.last().unwrap();
    assert!(combined.contains("color: red"));
    assert!(combined.contains("opacity: 0.5"));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_detached_sink_stays_inline_forever() {
    let mut sink = StyleSink::detached();
    for _ in 0..100 {
        let desc = sink.get_desc(&color("red"));
        assert_eq!(desc.class_name, "");
        assert_eq!(desc.style.len(), 1);
    }
}

#[test]
fn test_reset_forgets_counters_and_names() {
    let sheet = shared_sheet();
    let mut sink = sink_with(&sheet, 1);
    sink.get_desc(&color("red"));
    let promoted = sink.get_desc(&color("red"));
    assert!(!promoted.class_name.is_empty());

    sink.reset();
    let desc = sink.get_desc(&color("red"));
    assert_eq!(desc.class_name, "");

    // Idempotent with or without prior insertions.
    sink.reset();
    sink.reset();
}

// ============================================================================
// Resolver boundary
// ============================================================================

#[test]
fn test_resolver_without_sink_is_a_missing_context() {
    let mut resolver = StyleResolver::new(panel_rules());
    let err = resolver
        .resolve(&PropsBag::new().with("center", true))
        .unwrap_err();
    assert_eq!(err, Error::MissingContext);
}

#[test]
fn test_resolver_inline_path_bypasses_the_sink() {
    let resolver = StyleResolver::new(panel_rules());
    let styles = resolver
        .resolve_inline(&PropsBag::new().with("width", 10.0))
        .unwrap();
    assert_eq!(styles.get("width").unwrap().to_string(), "10px");
}

#[test]
fn test_resolver_with_sink_deduplicates() {
    let sheet = shared_sheet();
    let mut resolver =
        StyleResolver::with_sink(panel_rules(), sink_with(&sheet, 1));
    let props = PropsBag::new().with("background", "tomato");

    let first = resolver.resolve(&props).unwrap();
    assert_eq!(first.class_name, "");
    let second = resolver.resolve(&props).unwrap();
    assert!(!second.class_name.is_empty());
    assert_eq!(sheet.borrow().len(), 1);
}
