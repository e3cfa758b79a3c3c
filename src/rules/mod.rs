//! The rule interpreter: an ordered registry of named intent rules.
//!
//! Each rule maps one recognized props-bag key to a partial set of CSS
//! declarations. A rule receives the entire input bag so it can read
//! sibling keys for context (`align` reads `row`, `size` reads `lh`).
//! Rule outputs merge by shallow overwrite; overwriting an already-set
//! property is reported as a warning in debug builds and the later rule
//! wins.

use std::collections::HashMap;

use crate::error::Result;
use crate::props::{PropsBag, Scalar};
use crate::style::StyleDescription;
use crate::value::{NumericValue, Unit};

mod directional;
mod panel;
mod shorthand;
mod text;

pub use directional::{CornerNames, EdgeNames, diagonal_rules, directional_rules};
pub use panel::panel_rules;
pub use text::text_rules;

/// What a rule contributes to the resolved style.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutput {
    /// The distinguished "no effect" sentinel: excluded from merging
    /// entirely. Distinct from an empty `Props`, which merges as a no-op
    /// but still counts as a contribution.
    Empty,
    Props(StyleDescription),
}

impl RuleOutput {
    pub fn props(props: StyleDescription) -> RuleOutput {
        RuleOutput::Props(props)
    }

    /// A one-declaration contribution.
    pub fn single(
        property: impl Into<String>,
        value: impl Into<crate::style::PropertyValue>,
    ) -> RuleOutput {
        RuleOutput::Props(StyleDescription::new().with(property, value))
    }
}

/// One registered rule.
pub type RuleFn = fn(&PropsBag) -> Result<RuleOutput>;

#[derive(Clone)]
pub struct RuleEntry {
    pub key: &'static str,
    pub eval: RuleFn,
}

/// An ordered, closed set of rules keyed by recognized prop name.
#[derive(Clone, Default)]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
    index: HashMap<&'static str, usize>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet::default()
    }

    /// Register a rule. A repeated key replaces the earlier evaluator but
    /// keeps its registration position.
    pub fn with_rule(mut self, key: &'static str, eval: RuleFn) -> RuleSet {
        match self.index.get(key) {
            Some(&i) => self.entries[i] = RuleEntry { key, eval },
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(RuleEntry { key, eval });
            }
        }
        self
    }

    /// Compose a new set from this one and `other`; on key collision the
    /// later registration wins.
    pub fn add(&self, other: &RuleSet) -> RuleSet {
        let mut out = self.clone();
        for entry in &other.entries {
            out = out.with_rule(entry.key, entry.eval);
        }
        out
    }

    /// Whether `key` belongs to this set's closed key set.
    pub fn recognizes(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// The recognized keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    fn entry(&self, key: &str) -> Option<&RuleEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Resolve a props bag into declarations.
    ///
    /// Input keys are visited in insertion order; null values and
    /// unrecognized keys are skipped. Rule errors propagate immediately.
    pub fn exec(&self, input: &PropsBag) -> Result<StyleDescription> {
        let mut result = StyleDescription::new();
        for (key, value) in input.iter() {
            if matches!(value, crate::props::PropValue::Null) {
                continue;
            }
            let Some(entry) = self.entry(key) else {
                continue;
            };
            if let RuleOutput::Props(props) = (entry.eval)(input)? {
                merge(&mut result, entry.key, input, props);
            }
        }
        Ok(result)
    }

    /// Resolve only the named subset of keys, in the given order.
    pub fn exec_subset(&self, input: &PropsBag, subset: &[&str]) -> Result<StyleDescription> {
        let mut result = StyleDescription::new();
        for &key in subset {
            if !input.is_present(key) {
                continue;
            }
            let Some(entry) = self.entry(key) else {
                continue;
            };
            if let RuleOutput::Props(props) = (entry.eval)(input)? {
                merge(&mut result, entry.key, input, props);
            }
        }
        Ok(result)
    }
}

fn merge(result: &mut StyleDescription, rule_key: &str, input: &PropsBag, props: StyleDescription) {
    for (property, value) in props.iter() {
        if cfg!(debug_assertions) && result.contains(property) {
            log::warn!("rule {rule_key} tries to override property {property} on input: {input:?}");
        }
        result.insert(property, value.clone());
    }
}

/// Convert a scalar prop into a typed numeric value.
///
/// Booleans map to 0/1 in the given unit, numbers take the unit directly,
/// strings parse (a unitless parse result is projected into the unit), and
/// typed values pass through untouched.
pub fn scalar_to_css_value(subject: &Scalar, unit: Unit) -> Result<NumericValue> {
    match subject {
        Scalar::Bool(b) => Ok(NumericValue::unit(if *b { 1.0 } else { 0.0 }, unit)),
        Scalar::Number(n) => Ok(NumericValue::unit(*n, unit)),
        Scalar::Str(text) => {
            let value = NumericValue::parse(text)?;
            match value.as_unit_value() {
                Some(u) if u.unit == Unit::Number => value.to(unit),
                _ => Ok(value),
            }
        }
        Scalar::Numeric(value) => Ok(value.clone()),
    }
}
