//! Resolved style declarations and the resolver boundary.
//!
//! A [`StyleDescription`] is the normalized output of rule interpretation:
//! an ordered mapping from CSS property name to value. Property names are
//! stored as authored (camelCase and kebab-case are both accepted) and only
//! normalized when handed to a DOM-facing consumer.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::props::PropsBag;
use crate::rules::RuleSet;
use crate::sink::{StyleDesc, StyleSink};
use crate::util;
use crate::value::{
    NumericValue, PositionValue, TransformValue, UnparsedValue, UrlValue, VariableReference,
};

/// A single declaration value: a literal string, a plain number, or one of
/// the typed CSS value objects.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Literal(String),
    Number(f64),
    Numeric(NumericValue),
    Transform(TransformValue),
    Position(PositionValue),
    Url(UrlValue),
    Variable(VariableReference),
    Unparsed(UnparsedValue),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Literal(s) => f.write_str(s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Numeric(v) => f.write_str(&v.to_css(false)),
            PropertyValue::Transform(v) => f.write_str(v.css_text()),
            PropertyValue::Position(v) => f.write_str(v.css_text()),
            PropertyValue::Url(v) => f.write_str(v.css_text()),
            PropertyValue::Variable(v) => f.write_str(v.css_text()),
            PropertyValue::Unparsed(v) => f.write_str(v.css_text()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> PropertyValue {
        PropertyValue::Literal(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> PropertyValue {
        PropertyValue::Literal(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> PropertyValue {
        PropertyValue::Number(value)
    }
}

impl From<NumericValue> for PropertyValue {
    fn from(value: NumericValue) -> PropertyValue {
        PropertyValue::Numeric(value)
    }
}

impl From<TransformValue> for PropertyValue {
    fn from(value: TransformValue) -> PropertyValue {
        PropertyValue::Transform(value)
    }
}

impl From<VariableReference> for PropertyValue {
    fn from(value: VariableReference) -> PropertyValue {
        PropertyValue::Variable(value)
    }
}

/// An ordered set of CSS declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDescription {
    decls: IndexMap<String, PropertyValue>,
}

impl StyleDescription {
    pub fn new() -> StyleDescription {
        StyleDescription::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<PropertyValue>) -> StyleDescription {
        self.insert(property, value);
        self
    }

    /// Insert a declaration, overwriting any existing value. An overwritten
    /// key keeps its original position.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<PropertyValue>) {
        self.decls.insert(property.into(), value.into());
    }

    /// Append every declaration from `other`, overwriting on collision.
    pub fn extend(&mut self, other: StyleDescription) {
        for (property, value) in other.decls {
            self.decls.insert(property, value);
        }
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.decls.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.decls.contains_key(property)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.decls.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.decls.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// A copy with every property name normalized to camelCase, the shape a
    /// DOM style object expects.
    pub fn camelized(&self) -> StyleDescription {
        self.iter()
            .map(|(k, v)| (util::kebab_to_camel(k), v.clone()))
            .collect()
    }

    /// A copy with every property name normalized to kebab-case, the shape
    /// CSS text expects.
    pub fn kebabbed(&self) -> StyleDescription {
        self.iter()
            .map(|(k, v)| (util::camel_to_kebab(k), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for StyleDescription {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> StyleDescription {
        let mut desc = StyleDescription::new();
        for (k, v) in iter {
            desc.insert(k, v);
        }
        desc
    }
}

/// Composes a rule set with an optional style sink: the boundary a
/// component layer resolves its props through.
pub struct StyleResolver<'a> {
    rules: &'a RuleSet,
    sink: Option<StyleSink>,
}

impl<'a> StyleResolver<'a> {
    /// A resolver with no sink. Deduplicated resolution is unavailable
    /// until a sink is registered.
    pub fn new(rules: &'a RuleSet) -> StyleResolver<'a> {
        StyleResolver { rules, sink: None }
    }

    pub fn with_sink(rules: &'a RuleSet, sink: StyleSink) -> StyleResolver<'a> {
        StyleResolver {
            rules,
            sink: Some(sink),
        }
    }

    /// Resolve props into a class list plus inline remainder through the
    /// registered sink. Fails with [`Error::MissingContext`] when no sink is
    /// registered.
    pub fn resolve(&mut self, props: &PropsBag) -> Result<StyleDesc> {
        let styles = self.rules.exec(props)?;
        match &mut self.sink {
            Some(sink) => Ok(sink.get_desc(&styles)),
            None => Err(Error::MissingContext),
        }
    }

    /// Resolve props into plain inline declarations, bypassing the sink.
    pub fn resolve_inline(&self, props: &PropsBag) -> Result<StyleDescription> {
        self.rules.exec(props)
    }

    pub fn sink(&self) -> Option<&StyleSink> {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> Option<&mut StyleSink> {
        self.sink.as_mut()
    }
}
