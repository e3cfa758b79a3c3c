//! The style sink: interns repeated declarations into shared classes.
//!
//! Every `(property, value)` pair starts as an inline declaration. Once the
//! same pair has been seen more than `max_non_optimized` times, it is
//! promoted: a class name is derived from a content hash of the declaration,
//! a rule is appended to the style sheet, and the class name is returned in
//! place of the inline declaration from then on. Promotion is monotonic;
//! only [`StyleSink::reset`] starts over.
//!
//! Sets of promoted classes go through the same process one level up: a
//! trie keyed by the sorted class list counts repeated combinations and
//! promotes them into one combined class.

use std::collections::HashMap;

use crate::style::{PropertyValue, StyleDescription};
use crate::util;

mod sheet;

pub use sheet::{StyleTarget, SyntheticStyleSheet};

/// Generated class names start with this marker so they can never collide
/// with user-authored identifiers.
const CLASS_PREFIX: char = '\u{1F485}';

/// Occurrences allowed before a declaration is promoted to a shared class.
pub const DEFAULT_MAX_NON_OPTIMIZED: usize = 10;

/// What a resolution produced: zero or more shared class names plus the
/// declarations that stayed inline.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDesc {
    /// Space-separated class list; empty when everything stayed inline.
    pub class_name: String,
    pub style: StyleDescription,
}

#[derive(Debug, Default)]
struct ClassEntry {
    name: Option<String>,
    occurrences: usize,
}

#[derive(Debug, Default)]
struct CombinationNode {
    name: Option<String>,
    occurrences: usize,
    next: HashMap<String, CombinationNode>,
}

/// The per-context interning tables plus the sheet they write into.
pub struct StyleSink {
    sheet: Option<Box<dyn StyleTarget>>,
    max_non_optimized: usize,
    properties_by_class: HashMap<String, Vec<String>>,
    classes_per_property: HashMap<String, HashMap<String, ClassEntry>>,
    combinations: CombinationNode,
}

impl StyleSink {
    /// A sink writing into `sheet` with the default promotion threshold.
    pub fn new(sheet: Box<dyn StyleTarget>) -> StyleSink {
        StyleSink::with_threshold(sheet, DEFAULT_MAX_NON_OPTIMIZED)
    }

    pub fn with_threshold(sheet: Box<dyn StyleTarget>, max_non_optimized: usize) -> StyleSink {
        StyleSink {
            sheet: Some(sheet),
            max_non_optimized,
            properties_by_class: HashMap::new(),
            classes_per_property: HashMap::new(),
            combinations: CombinationNode::default(),
        }
    }

    /// A sink with no sheet: everything stays inline and nothing is
    /// counted, the shape used outside an active document context.
    pub fn detached() -> StyleSink {
        StyleSink {
            sheet: None,
            max_non_optimized: DEFAULT_MAX_NON_OPTIMIZED,
            properties_by_class: HashMap::new(),
            classes_per_property: HashMap::new(),
            combinations: CombinationNode::default(),
        }
    }

    /// Clear every interning table. Idempotent; the sheet itself is left to
    /// its owner.
    pub fn reset(&mut self) {
        self.properties_by_class.clear();
        self.classes_per_property.clear();
        self.combinations = CombinationNode::default();
    }

    pub fn sheet(&self) -> Option<&dyn StyleTarget> {
        self.sheet.as_deref()
    }

    /// Resolve a style description into shared class names plus the inline
    /// remainder.
    pub fn get_desc(&mut self, styles: &StyleDescription) -> StyleDesc {
        let mut class_names = Vec::new();
        let mut style = StyleDescription::new();
        for (property, value) in styles.iter() {
            match self.single_rule_desc(property, value) {
                Some(class_name) => class_names.push(class_name),
                None => style.insert(property, value.clone()),
            }
        }
        StyleDesc {
            class_name: self.compress_classes(class_names),
            style,
        }
    }

    /// Track one declaration. Returns the class name once promoted, `None`
    /// while it stays inline.
    fn single_rule_desc(&mut self, property: &str, value: &PropertyValue) -> Option<String> {
        if self.sheet.is_none() {
            return None;
        }
        let value_text = value.to_string();
        let entry = self
            .classes_per_property
            .entry(property.to_string())
            .or_default()
            .entry(value_text.clone())
            .or_default();
        let seen = entry.occurrences;
        entry.occurrences += 1;
        if seen < self.max_non_optimized {
            return None;
        }
        if let Some(name) = &entry.name {
            return Some(name.clone());
        }
        let declaration = format!("{}: {}", util::camel_to_kebab(property), value_text);
        let name = self.insert_rule(vec![declaration]);
        if let Some(values) = self.classes_per_property.get_mut(property)
            && let Some(entry) = values.get_mut(&value_text)
        {
            entry.name = Some(name.clone());
        }
        Some(name)
    }

    /// Combine promoted class names. The set is sorted first so the same
    /// combination reaches the same trie node regardless of input order.
    fn compress_classes(&mut self, classes: Vec<String>) -> String {
        if classes.is_empty() {
            return String::new();
        }
        let mut sorted = classes;
        sorted.sort();

        let mut node = &mut self.combinations;
        for class in &sorted {
            node = node.next.entry(class.clone()).or_default();
        }
        node.occurrences += 1;
        if node.occurrences < self.max_non_optimized {
            return sorted.join(" ");
        }
        if let Some(name) = &node.name {
            return name.clone();
        }

        let declarations: Vec<String> = sorted
            .iter()
            .flat_map(|class| {
                self.properties_by_class
                    .get(class)
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        let name = self.insert_rule(declarations);

        let mut node = &mut self.combinations;
        for class in &sorted {
            node = node.next.entry(class.clone()).or_default();
        }
        node.name = Some(name.clone());
        name
    }

    /// Register a class for the given declarations and append its rule to
    /// the sheet. The name is a content hash, so identical declarations
    /// always map to the same class.
    fn insert_rule(&mut self, declarations: Vec<String>) -> String {
        let name = format!("{}{}", CLASS_PREFIX, hash(&declarations.join(" ")));
        let body = declarations.join(";\n");
        self.properties_by_class.insert(name.clone(), declarations);

        let mut selector = String::new();
        let _ = cssparser::serialize_identifier(&name, &mut selector);
        let rule = format!(".{} {{ {} }}", selector, body);
        if let Some(sheet) = &mut self.sheet {
            let index = sheet.len();
            sheet.insert_rule(&rule, index);
        }
        name
    }
}

impl std::fmt::Debug for StyleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleSink")
            .field("classes", &self.properties_by_class.len())
            .field("max_non_optimized", &self.max_non_optimized)
            .field("attached", &self.sheet.is_some())
            .finish()
    }
}

/// DJB2-variant string hash over UTF-16 code units, scanned from the end of
/// the string, truncated to 32 bits at every step.
fn hash(subject: &str) -> u32 {
    let units: Vec<u16> = subject.encode_utf16().collect();
    let mut h: i32 = 5381;
    for &unit in units.iter().rev() {
        h = ((h as i64).wrapping_mul(33) as i32) ^ (unit as i32);
    }
    h as u32
}
