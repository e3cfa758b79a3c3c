//! WASM bindings for browser-side style resolution.
//!
//! This module exposes props-bag resolution to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::sink::StyleSink;
use crate::{panel_rules, text_rules};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Resolve a JSON props bag through the panel rules.
///
/// Takes a JSON object of intent props and returns CSS declaration text
/// (`prop: value; ...`, kebab-case properties).
#[wasm_bindgen]
pub fn resolve_panel(props_json: &str) -> Result<String, JsValue> {
    resolve_with(props_json, panel_rules())
}

/// Resolve a JSON props bag through the text rules.
#[wasm_bindgen]
pub fn resolve_text(props_json: &str) -> Result<String, JsValue> {
    resolve_with(props_json, text_rules())
}

/// Resolve a JSON props bag repeatedly through a dedup sink and return the
/// inserted class rules plus the final class/style pair, JSON-encoded.
#[wasm_bindgen]
pub fn resolve_deduplicated(
    props_json: &str,
    repeat: usize,
    threshold: usize,
) -> Result<String, JsValue> {
    let props = parse_props(props_json)?;
    let styles = panel_rules()
        .exec(&props)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let sheet = std::rc::Rc::new(std::cell::RefCell::new(
        crate::sink::SyntheticStyleSheet::new(),
    ));
    let mut sink = StyleSink::with_threshold(Box::new(sheet.clone()), threshold);
    let mut desc = sink.get_desc(&styles);
    for _ in 1..repeat.max(1) {
        desc = sink.get_desc(&styles);
    }

    let result = serde_json::json!({
        "className": desc.class_name,
        "style": declarations_text(&desc.style),
        "rules": sheet.borrow().rules(),
    });
    Ok(result.to_string())
}

fn parse_props(props_json: &str) -> Result<crate::PropsBag, JsValue> {
    let value: serde_json::Value =
        serde_json::from_str(props_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    crate::json::props_from_json(&value).map_err(|e| JsValue::from_str(&e))
}

fn resolve_with(
    props_json: &str,
    rules: &crate::rules::RuleSet,
) -> Result<String, JsValue> {
    let props = parse_props(props_json)?;
    let styles = rules
        .exec(&props)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(declarations_text(&styles))
}

fn declarations_text(styles: &crate::StyleDescription) -> String {
    styles
        .kebabbed()
        .iter()
        .map(|(property, value)| format!("{}: {}", property, value))
        .collect::<Vec<_>>()
        .join("; ")
}
