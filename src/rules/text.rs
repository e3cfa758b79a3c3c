//! The text rule set: typography intents for text elements.

use std::sync::OnceLock;

use crate::error::Result;
use crate::props::{PropsBag, Scalar};
use crate::style::{PropertyValue, StyleDescription};
use crate::value::Unit;

use super::panel::scalar_literal;
use super::{RuleOutput, RuleSet, scalar_to_css_value, shorthand};

/// The text rule set, built once.
pub fn text_rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .with_rule("display", display)
            .with_rule("flex", flex)
            .with_rule("serif", serif)
            .with_rule("mono", mono)
            .with_rule("size", size)
            .with_rule("font", font)
            .with_rule("color", color)
            .with_rule("weight", weight)
            .with_rule("thin", thin)
            .with_rule("light", light)
            .with_rule("bold", bold)
            .with_rule("black", black)
            .with_rule("italic", italic)
            .with_rule("lh", lh)
            .with_rule("lineHeight", line_height)
            .with_rule("ls", ls)
            .with_rule("spacing", spacing)
            .with_rule("letterSpacing", letter_spacing)
            .with_rule("align", align)
            .with_rule("center", center)
            .with_rule("left", left)
            .with_rule("right", right)
            .with_rule("width", width)
            .with_rule("minWidth", min_width)
            .with_rule("maxWidth", max_width)
            .with_rule("transition", transition)
    })
}

fn display(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("display") {
        Some(s) => Ok(RuleOutput::single("display", scalar_literal(s))),
        None => Ok(RuleOutput::Empty),
    }
}

fn flex(input: &PropsBag) -> Result<RuleOutput> {
    let Some(s) = input.scalar("flex") else {
        return Ok(RuleOutput::Empty);
    };
    let out = StyleDescription::new()
        .with("display", "flex")
        .with("flex", scalar_to_css_value(s, Unit::Fr)?);
    Ok(RuleOutput::props(out))
}

fn serif(input: &PropsBag) -> Result<RuleOutput> {
    let family = if input.truthy("serif") {
        "var(--serif-font, serif)"
    } else {
        "var(--sans-serif-font, sans-serif)"
    };
    Ok(RuleOutput::single("fontFamily", family))
}

fn mono(input: &PropsBag) -> Result<RuleOutput> {
    let family = if input.truthy("mono") {
        "var(--monospace-font, monospace)"
    } else {
        "var(--sans-serif-font, sans-serif)"
    };
    Ok(RuleOutput::single("fontFamily", family))
}

/// `size` sets the font size and derives a line height: an explicit `lh` or
/// `lineHeight` sibling wins, otherwise 1.2x the font size.
fn size(input: &PropsBag) -> Result<RuleOutput> {
    let Some(s) = input.scalar("size") else {
        return Ok(RuleOutput::Empty);
    };
    let font_size = scalar_to_css_value(s, Unit::Px)?;
    let line_height_source = if let Some(lh) = input.scalar("lh") {
        lh.clone()
    } else if let Some(lh) = input.scalar("lineHeight") {
        lh.clone()
    } else {
        Scalar::Numeric(font_size.mul([1.2]))
    };
    let out = StyleDescription::new()
        .with("fontSize", font_size)
        .with(
            "lineHeight",
            scalar_to_css_value(&line_height_source, Unit::Number)?,
        );
    Ok(RuleOutput::props(out))
}

fn font(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("font") {
        Some(s) => Ok(RuleOutput::single("fontFamily", scalar_literal(s))),
        None => Ok(RuleOutput::Empty),
    }
}

fn color(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("color") {
        Some(s) => Ok(RuleOutput::single("color", scalar_literal(s))),
        None => Ok(RuleOutput::Empty),
    }
}

fn weight(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("weight") {
        Some(Scalar::Bool(false)) | None => Ok(RuleOutput::single("fontWeight", "normal")),
        Some(s) => Ok(RuleOutput::single(
            "fontWeight",
            scalar_to_css_value(s, Unit::Number)?,
        )),
    }
}

fn named_weight(input: &PropsBag, key: &str, value: &'static str) -> Result<RuleOutput> {
    let weight = if input.truthy(key) { value } else { "normal" };
    Ok(RuleOutput::single("fontWeight", weight))
}

fn thin(input: &PropsBag) -> Result<RuleOutput> {
    named_weight(input, "thin", "100")
}

fn light(input: &PropsBag) -> Result<RuleOutput> {
    named_weight(input, "light", "300")
}

fn bold(input: &PropsBag) -> Result<RuleOutput> {
    named_weight(input, "bold", "700")
}

fn black(input: &PropsBag) -> Result<RuleOutput> {
    named_weight(input, "black", "900")
}

fn italic(input: &PropsBag) -> Result<RuleOutput> {
    let style = if input.truthy("italic") { "italic" } else { "normal" };
    Ok(RuleOutput::single("fontStyle", style))
}

fn line_height_rule(input: &PropsBag, key: &str) -> Result<RuleOutput> {
    match input.scalar(key) {
        Some(s) => Ok(RuleOutput::single(
            "lineHeight",
            scalar_to_css_value(s, Unit::Number)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn lh(input: &PropsBag) -> Result<RuleOutput> {
    line_height_rule(input, "lh")
}

fn line_height(input: &PropsBag) -> Result<RuleOutput> {
    line_height_rule(input, "lineHeight")
}

fn letter_spacing_rule(input: &PropsBag, key: &str) -> Result<RuleOutput> {
    match input.scalar(key) {
        Some(s) => Ok(RuleOutput::single(
            "letterSpacing",
            scalar_to_css_value(s, Unit::Px)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn ls(input: &PropsBag) -> Result<RuleOutput> {
    letter_spacing_rule(input, "ls")
}

fn spacing(input: &PropsBag) -> Result<RuleOutput> {
    letter_spacing_rule(input, "spacing")
}

fn letter_spacing(input: &PropsBag) -> Result<RuleOutput> {
    letter_spacing_rule(input, "letterSpacing")
}

fn align(input: &PropsBag) -> Result<RuleOutput> {
    let Some(Scalar::Str(keyword)) = input.scalar("align") else {
        return Ok(RuleOutput::Empty);
    };
    let mut out = StyleDescription::new().with("textAlign", keyword.as_str());
    if let Some(justify) = shorthand::text_align_to_flex_align(keyword) {
        out.insert("justifyContent", justify);
    }
    Ok(RuleOutput::props(out))
}

/// The text-align flags return an empty contribution rather than the Empty
/// sentinel when unset: a deliberate no-op, not a skip.
fn text_align_flag(input: &PropsBag, key: &str, value: &'static str) -> Result<RuleOutput> {
    if input.truthy(key) {
        Ok(RuleOutput::single("text-align", value))
    } else {
        Ok(RuleOutput::props(StyleDescription::new()))
    }
}

fn center(input: &PropsBag) -> Result<RuleOutput> {
    text_align_flag(input, "center", "center")
}

fn left(input: &PropsBag) -> Result<RuleOutput> {
    text_align_flag(input, "left", "left")
}

fn right(input: &PropsBag) -> Result<RuleOutput> {
    text_align_flag(input, "right", "right")
}

fn width(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("width") {
        Some(s) => Ok(RuleOutput::single("width", scalar_to_css_value(s, Unit::Px)?)),
        None => Ok(RuleOutput::Empty),
    }
}

fn min_width(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("minWidth") {
        Some(s) => Ok(RuleOutput::single(
            "minWidth",
            scalar_to_css_value(s, Unit::Px)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn max_width(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("maxWidth") {
        Some(s) => Ok(RuleOutput::single(
            "maxWidth",
            scalar_to_css_value(s, Unit::Px)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

/// `transition` reads every sibling key and emits a `<property> <ms>ms`
/// entry for each one that affects concrete style properties.
fn transition(input: &PropsBag) -> Result<RuleOutput> {
    let Some(Scalar::Number(duration)) = input.scalar("transition") else {
        return Ok(RuleOutput::Empty);
    };
    let mut parts = Vec::new();
    for key in input.keys() {
        if let Some(affected) = affected_properties(key) {
            for property in affected {
                parts.push(format!("{} {}ms", property, duration));
            }
        }
    }
    Ok(RuleOutput::single(
        "transition",
        PropertyValue::Literal(parts.join(",")),
    ))
}

/// The concrete CSS properties a text intent key ends up touching.
fn affected_properties(key: &str) -> Option<&'static [&'static str]> {
    Some(match key {
        "size" => &["font-size", "line-height"],
        "lh" => &["line-height"],
        "lineHeight" => &["line-height"],
        "color" => &["color"],
        "weight" => &["fontWeight"],
        "bold" => &["fontWeight"],
        "light" => &["fontWeight"],
        "ls" => &["line-spacing"],
        "spacing" => &["line-spacing"],
        "letterSpacing" => &["line-spacing"],
        "width" => &["width"],
        "minWidth" => &["min-width"],
        "maxWidth" => &["max-width"],
        _ => return None,
    })
}
