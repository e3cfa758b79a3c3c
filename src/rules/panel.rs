//! The panel rule set: layout, box, and effect intents for container
//! elements.

use std::sync::OnceLock;

use crate::error::Result;
use crate::props::{PropsBag, PropValue, Scalar, Vector3};
use crate::style::{PropertyValue, StyleDescription};
use crate::value::{NumericValue, TransformComponent, TransformValue, Unit, UnitValue};

use super::directional::{CornerNames, EdgeNames, diagonal_rules, directional_rules};
use super::{RuleOutput, RuleSet, scalar_to_css_value, shorthand, text_rules};

const POSITION_EDGES: EdgeNames = EdgeNames {
    t: "top",
    b: "bottom",
    l: "left",
    r: "right",
};

/// The panel rule set, built once.
pub fn panel_rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(|| {
        RuleSet::new()
            .with_rule("display", display)
            .with_rule("block", block)
            .with_rule("inline", inline)
            .with_rule("relative", relative)
            .with_rule("absolute", absolute)
            .with_rule("fixed", fixed)
            .with_rule("flex", flex)
            .with_rule("order", order)
            .with_rule("row", row)
            .with_rule("wrap", wrap)
            .with_rule("align", align)
            .with_rule("alignItems", align_items)
            .with_rule("alignContent", align_content)
            .with_rule("justify", justify)
            .with_rule("center", center)
            .with_rule("alignSelf", align_self)
            .with_rule("round", round)
            .with_rule("border", border)
            .with_rule("outline", outline)
            .with_rule("margin", margin)
            .with_rule("padding", padding)
            .with_rule("size", size)
            .with_rule("width", width)
            .with_rule("height", height)
            .with_rule("minWidth", min_width)
            .with_rule("minHeight", min_height)
            .with_rule("maxWidth", max_width)
            .with_rule("maxHeight", max_height)
            .with_rule("background", background)
            .with_rule("text", text)
            .with_rule("transform", transform)
            .with_rule("move", move_)
            .with_rule("scale", scale)
            .with_rule("shadow", shadow)
            .with_rule("elevation", elevation)
            .with_rule("opacity", opacity)
            .with_rule("zIndex", z_index)
            .with_rule("interactive", interactive)
            .with_rule("scroll", scroll)
            .with_rule("scrollX", scroll_x)
            .with_rule("scrollY", scroll_y)
            .with_rule("clip", clip)
            .with_rule("clipX", clip_x)
            .with_rule("clipY", clip_y)
            .with_rule("transition", transition)
    })
}

/// Render a scalar as a passthrough declaration value.
pub(super) fn scalar_literal(scalar: &Scalar) -> PropertyValue {
    match scalar {
        Scalar::Bool(b) => PropertyValue::Literal(b.to_string()),
        Scalar::Number(n) => PropertyValue::Number(*n),
        Scalar::Str(s) => PropertyValue::Literal(s.clone()),
        Scalar::Numeric(v) => PropertyValue::Numeric(v.clone()),
    }
}

fn display(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("display") {
        Some(s) => Ok(RuleOutput::single("display", scalar_literal(s))),
        None => Ok(RuleOutput::Empty),
    }
}

fn block(input: &PropsBag) -> Result<RuleOutput> {
    if input.truthy("block") {
        Ok(RuleOutput::single("display", "block"))
    } else {
        Ok(RuleOutput::Empty)
    }
}

fn inline(input: &PropsBag) -> Result<RuleOutput> {
    if input.truthy("inline") {
        Ok(RuleOutput::single("display", "inline"))
    } else {
        Ok(RuleOutput::Empty)
    }
}

/// `relative`/`absolute`/`fixed`: a plain `true` sets the position alone;
/// anything else also contributes edge offsets (a bare scalar broadcasts
/// to all four edges).
fn position_rule(input: &PropsBag, key: &str, position: &'static str) -> Result<RuleOutput> {
    let Some(value) = input.get(key) else {
        return Ok(RuleOutput::Empty);
    };
    match value {
        PropValue::Scalar(Scalar::Bool(false)) => Ok(RuleOutput::Empty),
        PropValue::Scalar(Scalar::Bool(true)) => Ok(RuleOutput::single("position", position)),
        other => {
            let mut out = StyleDescription::new().with("position", position);
            out.extend(directional_rules(&POSITION_EDGES, other, |s| {
                scalar_to_css_value(s, Unit::Px).map(PropertyValue::from)
            })?);
            Ok(RuleOutput::props(out))
        }
    }
}

fn relative(input: &PropsBag) -> Result<RuleOutput> {
    position_rule(input, "relative", "relative")
}

fn absolute(input: &PropsBag) -> Result<RuleOutput> {
    position_rule(input, "absolute", "absolute")
}

fn fixed(input: &PropsBag) -> Result<RuleOutput> {
    position_rule(input, "fixed", "fixed")
}

fn flex(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("flex") {
        Some(s) => Ok(RuleOutput::single(
            "flex",
            scalar_to_css_value(s, Unit::Fr)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn order(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("order") {
        Some(s) => Ok(RuleOutput::single("order", s.as_number())),
        None => Ok(RuleOutput::Empty),
    }
}

fn row(input: &PropsBag) -> Result<RuleOutput> {
    let direction = if input.truthy("row") { "row" } else { "column" };
    Ok(RuleOutput::single("flexDirection", direction))
}

fn wrap(input: &PropsBag) -> Result<RuleOutput> {
    let Some(value) = input.scalar("wrap") else {
        return Ok(RuleOutput::Empty);
    };
    let wrap = match value {
        Scalar::Bool(true) => "wrap",
        Scalar::Bool(false) => "nowrap",
        _ => "wrap-reverse",
    };
    Ok(RuleOutput::single("flexWrap", wrap))
}

/// Whether the sibling `wrap` key enables wrapping (`true` or `"reverse"`).
fn wrap_enabled(input: &PropsBag) -> bool {
    match input.scalar("wrap") {
        Some(Scalar::Bool(true)) => true,
        Some(Scalar::Str(s)) => s == "reverse",
        _ => false,
    }
}

fn align(input: &PropsBag) -> Result<RuleOutput> {
    let Some(Scalar::Str(keyword)) = input.scalar("align") else {
        return Ok(RuleOutput::Empty);
    };
    let mut out = StyleDescription::new();
    if let Some(items) = shorthand::align_items(keyword) {
        out.insert("alignItems", items);
    }
    if !input.truthy("row")
        && let Some(text_align) = shorthand::flex_align_to_text_align(keyword)
    {
        out.insert("textAlign", text_align);
    }
    if wrap_enabled(input)
        && let Some(content) = shorthand::align_content(keyword)
    {
        out.insert("alignContent", content);
    }
    Ok(RuleOutput::props(out))
}

fn align_items(input: &PropsBag) -> Result<RuleOutput> {
    keyword_rule(input, "alignItems", "alignItems", shorthand::align_items)
}

fn align_content(input: &PropsBag) -> Result<RuleOutput> {
    keyword_rule(input, "alignContent", "alignContent", shorthand::align_content)
}

fn align_self(input: &PropsBag) -> Result<RuleOutput> {
    keyword_rule(input, "alignSelf", "alignSelf", shorthand::align_self)
}

fn keyword_rule(
    input: &PropsBag,
    key: &str,
    property: &'static str,
    table: fn(&str) -> Option<&'static str>,
) -> Result<RuleOutput> {
    let Some(Scalar::Str(keyword)) = input.scalar(key) else {
        return Ok(RuleOutput::Empty);
    };
    let mut out = StyleDescription::new();
    if let Some(value) = table(keyword) {
        out.insert(property, value);
    }
    Ok(RuleOutput::props(out))
}

fn justify(input: &PropsBag) -> Result<RuleOutput> {
    let Some(Scalar::Str(keyword)) = input.scalar("justify") else {
        return Ok(RuleOutput::Empty);
    };
    let mut out = StyleDescription::new();
    if let Some(content) = shorthand::justify_content(keyword) {
        out.insert("justifyContent", content);
    }
    if input.truthy("row")
        && let Some(text_align) = shorthand::flex_align_to_text_align(keyword)
    {
        out.insert("textAlign", text_align);
    }
    Ok(RuleOutput::props(out))
}

fn center(input: &PropsBag) -> Result<RuleOutput> {
    let Some(value) = input.scalar("center") else {
        return Ok(RuleOutput::Empty);
    };
    let row = input.truthy("row");
    let out = match value {
        Scalar::Bool(true) => {
            let mut out = StyleDescription::new()
                .with("justifyContent", "center")
                .with("alignItems", "center");
            // In a row container the main axis already centers the text;
            // textAlign only applies to the column case.
            if !row {
                out.insert("textAlign", "center");
            }
            out
        }
        Scalar::Str(axis) if (axis == "horizontal" && row) || (axis == "vertical" && !row) => {
            StyleDescription::new()
                .with("textAlign", "center")
                .with("alignItems", "center")
        }
        _ => StyleDescription::new().with("justifyContent", "center"),
    };
    Ok(RuleOutput::props(out))
}

fn round(input: &PropsBag) -> Result<RuleOutput> {
    let Some(value) = input.get("round") else {
        return Ok(RuleOutput::Empty);
    };
    let corners = CornerNames {
        tl: "border-top-left-radius",
        tr: "border-top-right-radius",
        bl: "border-bottom-left-radius",
        br: "border-bottom-right-radius",
    };
    let out = diagonal_rules(&corners, value, |s| {
        scalar_to_css_value(s, Unit::Px).map(PropertyValue::from)
    })?;
    Ok(RuleOutput::props(out))
}

fn border(input: &PropsBag) -> Result<RuleOutput> {
    let Some(value) = input.get("border") else {
        return Ok(RuleOutput::Empty);
    };
    let edges = EdgeNames {
        t: "border-top",
        b: "border-bottom",
        l: "border-left",
        r: "border-right",
    };
    let out = directional_rules(&edges, value, |s| {
        border_from_scalar(s).map(PropertyValue::Literal)
    })?;
    Ok(RuleOutput::props(out))
}

fn outline(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("outline") {
        Some(s) => Ok(RuleOutput::single(
            "outline",
            PropertyValue::Literal(border_from_scalar(s)?),
        )),
        None => Ok(RuleOutput::Empty),
    }
}

/// Expand a border shorthand scalar into `<width> <style> <color>` text.
///
/// A bare flag or number fills in `solid black`; a one-word string is tried
/// as a width first and falls back to being a color; longer strings keep
/// their own style/color words.
fn border_from_scalar(subject: &Scalar) -> Result<String> {
    match subject {
        Scalar::Bool(true) => Ok("1px solid black".to_string()),
        Scalar::Bool(false) => Ok(String::new()),
        Scalar::Number(n) => Ok(format!("{} solid black", UnitValue::new(*n, Unit::Px))),
        Scalar::Str(text) => {
            let words: Vec<&str> = text.split(' ').collect();
            match words.as_slice() {
                [] => Ok("1px solid black".to_string()),
                [only] => match scalar_to_css_value(&Scalar::Str((*only).to_string()), Unit::Px) {
                    Ok(width) => Ok(format!("{} solid black", width)),
                    Err(_) => Ok(format!("1px solid {}", only)),
                },
                [width, color] => {
                    let width = scalar_to_css_value(&Scalar::Str((*width).to_string()), Unit::Px)?;
                    Ok(format!("{} solid {}", width, color))
                }
                [width, style, color, ..] => {
                    let width = scalar_to_css_value(&Scalar::Str((*width).to_string()), Unit::Px)?;
                    Ok(format!("{} {} {}", width, style, color))
                }
            }
        }
        Scalar::Numeric(_) => Ok(String::new()),
    }
}

fn margin(input: &PropsBag) -> Result<RuleOutput> {
    spacing_rule(input, "margin", EdgeNames {
        t: "margin-top",
        b: "margin-bottom",
        l: "margin-left",
        r: "margin-right",
    })
}

fn padding(input: &PropsBag) -> Result<RuleOutput> {
    spacing_rule(input, "padding", EdgeNames {
        t: "padding-top",
        b: "padding-bottom",
        l: "padding-left",
        r: "padding-right",
    })
}

fn spacing_rule(input: &PropsBag, key: &str, edges: EdgeNames) -> Result<RuleOutput> {
    let Some(value) = input.get(key) else {
        return Ok(RuleOutput::Empty);
    };
    let out = directional_rules(&edges, value, |s| {
        scalar_to_css_value(s, Unit::Px).map(PropertyValue::from)
    })?;
    Ok(RuleOutput::props(out))
}

fn size(input: &PropsBag) -> Result<RuleOutput> {
    let Some(s) = input.scalar("size") else {
        return Ok(RuleOutput::Empty);
    };
    let out = StyleDescription::new()
        .with("width", scalar_to_css_value(s, Unit::Px)?)
        .with("height", scalar_to_css_value(s, Unit::Px)?);
    Ok(RuleOutput::props(out))
}

fn dimension_rule(input: &PropsBag, key: &str, property: &'static str) -> Result<RuleOutput> {
    match input.scalar(key) {
        Some(s) => Ok(RuleOutput::single(
            property,
            scalar_to_css_value(s, Unit::Px)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn width(input: &PropsBag) -> Result<RuleOutput> {
    dimension_rule(input, "width", "width")
}

fn height(input: &PropsBag) -> Result<RuleOutput> {
    dimension_rule(input, "height", "height")
}

fn min_width(input: &PropsBag) -> Result<RuleOutput> {
    dimension_rule(input, "minWidth", "minWidth")
}

fn min_height(input: &PropsBag) -> Result<RuleOutput> {
    dimension_rule(input, "minHeight", "minHeight")
}

fn max_width(input: &PropsBag) -> Result<RuleOutput> {
    dimension_rule(input, "maxWidth", "maxWidth")
}

fn max_height(input: &PropsBag) -> Result<RuleOutput> {
    dimension_rule(input, "maxHeight", "maxHeight")
}

fn background(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("background") {
        Some(s) => Ok(RuleOutput::single("background", scalar_literal(s))),
        None => Ok(RuleOutput::Empty),
    }
}

fn text(input: &PropsBag) -> Result<RuleOutput> {
    match input.get("text") {
        Some(PropValue::Bag(bag)) => Ok(RuleOutput::props(text_rules().exec(bag)?)),
        _ => Ok(RuleOutput::Empty),
    }
}

fn transform(input: &PropsBag) -> Result<RuleOutput> {
    match input.get("transform") {
        Some(PropValue::Transforms(components)) => Ok(RuleOutput::single(
            "transform",
            TransformValue::new(components.clone())?,
        )),
        Some(PropValue::Map(functions)) => {
            let mut calls = Vec::with_capacity(functions.len());
            for (name, argument) in functions {
                calls.push(render_transform_call(name, argument)?);
            }
            Ok(RuleOutput::single(
                "transform",
                PropertyValue::Literal(calls.join(" ")),
            ))
        }
        _ => Ok(RuleOutput::Empty),
    }
}

/// Render one `name(args)` transform call. String arguments are split on
/// commas and every piece is parsed as an unitless-default value; the
/// pieces are rejoined with spaces.
fn render_transform_call(name: &str, argument: &Scalar) -> Result<String> {
    match argument {
        Scalar::Str(text) => {
            let mut args = Vec::new();
            for word in text.split(',') {
                let value =
                    scalar_to_css_value(&Scalar::Str(word.trim().to_string()), Unit::Number)?;
                args.push(value.to_css(false).into_owned());
            }
            Ok(format!("{}({})", name, args.join(" ")))
        }
        other => {
            let value = scalar_to_css_value(other, Unit::Number)?;
            Ok(format!("{}({})", name, value.to_css(false)))
        }
    }
}

fn numberish(scalar: &Scalar) -> Result<NumericValue> {
    scalar_to_css_value(scalar, Unit::Number)
}

fn move_(input: &PropsBag) -> Result<RuleOutput> {
    let Some(PropValue::Vector(Vector3 { x, y, z })) = input.get("move") else {
        return Ok(RuleOutput::Empty);
    };
    let component = match z {
        Some(z) => TransformComponent::translate_3d(numberish(x)?, numberish(y)?, numberish(z)?),
        None => TransformComponent::translate(numberish(x)?, numberish(y)?),
    };
    Ok(RuleOutput::single(
        "transform",
        TransformValue::new(vec![component])?,
    ))
}

fn scale(input: &PropsBag) -> Result<RuleOutput> {
    let component = match input.get("scale") {
        Some(PropValue::Vector(Vector3 { x, y, z })) => match z {
            Some(z) => TransformComponent::scale_3d(numberish(x)?, numberish(y)?, numberish(z)?),
            None => TransformComponent::scale(numberish(x)?, numberish(y)?),
        },
        Some(PropValue::Scalar(s)) => {
            let value = scalar_to_css_value(s, Unit::Px)?;
            TransformComponent::scale(value.clone(), value)
        }
        _ => return Ok(RuleOutput::Empty),
    };
    Ok(RuleOutput::single(
        "transform",
        TransformValue::new(vec![component])?,
    ))
}

fn shadow(input: &PropsBag) -> Result<RuleOutput> {
    let Some(Scalar::Str(text)) = input.scalar("shadow") else {
        return Ok(RuleOutput::Empty);
    };
    let mut words = Vec::new();
    for word in text.split(' ') {
        let value = scalar_to_css_value(&Scalar::Str(word.to_string()), Unit::Px)?;
        words.push(value.to_css(false).into_owned());
    }
    Ok(RuleOutput::single(
        "boxShadow",
        PropertyValue::Literal(words.join(" ")),
    ))
}

fn elevation(input: &PropsBag) -> Result<RuleOutput> {
    let Some(s) = input.scalar("elevation") else {
        return Ok(RuleOutput::Empty);
    };
    let elevation = scalar_to_css_value(s, Unit::Px)?;
    let inset = matches!(elevation.as_unit_value(), Some(u) if u.value < 0.0);
    let y = if inset {
        elevation.mul([-1.0])
    } else {
        elevation
    };
    let spread = y.mul([2.0]);
    Ok(RuleOutput::single(
        "boxShadow",
        PropertyValue::Literal(format!(
            "{} 0 {} {} 0 rgba(0,0,0,0.3)",
            if inset { "inset" } else { "" },
            y,
            spread
        )),
    ))
}

fn opacity(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("opacity") {
        Some(s) => Ok(RuleOutput::single(
            "opacity",
            scalar_to_css_value(s, Unit::Number)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn z_index(input: &PropsBag) -> Result<RuleOutput> {
    match input.scalar("zIndex") {
        Some(s) => Ok(RuleOutput::single(
            "zIndex",
            scalar_to_css_value(s, Unit::Number)?,
        )),
        None => Ok(RuleOutput::Empty),
    }
}

fn interactive(input: &PropsBag) -> Result<RuleOutput> {
    if input.truthy("interactive") {
        Ok(RuleOutput::single("cursor", "pointer"))
    } else {
        Ok(RuleOutput::single("pointer-events", "none"))
    }
}

fn overflow_rule(input: &PropsBag, key: &str, property: &'static str) -> Result<RuleOutput> {
    let Some(value) = input.scalar(key) else {
        return Ok(RuleOutput::Empty);
    };
    let overflow = match value {
        Scalar::Bool(false) => "visible",
        Scalar::Bool(true) => "scroll",
        _ => "auto",
    };
    Ok(RuleOutput::single(property, overflow))
}

fn scroll(input: &PropsBag) -> Result<RuleOutput> {
    overflow_rule(input, "scroll", "overflow")
}

fn scroll_x(input: &PropsBag) -> Result<RuleOutput> {
    overflow_rule(input, "scrollX", "overflowX")
}

fn scroll_y(input: &PropsBag) -> Result<RuleOutput> {
    overflow_rule(input, "scrollY", "overflowY")
}

fn clip_rule(input: &PropsBag, key: &str, property: &'static str) -> Result<RuleOutput> {
    let overflow = if input.truthy(key) { "hidden" } else { "visible" };
    Ok(RuleOutput::single(property, overflow))
}

fn clip(input: &PropsBag) -> Result<RuleOutput> {
    clip_rule(input, "clip", "overflow")
}

fn clip_x(input: &PropsBag) -> Result<RuleOutput> {
    clip_rule(input, "clipX", "overflowX")
}

fn clip_y(input: &PropsBag) -> Result<RuleOutput> {
    clip_rule(input, "clipY", "overflowY")
}

fn transition(input: &PropsBag) -> Result<RuleOutput> {
    let text = match input.get("transition") {
        Some(PropValue::Scalar(Scalar::Number(duration))) => format!("all {}ms", duration),
        Some(PropValue::Scalar(Scalar::Numeric(duration))) => format!("all {}", duration),
        Some(PropValue::Map(durations)) => {
            let mut parts = Vec::new();
            for (prop, duration) in durations {
                match affected_properties(prop) {
                    Some(affected) => {
                        for affected_prop in affected {
                            parts.push(format!("{} {}", affected_prop, duration_text(duration)));
                        }
                    }
                    None => parts.push(format!("{} {}", prop, duration_text(duration))),
                }
            }
            parts.join(",")
        }
        _ => return Ok(RuleOutput::Empty),
    };
    Ok(RuleOutput::single("transition", PropertyValue::Literal(text)))
}

fn duration_text(duration: &Scalar) -> String {
    match duration {
        Scalar::Number(n) => format!("{}", n),
        Scalar::Numeric(v) => v.to_css(false).into_owned(),
        Scalar::Str(s) => s.clone(),
        Scalar::Bool(b) => b.to_string(),
    }
}

/// The concrete CSS properties a panel intent key ends up touching.
fn affected_properties(key: &str) -> Option<&'static [&'static str]> {
    Some(match key {
        "relative" | "absolute" | "fixed" => &["top", "left", "right", "bottom"],
        "round" => &["border-radius"],
        "border" => &["border"],
        "outline" => &["outline"],
        "margin" => &["margin"],
        "padding" => &["padding"],
        "size" => &["width", "height"],
        "width" => &["width"],
        "height" => &["height"],
        "minWidth" => &["min-width"],
        "minHeight" => &["min-height"],
        "maxWidth" => &["max-width"],
        "maxHeight" => &["max-height"],
        "background" => &["background"],
        "transform" => &["transform"],
        "shadow" => &["box-shadow"],
        "elevation" => &["box-shadown"],
        "opacity" => &["opacity"],
        _ => return None,
    })
}
