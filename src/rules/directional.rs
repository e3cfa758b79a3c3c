//! Edge and corner helpers shared by the directional rules.
//!
//! A scalar subject broadcasts to every edge (or corner); a partial map
//! contributes only its present entries. Corners compose in two passes:
//! each edge feeds its two adjacent corners, then explicit corner entries
//! override in a fixed order, so the last-applied spelling wins when an
//! edge and a corner target the same physical corner.

use crate::error::Result;
use crate::props::{CornerValues, EdgeValues, PropValue, Scalar};
use crate::style::{PropertyValue, StyleDescription};

/// Output property names for the four edges.
pub struct EdgeNames {
    pub t: &'static str,
    pub b: &'static str,
    pub l: &'static str,
    pub r: &'static str,
}

/// Output property names for the four corners.
pub struct CornerNames {
    pub tl: &'static str,
    pub tr: &'static str,
    pub bl: &'static str,
    pub br: &'static str,
}

/// Expand a scalar-or-edge-map subject into per-edge declarations.
pub fn directional_rules(
    names: &EdgeNames,
    subject: &PropValue,
    convert: impl Fn(&Scalar) -> Result<PropertyValue>,
) -> Result<StyleDescription> {
    let edges = match subject {
        PropValue::Scalar(s) => EdgeValues::all(s.clone()),
        PropValue::Edges(e) => e.clone(),
        PropValue::Corners(c) => EdgeValues {
            t: c.t.clone(),
            b: c.b.clone(),
            l: c.l.clone(),
            r: c.r.clone(),
        },
        _ => return Ok(StyleDescription::new()),
    };

    let mut out = StyleDescription::new();
    for (name, value) in [
        (names.t, &edges.t),
        (names.b, &edges.b),
        (names.l, &edges.l),
        (names.r, &edges.r),
    ] {
        if let Some(scalar) = value {
            out.insert(name, convert(scalar)?);
        }
    }
    Ok(out)
}

/// Expand a scalar-or-corner-map subject into per-corner declarations.
pub fn diagonal_rules(
    names: &CornerNames,
    subject: &PropValue,
    convert: impl Fn(&Scalar) -> Result<PropertyValue>,
) -> Result<StyleDescription> {
    let corners = match subject {
        PropValue::Scalar(s) => {
            // Broadcast order matches the map path below: tr, tl, br, bl.
            let mut out = StyleDescription::new();
            for name in [names.tr, names.tl, names.br, names.bl] {
                out.insert(name, convert(s)?);
            }
            return Ok(out);
        }
        PropValue::Corners(c) => c.clone(),
        PropValue::Edges(e) => CornerValues {
            t: e.t.clone(),
            b: e.b.clone(),
            l: e.l.clone(),
            r: e.r.clone(),
            ..CornerValues::default()
        },
        _ => return Ok(StyleDescription::new()),
    };

    let mut out = StyleDescription::new();
    // Edges first, each feeding its two adjacent corners.
    let edge_targets: [(&Option<Scalar>, [&'static str; 2]); 4] = [
        (&corners.t, [names.tl, names.tr]),
        (&corners.b, [names.bl, names.br]),
        (&corners.l, [names.tl, names.bl]),
        (&corners.r, [names.tr, names.br]),
    ];
    for (value, targets) in edge_targets {
        if let Some(scalar) = value {
            for name in targets {
                out.insert(name, convert(scalar)?);
            }
        }
    }
    // Explicit corners override; both spellings address the same corner.
    let corner_targets: [(&Option<Scalar>, &'static str); 8] = [
        (&corners.tr, names.tr),
        (&corners.rt, names.tr),
        (&corners.tl, names.tl),
        (&corners.lt, names.tl),
        (&corners.br, names.br),
        (&corners.rb, names.br),
        (&corners.bl, names.bl),
        (&corners.lb, names.bl),
    ];
    for (value, name) in corner_targets {
        if let Some(scalar) = value {
            out.insert(name, convert(scalar)?);
        }
    }
    Ok(out)
}
