//! JSON decoding of props bags for the CLI and WASM surfaces.
//!
//! JSON has no typed CSS values, so shapes are inferred: objects whose keys
//! are all edge/corner abbreviations become edge/corner maps, `x`/`y`(/`z`)
//! objects become vectors, the `text` key nests a bag, and any other object
//! becomes an ordered name -> scalar map.

use indexmap::IndexMap;

use serde_json::Value;

use crate::props::{CornerValues, EdgeValues, PropValue, PropsBag, Scalar, Vector3};

const EDGE_KEYS: [&str; 4] = ["t", "b", "l", "r"];
const CORNER_KEYS: [&str; 8] = ["tl", "tr", "bl", "br", "lt", "rt", "lb", "rb"];

/// Decode a JSON object into a props bag. Non-object input is an error.
pub fn props_from_json(value: &Value) -> Result<PropsBag, String> {
    let Value::Object(object) = value else {
        return Err("props must be a JSON object".to_string());
    };
    let mut bag = PropsBag::new();
    for (key, value) in object {
        bag.insert(key.clone(), prop_value_from_json(key, value)?);
    }
    Ok(bag)
}

fn prop_value_from_json(key: &str, value: &Value) -> Result<PropValue, String> {
    match value {
        Value::Null => Ok(PropValue::Null),
        Value::Bool(b) => Ok(PropValue::from(*b)),
        Value::Number(n) => Ok(PropValue::from(number_scalar(n)?)),
        Value::String(s) => Ok(PropValue::from(s.as_str())),
        Value::Array(_) => Err(format!("key {key:?}: arrays are not supported in JSON props")),
        Value::Object(object) => {
            if key == "text" {
                return props_from_json(value).map(PropValue::Bag);
            }
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            if keys.iter().all(|k| EDGE_KEYS.contains(k)) {
                return edges_from_json(object).map(PropValue::Edges);
            }
            if keys
                .iter()
                .all(|k| EDGE_KEYS.contains(k) || CORNER_KEYS.contains(k))
            {
                return corners_from_json(object).map(PropValue::Corners);
            }
            if object.contains_key("x") && object.contains_key("y") {
                return vector_from_json(object);
            }
            let mut map = IndexMap::new();
            for (name, argument) in object {
                map.insert(name.clone(), scalar_from_json(name, argument)?);
            }
            Ok(PropValue::Map(map))
        }
    }
}

fn number_scalar(n: &serde_json::Number) -> Result<Scalar, String> {
    n.as_f64()
        .map(Scalar::Number)
        .ok_or_else(|| format!("unrepresentable number {n}"))
}

fn scalar_from_json(key: &str, value: &Value) -> Result<Scalar, String> {
    match value {
        Value::Bool(b) => Ok(Scalar::Bool(*b)),
        Value::Number(n) => number_scalar(n),
        Value::String(s) => Ok(Scalar::Str(s.clone())),
        other => Err(format!("key {key:?}: expected a scalar, got {other}")),
    }
}

fn opt_scalar(object: &serde_json::Map<String, Value>, key: &str) -> Result<Option<Scalar>, String> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_from_json(key, value).map(Some),
    }
}

fn edges_from_json(object: &serde_json::Map<String, Value>) -> Result<EdgeValues, String> {
    Ok(EdgeValues {
        t: opt_scalar(object, "t")?,
        b: opt_scalar(object, "b")?,
        l: opt_scalar(object, "l")?,
        r: opt_scalar(object, "r")?,
    })
}

fn corners_from_json(object: &serde_json::Map<String, Value>) -> Result<CornerValues, String> {
    Ok(CornerValues {
        t: opt_scalar(object, "t")?,
        b: opt_scalar(object, "b")?,
        l: opt_scalar(object, "l")?,
        r: opt_scalar(object, "r")?,
        tl: opt_scalar(object, "tl")?,
        tr: opt_scalar(object, "tr")?,
        bl: opt_scalar(object, "bl")?,
        br: opt_scalar(object, "br")?,
        lt: opt_scalar(object, "lt")?,
        rt: opt_scalar(object, "rt")?,
        lb: opt_scalar(object, "lb")?,
        rb: opt_scalar(object, "rb")?,
    })
}

fn vector_from_json(object: &serde_json::Map<String, Value>) -> Result<PropValue, String> {
    let x = opt_scalar(object, "x")?.ok_or("vector needs x")?;
    let y = opt_scalar(object, "y")?.ok_or("vector needs y")?;
    let mut vector = Vector3::new(x, y);
    if let Some(z) = opt_scalar(object, "z")? {
        vector = vector.with_z(z);
    }
    Ok(PropValue::Vector(vector))
}
