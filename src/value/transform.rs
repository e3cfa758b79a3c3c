//! CSS transform components and composite transform values.

use std::fmt;

use crate::error::{Error, Result};

use super::{NumericValue, Unit};

/// A single component of a `transform` list.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformComponent {
    Translate {
        x: NumericValue,
        y: NumericValue,
        z: NumericValue,
        is_2d: bool,
    },
    Rotate {
        x: NumericValue,
        y: NumericValue,
        z: NumericValue,
        angle: NumericValue,
        is_2d: bool,
    },
    Scale {
        x: NumericValue,
        y: NumericValue,
        z: NumericValue,
        is_2d: bool,
    },
    Skew {
        ax: NumericValue,
        ay: NumericValue,
    },
    SkewX {
        ax: NumericValue,
    },
    SkewY {
        ay: NumericValue,
    },
    Perspective {
        length: NumericValue,
    },
    /// A pre-serialized matrix, carried through verbatim.
    Matrix {
        is_2d: bool,
        css_text: String,
    },
}

impl TransformComponent {
    pub fn translate(x: impl Into<NumericValue>, y: impl Into<NumericValue>) -> TransformComponent {
        TransformComponent::Translate {
            x: x.into(),
            y: y.into(),
            z: NumericValue::unit(0.0, Unit::Px),
            is_2d: true,
        }
    }

    pub fn translate_3d(
        x: impl Into<NumericValue>,
        y: impl Into<NumericValue>,
        z: impl Into<NumericValue>,
    ) -> TransformComponent {
        TransformComponent::Translate {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            is_2d: false,
        }
    }

    pub fn rotate(angle: NumericValue) -> TransformComponent {
        TransformComponent::Rotate {
            x: NumericValue::unit(0.0, Unit::Px),
            y: NumericValue::unit(0.0, Unit::Px),
            z: NumericValue::unit(1.0, Unit::Px),
            angle,
            is_2d: true,
        }
    }

    pub fn rotate_3d(
        x: impl Into<NumericValue>,
        y: impl Into<NumericValue>,
        z: impl Into<NumericValue>,
        angle: NumericValue,
    ) -> TransformComponent {
        TransformComponent::Rotate {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            angle,
            is_2d: false,
        }
    }

    pub fn scale(x: impl Into<NumericValue>, y: impl Into<NumericValue>) -> TransformComponent {
        TransformComponent::Scale {
            x: x.into(),
            y: y.into(),
            z: NumericValue::unit(1.0, Unit::Number),
            is_2d: true,
        }
    }

    pub fn scale_3d(
        x: impl Into<NumericValue>,
        y: impl Into<NumericValue>,
        z: impl Into<NumericValue>,
    ) -> TransformComponent {
        TransformComponent::Scale {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            is_2d: false,
        }
    }

    pub fn skew(ax: NumericValue, ay: NumericValue) -> TransformComponent {
        TransformComponent::Skew { ax, ay }
    }

    pub fn skew_x(ax: NumericValue) -> TransformComponent {
        TransformComponent::SkewX { ax }
    }

    pub fn skew_y(ay: NumericValue) -> TransformComponent {
        TransformComponent::SkewY { ay }
    }

    pub fn perspective(length: NumericValue) -> TransformComponent {
        TransformComponent::Perspective { length }
    }

    pub fn matrix(is_2d: bool, css_text: impl Into<String>) -> TransformComponent {
        TransformComponent::Matrix {
            is_2d,
            css_text: css_text.into(),
        }
    }

    pub fn is_2d(&self) -> bool {
        match self {
            TransformComponent::Translate { is_2d, .. }
            | TransformComponent::Rotate { is_2d, .. }
            | TransformComponent::Scale { is_2d, .. }
            | TransformComponent::Matrix { is_2d, .. } => *is_2d,
            TransformComponent::Skew { .. }
            | TransformComponent::SkewX { .. }
            | TransformComponent::SkewY { .. } => true,
            TransformComponent::Perspective { .. } => false,
        }
    }
}

impl fmt::Display for TransformComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformComponent::Translate { x, y, z, is_2d } => {
                if *is_2d {
                    write!(f, "translate({}, {})", x, y)
                } else {
                    write!(f, "translate3d({}, {}, {})", x, y, z)
                }
            }
            // The 2d form lists every argument and the 3d form only the
            // angle; kept as-is for output compatibility.
            TransformComponent::Rotate {
                x,
                y,
                z,
                angle,
                is_2d,
            } => {
                if *is_2d {
                    write!(f, "rotate({}, {}, {}, {})", x, y, z, angle)
                } else {
                    write!(f, "rotate3d({})", angle)
                }
            }
            TransformComponent::Scale { x, y, z, is_2d } => {
                if *is_2d {
                    write!(f, "scale({}, {}, {})", x, y, z)
                } else {
                    write!(f, "scale3d({}, {})", x, y)
                }
            }
            TransformComponent::Skew { ax, ay } => match ay.as_unit_value() {
                Some(u) if u.value == 0.0 => write!(f, "skew({})", ax),
                _ => write!(f, "skew({}, {})", ax, ay),
            },
            TransformComponent::SkewX { ax } => write!(f, "skewX({})", ax),
            TransformComponent::SkewY { ay } => write!(f, "skewY({})", ay),
            TransformComponent::Perspective { length } => write!(f, "perspective({})", length),
            TransformComponent::Matrix { css_text, .. } => f.write_str(css_text),
        }
    }
}

/// An ordered, non-empty list of transform components.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformValue {
    components: Vec<TransformComponent>,
    is_2d: bool,
    css_text: String,
}

impl TransformValue {
    /// Build a transform list. An empty list is a construction error.
    pub fn new(components: Vec<TransformComponent>) -> Result<TransformValue> {
        if components.is_empty() {
            return Err(Error::Construction("a transform needs at least one component"));
        }
        let is_2d = components.iter().all(TransformComponent::is_2d);
        let css_text = components
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(TransformValue {
            components,
            is_2d,
            css_text,
        })
    }

    pub fn components(&self) -> &[TransformComponent] {
        &self.components
    }

    pub fn is_2d(&self) -> bool {
        self.is_2d
    }

    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

impl fmt::Display for TransformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text)
    }
}

/// An `x y` position pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionValue {
    pub x: NumericValue,
    pub y: NumericValue,
    css_text: String,
}

impl PositionValue {
    pub fn new(x: NumericValue, y: NumericValue) -> PositionValue {
        let css_text = format!("{} {}", x, y);
        PositionValue { x, y, css_text }
    }

    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

impl fmt::Display for PositionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{deg, number, percent, px};

    #[test]
    fn translate_renders_2d_and_3d() {
        let t = TransformComponent::translate(px(10.0), percent(50.0));
        assert_eq!(t.to_string(), "translate(10px, 50%)");
        let t = TransformComponent::translate_3d(px(10.0), px(20.0), px(30.0));
        assert_eq!(t.to_string(), "translate3d(10px, 20px, 30px)");
    }

    #[test]
    fn rotate_argument_shapes() {
        let r = TransformComponent::rotate(deg(45.0));
        assert_eq!(r.to_string(), "rotate(0, 0, 1px, 45deg)");
        let r = TransformComponent::rotate_3d(number(1.0), number(0.0), number(0.0), deg(45.0));
        assert_eq!(r.to_string(), "rotate3d(45deg)");
    }

    #[test]
    fn skew_drops_zero_ay() {
        let s = TransformComponent::skew(deg(10.0), deg(0.0));
        assert_eq!(s.to_string(), "skew(10deg)");
        let s = TransformComponent::skew(deg(10.0), deg(5.0));
        assert_eq!(s.to_string(), "skew(10deg, 5deg)");
    }

    #[test]
    fn transform_value_joins_components() {
        let t = TransformValue::new(vec![
            TransformComponent::translate(px(1.0), px(2.0)),
            TransformComponent::scale(number(2.0), number(2.0)),
        ])
        .unwrap();
        assert_eq!(t.to_string(), "translate(1px, 2px) scale(2, 2, 1)");
        assert!(t.is_2d());
    }

    #[test]
    fn empty_transform_fails() {
        assert!(matches!(
            TransformValue::new(vec![]),
            Err(Error::Construction(_))
        ));
    }

    #[test]
    fn perspective_is_3d() {
        let t = TransformValue::new(vec![TransformComponent::perspective(px(100.0))]).unwrap();
        assert!(!t.is_2d());
        assert_eq!(t.to_string(), "perspective(100px)");
    }

    #[test]
    fn position_value() {
        let p = PositionValue::new(percent(50.0), px(10.0));
        assert_eq!(p.to_string(), "50% 10px");
    }
}
