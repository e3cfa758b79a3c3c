//! CSS unit tags, unit categories, and the unit conversion table.

use std::fmt;

use crate::error::{Error, Result};

/// A CSS unit tag. The set is closed; `Number` marks a unitless value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Number,
    Percent,
    Em,
    Ex,
    Ch,
    Rem,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Cm,
    Mm,
    Q,
    In,
    Pc,
    Pt,
    Px,
    Turn,
    Rad,
    Grad,
    Deg,
    S,
    Ms,
    Hz,
    Khz,
    Dppx,
    X,
    Dpcm,
    Dpi,
    Fr,
}

/// The category a unit measures (spec-level base type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Flex,
    Percent,
}

/// Category vector of a numeric value. Informational only: arithmetic is
/// not gated on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericType {
    pub length: i8,
    pub angle: i8,
    pub time: i8,
    pub frequency: i8,
    pub resolution: i8,
    pub flex: i8,
    pub percent: i8,
}

impl NumericType {
    pub const EMPTY: NumericType = NumericType {
        length: 0,
        angle: 0,
        time: 0,
        frequency: 0,
        resolution: 0,
        flex: 0,
        percent: 0,
    };

    pub fn of(base: BaseType) -> NumericType {
        let mut t = NumericType::EMPTY;
        match base {
            BaseType::Length => t.length = 1,
            BaseType::Angle => t.angle = 1,
            BaseType::Time => t.time = 1,
            BaseType::Frequency => t.frequency = 1,
            BaseType::Resolution => t.resolution = 1,
            BaseType::Flex => t.flex = 1,
            BaseType::Percent => t.percent = 1,
        }
        t
    }
}

impl Unit {
    /// The unit tag as written in CSS source (`percent` is spelled `%` only
    /// when rendered as a suffix, see [`Unit::suffix`]).
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Number => "number",
            Unit::Percent => "percent",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Ch => "ch",
            Unit::Rem => "rem",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Q => "Q",
            Unit::In => "in",
            Unit::Pc => "pc",
            Unit::Pt => "pt",
            Unit::Px => "px",
            Unit::Turn => "turn",
            Unit::Rad => "rad",
            Unit::Grad => "grad",
            Unit::Deg => "deg",
            Unit::S => "s",
            Unit::Ms => "ms",
            Unit::Hz => "hz",
            Unit::Khz => "khz",
            Unit::Dppx => "dppx",
            Unit::X => "x",
            Unit::Dpcm => "dpcm",
            Unit::Dpi => "dpi",
            Unit::Fr => "fr",
        }
    }

    /// The suffix appended to a rendered value. Unitless and `fr` values
    /// render bare, percent renders `%`, everything else the tag verbatim.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Number | Unit::Fr => "",
            Unit::Percent => "%",
            other => other.as_str(),
        }
    }

    /// Look up a unit tag parsed from CSS source. `%` maps to `Percent`.
    pub fn from_tag(tag: &str) -> Option<Unit> {
        Some(match tag {
            "number" => Unit::Number,
            "percent" | "%" => Unit::Percent,
            "em" => Unit::Em,
            "ex" => Unit::Ex,
            "ch" => Unit::Ch,
            "rem" => Unit::Rem,
            "vw" => Unit::Vw,
            "vh" => Unit::Vh,
            "vmin" => Unit::Vmin,
            "vmax" => Unit::Vmax,
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            "Q" => Unit::Q,
            "in" => Unit::In,
            "pc" => Unit::Pc,
            "pt" => Unit::Pt,
            "px" => Unit::Px,
            "turn" => Unit::Turn,
            "rad" => Unit::Rad,
            "grad" => Unit::Grad,
            "deg" => Unit::Deg,
            "s" => Unit::S,
            "ms" => Unit::Ms,
            "hz" => Unit::Hz,
            "khz" => Unit::Khz,
            "dppx" => Unit::Dppx,
            "x" => Unit::X,
            "dpcm" => Unit::Dpcm,
            "dpi" => Unit::Dpi,
            "fr" => Unit::Fr,
            _ => return None,
        })
    }

    /// The category this unit measures; `None` for unitless numbers.
    pub fn base_type(self) -> Option<BaseType> {
        match self {
            Unit::Number => None,
            Unit::Percent => Some(BaseType::Percent),
            Unit::Em
            | Unit::Ex
            | Unit::Ch
            | Unit::Rem
            | Unit::Vw
            | Unit::Vh
            | Unit::Vmin
            | Unit::Vmax
            | Unit::Cm
            | Unit::Mm
            | Unit::Q
            | Unit::In
            | Unit::Pc
            | Unit::Pt
            | Unit::Px => Some(BaseType::Length),
            Unit::Turn | Unit::Rad | Unit::Grad | Unit::Deg => Some(BaseType::Angle),
            Unit::S | Unit::Ms => Some(BaseType::Time),
            Unit::Hz | Unit::Khz => Some(BaseType::Frequency),
            Unit::Dppx | Unit::X | Unit::Dpcm | Unit::Dpi => Some(BaseType::Resolution),
            Unit::Fr => Some(BaseType::Flex),
        }
    }

    /// Category vector for this unit.
    pub fn numeric_type(self) -> NumericType {
        self.base_type().map_or(NumericType::EMPTY, NumericType::of)
    }

    /// Convert a value carried in this unit into `to`.
    ///
    /// Only the fixed table below is defined; any other pair fails with
    /// [`Error::UnsupportedConversion`], including same-unit pairs outside
    /// the table. A unitless number projects into any unit unchanged.
    pub(crate) fn convert(self, value: f64, to: Unit) -> Result<f64> {
        match (self, to) {
            (Unit::Number, _) => Ok(value),
            (Unit::Cm, Unit::In) => Ok(value / 2.54),
            (Unit::Cm, Unit::Mm) => Ok(value * 10.0),
            (Unit::Mm, Unit::In) => Ok(value / 0.254),
            (Unit::Mm, Unit::Cm) => Ok(value / 10.0),
            (Unit::In, Unit::Cm) => Ok(value * 2.54),
            (Unit::In, Unit::Mm) => Ok(value * 25.4),
            (Unit::S, Unit::Ms) => Ok(value * 1000.0),
            // ms has no path back to s; its only defined conversion
            // rescales in place.
            (Unit::Ms, Unit::Ms) => Ok(value / 1000.0),
            (Unit::Hz, Unit::Khz) => Ok(value / 1000.0),
            (Unit::Khz, Unit::Hz) => Ok(value * 1000.0),
            _ => Err(Error::UnsupportedConversion { from: self, to }),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_shapes() {
        assert_eq!(Unit::Number.suffix(), "");
        assert_eq!(Unit::Fr.suffix(), "");
        assert_eq!(Unit::Percent.suffix(), "%");
        assert_eq!(Unit::Px.suffix(), "px");
        assert_eq!(Unit::Q.suffix(), "Q");
    }

    #[test]
    fn number_projects_into_anything() {
        assert_eq!(Unit::Number.convert(4.0, Unit::Px).unwrap(), 4.0);
        assert_eq!(Unit::Number.convert(4.0, Unit::Khz).unwrap(), 4.0);
    }

    #[test]
    fn defined_conversions() {
        assert_eq!(Unit::Cm.convert(1.0, Unit::Mm).unwrap(), 10.0);
        assert_eq!(Unit::Cm.convert(2.54, Unit::In).unwrap(), 1.0);
        assert_eq!(Unit::In.convert(1.0, Unit::Cm).unwrap(), 2.54);
        assert_eq!(Unit::In.convert(1.0, Unit::Mm).unwrap(), 25.4);
        assert_eq!(Unit::Mm.convert(10.0, Unit::Cm).unwrap(), 1.0);
        assert_eq!(Unit::S.convert(2.0, Unit::Ms).unwrap(), 2000.0);
        assert_eq!(Unit::Hz.convert(1500.0, Unit::Khz).unwrap(), 1.5);
        assert_eq!(Unit::Khz.convert(1.5, Unit::Hz).unwrap(), 1500.0);
    }

    #[test]
    fn undefined_pairs_fail() {
        for (from, to) in [
            (Unit::Px, Unit::Cm),
            (Unit::Ms, Unit::S),
            (Unit::Cm, Unit::Cm),
            (Unit::Deg, Unit::Rad),
            (Unit::Percent, Unit::Number),
        ] {
            assert_eq!(
                from.convert(1.0, to),
                Err(Error::UnsupportedConversion { from, to })
            );
        }
    }

    #[test]
    fn categories() {
        assert_eq!(Unit::Px.base_type(), Some(BaseType::Length));
        assert_eq!(Unit::Deg.base_type(), Some(BaseType::Angle));
        assert_eq!(Unit::Number.base_type(), None);
        assert_eq!(Unit::Number.numeric_type(), NumericType::EMPTY);
        assert_eq!(Unit::Fr.numeric_type().flex, 1);
    }
}
