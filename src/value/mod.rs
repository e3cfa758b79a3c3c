//! Typed CSS numeric values and `calc()` expression trees.
//!
//! A [`NumericValue`] is either a single [`UnitValue`] or a math expression
//! over other numeric values (sum, product, min, max, negation, inversion).
//! Every node renders to canonical CSS source text exactly once, at
//! construction; arithmetic never mutates, it builds new values.
//!
//! Unit-value arithmetic folds numerically when every operand is unitless;
//! anything else falls back to building an expression node so that no unit
//! is ever silently coerced.

use std::borrow::Cow;
use std::fmt;

use cssparser::{Parser, ParserInput, Token};

use crate::error::{Error, Result};

mod reference;
mod transform;
mod unit;

pub use reference::{UnparsedSegment, UnparsedValue, UrlValue, VariableReference};
pub use transform::{PositionValue, TransformComponent, TransformValue};
pub use unit::{BaseType, NumericType, Unit};

/// A single CSS number with a unit tag.
///
/// A zero value renders as the literal `0` regardless of unit; otherwise the
/// value renders with the unit's suffix (`number` and `fr` render bare,
/// `percent` renders `%`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    pub value: f64,
    pub unit: Unit,
    css_text: String,
}

impl UnitValue {
    pub fn new(value: f64, unit: Unit) -> UnitValue {
        let css_text = if value == 0.0 {
            "0".to_string()
        } else {
            format!("{}{}", value, unit.suffix())
        };
        UnitValue {
            value,
            unit,
            css_text,
        }
    }

    /// Canonical CSS source text, built at construction.
    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text)
    }
}

/// A typed CSS numeric value: a unit value or a math expression over them.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValue {
    Unit(UnitValue),
    Sum {
        values: Vec<NumericValue>,
        css_text: String,
    },
    Product {
        values: Vec<NumericValue>,
        css_text: String,
    },
    Min {
        values: Vec<NumericValue>,
        css_text: String,
    },
    Max {
        values: Vec<NumericValue>,
        css_text: String,
    },
    Negate {
        value: Box<NumericValue>,
        css_text: String,
    },
    Invert {
        value: Box<NumericValue>,
        css_text: String,
    },
}

impl From<UnitValue> for NumericValue {
    fn from(value: UnitValue) -> NumericValue {
        NumericValue::Unit(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> NumericValue {
        NumericValue::Unit(UnitValue::new(value, Unit::Number))
    }
}

impl From<f32> for NumericValue {
    fn from(value: f32) -> NumericValue {
        NumericValue::from(value as f64)
    }
}

impl From<i32> for NumericValue {
    fn from(value: i32) -> NumericValue {
        NumericValue::from(value as f64)
    }
}

impl NumericValue {
    /// Build a unit value.
    pub fn unit(value: f64, unit: Unit) -> NumericValue {
        UnitValue::new(value, unit).into()
    }

    /// Build a sum node. Zero operands is a construction error.
    pub fn sum(values: Vec<NumericValue>) -> Result<NumericValue> {
        require_operands(&values)?;
        Ok(new_sum(values))
    }

    /// Build a product node. Zero operands is a construction error.
    pub fn product(values: Vec<NumericValue>) -> Result<NumericValue> {
        require_operands(&values)?;
        Ok(new_product(values))
    }

    /// Build a `min()` node. Zero operands is a construction error.
    pub fn min_of(values: Vec<NumericValue>) -> Result<NumericValue> {
        require_operands(&values)?;
        Ok(new_min(values))
    }

    /// Build a `max()` node. Zero operands is a construction error.
    pub fn max_of(values: Vec<NumericValue>) -> Result<NumericValue> {
        require_operands(&values)?;
        Ok(new_max(values))
    }

    /// Wrap a value in a negation.
    pub fn negate(value: NumericValue) -> NumericValue {
        let css_text = format!("-{}", value.to_css(false));
        NumericValue::Negate {
            value: Box::new(value),
            css_text,
        }
    }

    /// Wrap a value in an inversion (`1 / x`).
    pub fn invert(value: NumericValue) -> NumericValue {
        let css_text = format!("1 / {}", value.to_css(true));
        NumericValue::Invert {
            value: Box::new(value),
            css_text,
        }
    }

    /// Parse a leading numeric literal with an optional unit or `%` suffix.
    ///
    /// Trailing input after the literal is ignored. Anything that does not
    /// start with a number, or carries an unknown unit tag, fails with
    /// [`Error::Parse`].
    pub fn parse(text: &str) -> Result<NumericValue> {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let start = parser.position();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Err(Error::Parse(text.to_string())),
        };
        // Re-read the value from the source slice: the token only carries
        // an f32, and decimal text like "2.54" must survive exactly.
        let slice = parser.slice_from(start).trim_start();
        match token {
            Token::Dimension { value, ref unit, .. } => {
                let tag = Unit::from_tag(unit.as_ref()).ok_or_else(|| Error::Parse(text.to_string()))?;
                let number = &slice[..slice.len() - unit.as_ref().len()];
                let value = number.parse::<f64>().unwrap_or(value as f64);
                Ok(NumericValue::unit(value, tag))
            }
            Token::Percentage { unit_value, .. } => {
                let number = slice.strip_suffix('%').unwrap_or(slice);
                let value = number.parse::<f64>().unwrap_or(unit_value as f64 * 100.0);
                Ok(NumericValue::unit(value, Unit::Percent))
            }
            Token::Number { value, .. } => {
                let value = slice.parse::<f64>().unwrap_or(value as f64);
                Ok(NumericValue::unit(value, Unit::Number))
            }
            _ => Err(Error::Parse(text.to_string())),
        }
    }

    /// Canonical CSS source text of this node, built at construction.
    pub fn css_text(&self) -> &str {
        match self {
            NumericValue::Unit(unit) => unit.css_text(),
            NumericValue::Sum { css_text, .. }
            | NumericValue::Product { css_text, .. }
            | NumericValue::Min { css_text, .. }
            | NumericValue::Max { css_text, .. }
            | NumericValue::Negate { css_text, .. }
            | NumericValue::Invert { css_text, .. } => css_text,
        }
    }

    /// Render as CSS. Non-nested math expressions are wrapped in `calc( )`;
    /// unit values and negations always render their source text.
    pub fn to_css(&self, nested: bool) -> Cow<'_, str> {
        match self {
            NumericValue::Unit(_) | NumericValue::Negate { .. } => Cow::Borrowed(self.css_text()),
            _ if nested => Cow::Borrowed(self.css_text()),
            _ => Cow::Owned(format!("calc( {} )", self.css_text())),
        }
    }

    /// Category vector. Unit values report their unit's category; math
    /// expressions report the empty vector.
    pub fn numeric_type(&self) -> NumericType {
        match self {
            NumericValue::Unit(unit) => unit.unit.numeric_type(),
            _ => NumericType::EMPTY,
        }
    }

    /// The underlying unit value, when this node is one.
    pub fn as_unit_value(&self) -> Option<&UnitValue> {
        match self {
            NumericValue::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    /// Project this value into `unit`.
    ///
    /// Unitless numbers always succeed; unit values use the fixed conversion
    /// table; negations and inversions recurse; a multi-operand math value
    /// cannot pick a unit and fails with [`Error::AmbiguousCast`].
    pub fn to(&self, unit: Unit) -> Result<NumericValue> {
        match self {
            NumericValue::Unit(u) => {
                let value = u.unit.convert(u.value, unit)?;
                Ok(NumericValue::unit(value, unit))
            }
            NumericValue::Negate { value, .. } => Ok(NumericValue::negate(value.to(unit)?)),
            NumericValue::Invert { value, .. } => Ok(NumericValue::invert(value.to(unit)?)),
            NumericValue::Sum { values, .. }
            | NumericValue::Product { values, .. }
            | NumericValue::Min { values, .. }
            | NumericValue::Max { values, .. } => match values.as_slice() {
                [] => Ok(NumericValue::unit(0.0, unit)),
                [single] => single.to(unit),
                many => Err(Error::AmbiguousCast(many.len())),
            },
        }
    }

    /// Add the operands to this value.
    ///
    /// Folds numerically when this is a unit value and every operand is
    /// unitless; otherwise builds a sum node from the operands (splicing the
    /// members of any `min()` operand into the list).
    pub fn add<I>(&self, values: I) -> NumericValue
    where
        I: IntoIterator,
        I::Item: Into<NumericValue>,
    {
        let values = collect(values);
        if values.is_empty() {
            return self.clone();
        }
        if let Some(folded) = self.fold_with(&values, |r, i| r + i) {
            return folded;
        }
        new_sum(splice_min(values))
    }

    /// Subtract the operands from this value.
    ///
    /// Operands are mapped before delegating to [`NumericValue::add`]:
    /// negations unwrap, unit values negate in place, everything else is
    /// wrapped in a negation (so sums render `a - b` rather than `a + -b`).
    pub fn sub<I>(&self, values: I) -> NumericValue
    where
        I: IntoIterator,
        I::Item: Into<NumericValue>,
    {
        let values = collect(values);
        if values.is_empty() {
            return self.clone();
        }
        if let Some(folded) = self.fold_with(&values, |r, i| r - i) {
            return folded;
        }
        let negated: Vec<NumericValue> = values
            .into_iter()
            .map(|v| match v {
                NumericValue::Negate { value, .. } => *value,
                NumericValue::Unit(u) => NumericValue::unit(-u.value, u.unit),
                other => NumericValue::negate(other),
            })
            .collect();
        self.add(negated)
    }

    /// Multiply this value by the operands.
    pub fn mul<I>(&self, values: I) -> NumericValue
    where
        I: IntoIterator,
        I::Item: Into<NumericValue>,
    {
        let values = collect(values);
        if values.is_empty() {
            return self.clone();
        }
        if let Some(folded) = self.fold_with(&values, |r, i| r * i) {
            return folded;
        }
        new_product(splice_min(values))
    }

    /// Divide this value by the operands.
    ///
    /// Operands are mapped before delegating to [`NumericValue::mul`]:
    /// inversions unwrap, unit values negate in place (a long-standing quirk
    /// of this algebra, kept for output compatibility), everything else is
    /// wrapped in an inversion.
    pub fn div<I>(&self, values: I) -> NumericValue
    where
        I: IntoIterator,
        I::Item: Into<NumericValue>,
    {
        let values = collect(values);
        if values.is_empty() {
            return self.clone();
        }
        if let Some(folded) = self.fold_with(&values, |r, i| r / i) {
            return folded;
        }
        let inverted: Vec<NumericValue> = values
            .into_iter()
            .map(|v| match v {
                NumericValue::Invert { value, .. } => *value,
                NumericValue::Unit(u) => NumericValue::unit(-u.value, u.unit),
                other => NumericValue::invert(other),
            })
            .collect();
        self.mul(inverted)
    }

    /// Build a `min()` over the operands. Never folds numerically.
    pub fn min<I>(&self, values: I) -> NumericValue
    where
        I: IntoIterator,
        I::Item: Into<NumericValue>,
    {
        let values = collect(values);
        if values.is_empty() {
            return self.clone();
        }
        new_min(splice_min(values))
    }

    /// Build a `max()` over the operands. Never folds numerically.
    ///
    /// Note: only `min()` operands are spliced, `max()` operands nest.
    pub fn max<I>(&self, values: I) -> NumericValue
    where
        I: IntoIterator,
        I::Item: Into<NumericValue>,
    {
        let values = collect(values);
        if values.is_empty() {
            return self.clone();
        }
        new_max(splice_min(values))
    }

    /// Numeric fold for unit-value receivers when every operand is a plain
    /// unitless number. Returns `None` when the fallback expression path
    /// must be taken.
    fn fold_with(&self, values: &[NumericValue], op: impl Fn(f64, f64) -> f64) -> Option<NumericValue> {
        let receiver = self.as_unit_value()?;
        let mut acc = receiver.value;
        for v in values {
            match v {
                NumericValue::Unit(u) if u.unit == Unit::Number => acc = op(acc, u.value),
                _ => return None,
            }
        }
        Some(NumericValue::unit(acc, receiver.unit))
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css(false))
    }
}

fn require_operands(values: &[NumericValue]) -> Result<()> {
    if values.is_empty() {
        Err(Error::Construction("a math value needs at least one operand"))
    } else {
        Ok(())
    }
}

fn collect<I>(values: I) -> Vec<NumericValue>
where
    I: IntoIterator,
    I::Item: Into<NumericValue>,
{
    values.into_iter().map(Into::into).collect()
}

/// Splice the member list of every `min()` operand into the output;
/// `max()` operands are deliberately left intact.
fn splice_min(values: Vec<NumericValue>) -> Vec<NumericValue> {
    let mut out = Vec::with_capacity(values.len());
    for v in values {
        match v {
            NumericValue::Min { values, .. } => out.extend(values),
            other => out.push(other),
        }
    }
    out
}

fn new_sum(values: Vec<NumericValue>) -> NumericValue {
    let mut css_text = String::new();
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            css_text.push_str(&v.to_css(true));
        } else if let NumericValue::Negate { value, .. } = v {
            css_text.push_str(" - ");
            css_text.push_str(&value.to_css(true));
        } else {
            css_text.push_str(" + ");
            css_text.push_str(&v.to_css(true));
        }
    }
    NumericValue::Sum { values, css_text }
}

fn new_product(values: Vec<NumericValue>) -> NumericValue {
    let mut css_text = String::new();
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            css_text.push_str(&v.to_css(true));
        } else if let NumericValue::Invert { value, .. } = v {
            css_text.push_str(" / ");
            css_text.push_str(&value.to_css(true));
        } else {
            css_text.push_str(" * ");
            css_text.push_str(&v.to_css(true));
        }
    }
    NumericValue::Product { values, css_text }
}

fn new_min(values: Vec<NumericValue>) -> NumericValue {
    let css_text = format!("min( {} )", join_nested(&values));
    NumericValue::Min { values, css_text }
}

fn new_max(values: Vec<NumericValue>) -> NumericValue {
    let css_text = format!("max( {} )", join_nested(&values));
    NumericValue::Max { values, css_text }
}

fn join_nested(values: &[NumericValue]) -> String {
    values
        .iter()
        .map(|v| v.to_css(true).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

macro_rules! unit_helpers {
    ($($(#[$meta:meta])* $name:ident => $unit:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(value: f64) -> NumericValue {
                NumericValue::unit(value, Unit::$unit)
            }
        )*
    };
}

unit_helpers! {
    /// A unitless number.
    number => Number,
    /// A percentage (`%`).
    percent => Percent,
    em => Em,
    ex => Ex,
    ch => Ch,
    rem => Rem,
    vw => Vw,
    vh => Vh,
    vmin => Vmin,
    vmax => Vmax,
    cm => Cm,
    mm => Mm,
    q => Q,
    /// An inch value (`in` is a Rust keyword).
    inch => In,
    pc => Pc,
    pt => Pt,
    px => Px,
    turn => Turn,
    rad => Rad,
    grad => Grad,
    deg => Deg,
    s => S,
    ms => Ms,
    hz => Hz,
    khz => Khz,
    dppx => Dppx,
    x => X,
    dpcm => Dpcm,
    dpi => Dpi,
    fr => Fr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_renders_bare() {
        assert_eq!(px(0.0).to_string(), "0");
        assert_eq!(percent(0.0).to_string(), "0");
        assert_eq!(s(0.0).to_string(), "0");
    }

    #[test]
    fn unit_suffixes() {
        assert_eq!(px(12.0).to_string(), "12px");
        assert_eq!(percent(50.0).to_string(), "50%");
        assert_eq!(number(1.5).to_string(), "1.5");
        assert_eq!(fr(2.0).to_string(), "2");
        assert_eq!(q(4.0).to_string(), "4Q");
    }

    #[test]
    fn unitless_arithmetic_folds() {
        let a = number(10.0);
        assert_eq!(a.add([5.0]).to_string(), "15");
        assert_eq!(a.add([5.0]).sub([5.0]).to_string(), "10");
        assert_eq!(px(10.0).mul([2.0, 3.0]).to_string(), "60px");
        assert_eq!(px(10.0).div([4.0]).to_string(), "2.5px");
    }

    #[test]
    fn mixed_units_build_expressions() {
        let sum = px(10.0).add([percent(50.0)]);
        assert_eq!(sum.css_text(), "50%");
        assert!(matches!(sum, NumericValue::Sum { .. }));
    }

    // The expression fallback builds the node from the operands alone; the
    // receiver only participates in the numeric fold. Kept verbatim.
    #[test]
    fn math_fallback_excludes_receiver() {
        let sum = px(10.0).add([em(2.0), px(1.0)]);
        assert_eq!(sum.to_string(), "calc( 2em + 1px )");
    }

    #[test]
    fn sum_renders_negates_as_subtraction() {
        let sum = NumericValue::sum(vec![px(10.0), NumericValue::negate(em(2.0))]).unwrap();
        assert_eq!(sum.css_text(), "10px - 2em");
        assert_eq!(sum.to_string(), "calc( 10px - 2em )");
    }

    #[test]
    fn product_renders_inverts_as_division() {
        let product =
            NumericValue::product(vec![px(10.0), NumericValue::invert(number(4.0))]).unwrap();
        assert_eq!(product.css_text(), "10px / 4");
    }

    #[test]
    fn sub_negates_unit_operands_in_place() {
        let diff = px(10.0).sub([em(2.0)]);
        // The mapped operand is -2em, rendered as an addition head.
        assert_eq!(diff.css_text(), "-2em");
    }

    // `div` maps unit operands to their negation, not their inversion.
    // Long-standing quirk, kept for output compatibility.
    #[test]
    fn div_negates_unit_operands() {
        let quotient = px(10.0).div([em(2.0)]);
        assert_eq!(quotient.css_text(), "-2em");
        assert!(matches!(quotient, NumericValue::Product { .. }));
    }

    #[test]
    fn min_members_splice_into_arithmetic() {
        let m = NumericValue::min_of(vec![px(1.0), px(2.0)]).unwrap();
        let sum = number(0.0).add([m, px(3.0)]);
        assert_eq!(sum.css_text(), "1px + 2px + 3px");
    }

    // Only min() operands are spliced; max() operands nest, even inside max().
    #[test]
    fn max_members_never_splice() {
        let m = NumericValue::max_of(vec![px(1.0), px(2.0)]).unwrap();
        let outer = px(0.5).max([m.clone()]);
        assert_eq!(outer.css_text(), "max( max( 1px, 2px ) )");
        let sum = px(0.5).add([m]);
        assert_eq!(sum.css_text(), "max( 1px, 2px )");
    }

    #[test]
    fn negate_wraps_non_nested_rendering() {
        let sum = NumericValue::sum(vec![px(1.0), px(2.0)]).unwrap();
        let negated = NumericValue::negate(sum);
        assert_eq!(negated.to_string(), "-calc( 1px + 2px )");
    }

    #[test]
    fn invert_renders_reciprocal() {
        let inverted = NumericValue::invert(px(4.0));
        assert_eq!(inverted.css_text(), "1 / 4px");
        assert_eq!(inverted.to_string(), "calc( 1 / 4px )");
    }

    #[test]
    fn empty_operands_return_self() {
        let a = px(10.0);
        assert_eq!(a.add(Vec::<NumericValue>::new()), a);
        assert_eq!(a.min(Vec::<NumericValue>::new()), a);
    }

    #[test]
    fn zero_operand_construction_fails() {
        assert!(matches!(
            NumericValue::sum(vec![]),
            Err(Error::Construction(_))
        ));
        assert!(matches!(
            NumericValue::max_of(vec![]),
            Err(Error::Construction(_))
        ));
    }

    #[test]
    fn conversions() {
        let v = cm(1.0).to(Unit::Mm).unwrap();
        assert_eq!(v.as_unit_value().unwrap().value, 10.0);
        assert_eq!(v.as_unit_value().unwrap().unit, Unit::Mm);

        let v = cm(2.54).to(Unit::In).unwrap();
        assert_eq!(v.as_unit_value().unwrap().value, 1.0);

        let v = number(3.0).to(Unit::Px).unwrap();
        assert_eq!(v.to_string(), "3px");

        assert_eq!(
            px(1.0).to(Unit::Cm),
            Err(Error::UnsupportedConversion {
                from: Unit::Px,
                to: Unit::Cm
            })
        );
    }

    #[test]
    fn structural_casts() {
        let single = NumericValue::sum(vec![number(2.0)]).unwrap();
        assert_eq!(single.to(Unit::Px).unwrap().to_string(), "2px");

        let many = NumericValue::sum(vec![px(1.0), em(1.0)]).unwrap();
        assert_eq!(many.to(Unit::Px), Err(Error::AmbiguousCast(2)));

        let negated = NumericValue::negate(number(2.0));
        assert_eq!(negated.to(Unit::Px).unwrap().to_string(), "-2px");
    }

    #[test]
    fn parse_literals() {
        let v = NumericValue::parse("10px").unwrap();
        let u = v.as_unit_value().unwrap();
        assert_eq!((u.value, u.unit), (10.0, Unit::Px));

        let v = NumericValue::parse("2.54cm").unwrap();
        assert_eq!(v.as_unit_value().unwrap().value, 2.54);

        let v = NumericValue::parse("50%").unwrap();
        let u = v.as_unit_value().unwrap();
        assert_eq!((u.value, u.unit), (50.0, Unit::Percent));

        let v = NumericValue::parse("1.5").unwrap();
        let u = v.as_unit_value().unwrap();
        assert_eq!((u.value, u.unit), (1.5, Unit::Number));
    }

    #[test]
    fn parse_failures() {
        assert!(matches!(NumericValue::parse("abc"), Err(Error::Parse(_))));
        assert!(matches!(NumericValue::parse(""), Err(Error::Parse(_))));
        assert!(matches!(NumericValue::parse("10foo"), Err(Error::Parse(_))));
    }

    #[test]
    fn parse_ignores_trailing_input() {
        let v = NumericValue::parse("10px solid black").unwrap();
        assert_eq!(v.to_string(), "10px");
    }

    #[test]
    fn ms_conversion_rescales_in_place() {
        let v = ms(2000.0).to(Unit::Ms).unwrap();
        assert_eq!(v.as_unit_value().unwrap().value, 2.0);
        assert!(ms(1.0).to(Unit::S).is_err());
    }
}
