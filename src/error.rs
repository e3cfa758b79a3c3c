//! Error types for style resolution and the value algebra.

use thiserror::Error;

use crate::value::Unit;

/// Errors that can occur while building, converting, or resolving style values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input text does not start with a numeric literal.
    #[error("cannot parse a numeric value from {0:?}")]
    Parse(String),

    /// The unit pair is not in the conversion table.
    #[error("unsupported unit conversion: {from} -> {to}")]
    UnsupportedConversion { from: Unit, to: Unit },

    /// A math value with more than one operand cannot be cast to a unit.
    #[error("cannot cast a math value with {0} operands to a unit")]
    AmbiguousCast(usize),

    /// A value object was constructed from invalid parts.
    #[error("invalid construction: {0}")]
    Construction(&'static str),

    /// Style resolution requires a sink, and none is registered.
    #[error("no style sink registered for this resolution")]
    MissingContext,
}

pub type Result<T> = std::result::Result<T, Error>;
