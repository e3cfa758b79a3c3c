//! # stylum
//!
//! A typed CSS value algebra and declarative style-authoring layer for
//! building user-interface components.
//!
//! ## Features
//!
//! - Typed numeric CSS values with `calc()`-style math and unit-aware
//!   rendering ([`value`])
//! - A rule interpreter mapping high-level intent props (`center`, `round`,
//!   `row`, ...) onto concrete CSS property sets ([`rules`])
//! - A style sink that deduplicates repeated inline styles into shared
//!   class rules once a usage threshold is exceeded ([`sink`])
//!
//! ## Quick Start
//!
//! ```
//! use stylum::{PropsBag, panel_rules};
//!
//! // High-level intent props...
//! let props = PropsBag::new().with("center", true).with("padding", 8);
//!
//! // ...resolve to concrete CSS declarations.
//! let style = panel_rules().exec(&props).unwrap();
//! assert_eq!(style.get("justifyContent").unwrap().to_string(), "center");
//! assert_eq!(style.get("padding-top").unwrap().to_string(), "8px");
//! ```
//!
//! ## Value algebra
//!
//! ```
//! use stylum::value::{px, percent, Unit};
//!
//! let gutter = px(16.0);
//! assert_eq!(gutter.mul([2.0]).to_string(), "32px");
//!
//! // Mixed units build a calc() expression instead of coercing.
//! let sum = stylum::NumericValue::sum(vec![percent(100.0), px(-32.0)]).unwrap();
//! assert_eq!(sum.to_string(), "calc( 100% + -32px )");
//!
//! // Conversions outside the fixed table are errors, not approximations.
//! assert!(px(10.0).to(Unit::Cm).is_err());
//! ```
//!
//! ## Deduplication
//!
//! ```
//! use stylum::{StyleDescription, StyleSink, SyntheticStyleSheet};
//!
//! let mut sink = StyleSink::with_threshold(Box::new(SyntheticStyleSheet::new()), 2);
//! let styles = StyleDescription::new().with("color", "red");
//!
//! assert!(sink.get_desc(&styles).class_name.is_empty()); // inline
//! assert!(sink.get_desc(&styles).class_name.is_empty()); // inline
//! assert!(!sink.get_desc(&styles).class_name.is_empty()); // promoted
//! ```

pub mod error;
pub mod props;
pub mod rules;
pub mod sink;
pub mod style;
pub mod tokenize;
pub mod value;

pub(crate) mod util;

#[cfg(any(feature = "cli", feature = "wasm"))]
pub mod json;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use props::{CornerValues, EdgeValues, PropValue, PropsBag, Scalar, Vector3};
pub use rules::{RuleOutput, RuleSet, panel_rules, scalar_to_css_value, text_rules};
pub use sink::{StyleDesc, StyleSink, StyleTarget, SyntheticStyleSheet};
pub use style::{PropertyValue, StyleDescription, StyleResolver};
pub use value::{NumericValue, Unit, UnitValue};
