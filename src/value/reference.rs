//! Style values that reference things: `url()` images, `var()` custom
//! properties, and unparsed member lists carried through verbatim.

use std::fmt;

use crate::error::{Error, Result};
use crate::tokenize::{self, Token};

/// A `url(...)` image value.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlValue {
    pub url: String,
    css_text: String,
}

impl UrlValue {
    pub fn new(url: impl Into<String>) -> UrlValue {
        let url = url.into();
        let css_text = format!("url({})", url);
        UrlValue { url, css_text }
    }

    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

impl fmt::Display for UrlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text)
    }
}

/// One member of an [`UnparsedValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum UnparsedSegment {
    Str(String),
    Variable(VariableReference),
}

/// A comma-joined list of raw segments and variable references.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedValue {
    pub members: Vec<UnparsedSegment>,
    css_text: String,
}

impl UnparsedValue {
    pub fn new(members: Vec<UnparsedSegment>) -> UnparsedValue {
        let css_text = members
            .iter()
            .map(|m| match m {
                UnparsedSegment::Str(s) => s.clone(),
                UnparsedSegment::Variable(v) => v.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        UnparsedValue { members, css_text }
    }

    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

impl fmt::Display for UnparsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text)
    }
}

/// A `var(--name, fallback?)` reference to a custom property.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableReference {
    /// The custom property name without the `--` prefix.
    pub variable: String,
    pub fallback: Option<UnparsedValue>,
    css_text: String,
}

impl VariableReference {
    pub fn new(variable: impl Into<String>, fallback: Option<UnparsedValue>) -> VariableReference {
        let variable = variable.into();
        let css_text = match &fallback {
            Some(fallback) => format!("var(--{}, {})", variable, fallback),
            None => format!("var(--{})", variable),
        };
        VariableReference {
            variable,
            fallback,
            css_text,
        }
    }

    /// Parse a `var(--name)` / `var(--name, fallback)` expression, fallbacks
    /// may nest further `var()` calls.
    pub fn parse(text: &str) -> Result<VariableReference> {
        let scan = tokenize::tokenize_value(text);
        match scan.token {
            Some(ref token) => VariableReference::from_token(token)
                .ok_or_else(|| Error::Parse(text.to_string())),
            None => Err(Error::Parse(text.to_string())),
        }
    }

    fn from_token(token: &Token) -> Option<VariableReference> {
        let Token::Parts(parts) = token else { return None };
        let [Token::Word(head), argument] = parts.as_slice() else {
            return None;
        };
        if head != "var" {
            return None;
        }
        match argument {
            Token::Word(name) => Some(VariableReference::new(name.strip_prefix("--")?, None)),
            Token::Values(values) => {
                let [Token::Word(name), fallback @ ..] = values.as_slice() else {
                    return None;
                };
                let members = fallback
                    .iter()
                    .map(segment_from_token)
                    .collect::<Option<Vec<_>>>()?;
                Some(VariableReference::new(
                    name.strip_prefix("--")?,
                    Some(UnparsedValue::new(members)),
                ))
            }
            _ => None,
        }
    }

    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

fn segment_from_token(token: &Token) -> Option<UnparsedSegment> {
    match token {
        Token::Word(word) => Some(UnparsedSegment::Str(word.clone())),
        parts @ Token::Parts(_) => {
            VariableReference::from_token(parts).map(UnparsedSegment::Variable)
        }
        Token::Values(_) => None,
    }
}

impl fmt::Display for VariableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text)
    }
}
