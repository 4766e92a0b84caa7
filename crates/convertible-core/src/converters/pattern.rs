//! Text converters: regex patterns and UUIDs

use std::fmt;

use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::converter::{Argument, ConvertError, Conversion, Converter, FailureKind};
use crate::error::{Error, Result};

/// Capture group identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureGroup {
    /// Numbered group (0 is entire match)
    Index(usize),
    /// Named group
    Named(String),
}

impl CaptureGroup {
    /// Parse a group reference: digits select by index, anything else by name
    pub fn parse(group: &str) -> Self {
        match group.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Named(group.to_string()),
        }
    }
}

/// Accepts strings matching a regex and yields the match or a capture group
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    group: CaptureGroup,
}

impl Pattern {
    /// Compile a pattern that yields the whole match
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            regex,
            group: CaptureGroup::Index(0),
        })
    }

    /// Yield the given capture group instead of the whole match
    pub fn with_group(mut self, group: CaptureGroup) -> Self {
        self.group = group;
        self
    }

    fn extract(&self, text: &str) -> Option<String> {
        let captures = self.regex.captures(text)?;
        let found = match &self.group {
            CaptureGroup::Index(index) => captures.get(*index),
            CaptureGroup::Named(name) => captures.name(name),
        };
        found.map(|m| m.as_str().to_string())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            CaptureGroup::Index(0) => write!(f, "Pattern(/{}/)", self.regex.as_str()),
            CaptureGroup::Index(index) => {
                write!(f, "Pattern(/{}/, group={index})", self.regex.as_str())
            }
            CaptureGroup::Named(name) => {
                write!(f, "Pattern(/{}/, group={name})", self.regex.as_str())
            }
        }
    }
}

impl Converter for Pattern {
    fn convert(&self, argument: Argument) -> Conversion {
        let Some(value) = argument.into_value() else {
            return Conversion::exhausted(self);
        };
        let extracted = value.as_str().and_then(|text| self.extract(text));
        match extracted {
            Some(text) => Conversion::Converted(Value::String(text)),
            None => Conversion::Failed(
                ConvertError::new(self, Argument::Value(value), FailureKind::Unconvertible)
                    .with_message("no match"),
            ),
        }
    }
}

/// Converts UUID strings to lower-case hyphenated form
#[derive(Debug, Clone, Copy, Default)]
pub struct ToUuid;

impl Converter for ToUuid {
    fn convert(&self, argument: Argument) -> Conversion {
        let Some(value) = argument.into_value() else {
            return Conversion::exhausted(self);
        };
        let Some(text) = value.as_str() else {
            return Conversion::unconvertible(self, value);
        };
        match Uuid::parse_str(text.trim()) {
            Ok(uuid) => Conversion::Converted(Value::String(uuid.hyphenated().to_string())),
            Err(e) => {
                let message = e.to_string();
                Conversion::Failed(
                    ConvertError::new(self, Argument::Value(value), FailureKind::Unconvertible)
                        .with_message(message),
                )
            }
        }
    }
}
