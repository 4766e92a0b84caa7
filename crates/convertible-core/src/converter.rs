//! Converter capability and the conversion protocol
//!
//! A converter receives one [`Argument`] and answers with a [`Conversion`]:
//!
//! - `Converted` - the value to hand to the wrapped callable
//! - `NeedMore` - apply the carried converter to the next positional argument
//! - `Reject` - final result, plus consumed values to put back in front of the
//!   remaining positional arguments
//! - `Failed` - the argument cannot be converted
//!
//! The executor in [`crate::handler`] drives this protocol.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Shared handle to a converter
pub type ConverterRef = Arc<dyn Converter>;

/// Input handed to a converter
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A raw argument value
    Value(Value),
    /// No more positional arguments remain
    Exhausted,
}

impl Argument {
    /// Take the raw value, if any
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Exhausted => None,
        }
    }

    /// Whether this is the "no more arguments" sentinel
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Exhausted => f.write_str("<no more arguments>"),
        }
    }
}

/// Converts one argument, or declines through the protocol.
///
/// Implementations must be immutable: the same converter is shared by every
/// call of a wrapped callable. State that has to survive a `NeedMore` step
/// travels inside the converter returned with it.
///
/// The `Debug` output identifies the converter in errors and logs.
pub trait Converter: fmt::Debug + Send + Sync {
    /// Convert a single argument
    fn convert(&self, argument: Argument) -> Conversion;
}

/// Outcome of a single [`Converter::convert`] call
#[derive(Debug)]
pub enum Conversion {
    /// The converted value
    Converted(Value),

    /// Apply this converter to the next remaining positional argument
    NeedMore(ConverterRef),

    /// Use `result`, and return `surplus` to the front of the positional arguments
    Reject {
        /// Final value for the argument being converted
        result: Value,
        /// Consumed values that were not used, in their original order
        surplus: Vec<Value>,
    },

    /// The argument cannot be converted
    Failed(ConvertError),
}

impl Conversion {
    /// Failure for a value the converter does not accept
    pub fn unconvertible(converter: &dyn fmt::Debug, value: Value) -> Self {
        Self::Failed(ConvertError::new(
            converter,
            Argument::Value(value),
            FailureKind::Unconvertible,
        ))
    }

    /// Failure for the "no more arguments" sentinel
    pub fn exhausted(converter: &dyn fmt::Debug) -> Self {
        Self::Failed(ConvertError::new(
            converter,
            Argument::Exhausted,
            FailureKind::Exhausted,
        ))
    }
}

/// Category of a conversion failure, used to pick a failure handler.
///
/// Serialized as a plain string: `unconvertible`, `exhausted`, or any other
/// name for a custom kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FailureKind {
    /// The value is not acceptable to the converter
    Unconvertible,
    /// A value was required but no more arguments remain
    Exhausted,
    /// Kind raised by a user-defined converter
    Custom(String),
}

impl From<String> for FailureKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "unconvertible" => Self::Unconvertible,
            "exhausted" => Self::Exhausted,
            _ => Self::Custom(kind),
        }
    }
}

impl From<FailureKind> for String {
    fn from(kind: FailureKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconvertible => f.write_str("unconvertible"),
            Self::Exhausted => f.write_str("exhausted"),
            Self::Custom(kind) => f.write_str(kind),
        }
    }
}

/// A converter could not produce a value for its argument
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{converter} was unable to convert {argument}{}", detail(.message))]
pub struct ConvertError {
    /// Debug representation of the converter that failed
    pub converter: String,
    /// The offending argument
    pub argument: Argument,
    /// Failure category
    pub kind: FailureKind,
    /// Optional explanation
    pub message: Option<String>,
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ConvertError {
    /// Create an error for `converter` failing on `argument`
    pub fn new(converter: &dyn fmt::Debug, argument: Argument, kind: FailureKind) -> Self {
        Self {
            converter: format!("{converter:?}"),
            argument,
            kind,
            message: None,
        }
    }

    /// Attach an explanation
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Anything that can be bound as a converter
pub trait IntoConverter {
    /// Wrap into a shared converter handle
    fn into_converter(self) -> ConverterRef;
}

impl<C: Converter + 'static> IntoConverter for C {
    fn into_converter(self) -> ConverterRef {
        Arc::new(self)
    }
}

impl IntoConverter for ConverterRef {
    fn into_converter(self) -> ConverterRef {
        self
    }
}
