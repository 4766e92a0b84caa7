//! Binding configuration
//!
//! A binding file describes one wrapped callable: its signature, the
//! converters bound to its parameters, and what to do with each kind of
//! conversion failure.
//!
//! # Example
//!
//! ```yaml
//! signature:
//!   positional: [self, numbers, label]
//!   keyword_only: [when]
//! method: true
//! converters:
//!   args:
//!     - greedy: int
//!     - optional: str
//!       fallback: "untitled"
//!   kwargs:
//!     when: timestamp
//! on_failure:
//!   unconvertible: log_and_skip
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::convert::Convert;
use crate::converter::{ConverterRef, FailureKind, IntoConverter};
use crate::converters::{
    CaptureGroup, Greedy, Ignore, Optional, Pattern, ToBool, ToFloat, ToInt, ToStr, ToTimestamp,
    ToUuid,
};
use crate::error::{Error, Result};
use crate::failure::FailureHandlers;
use crate::signature::Signature;

/// One wrapped callable, as read from a binding file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Parameter layout of the callable
    pub signature: Signature,

    /// Whether the first positional parameter is a receiver
    #[serde(default)]
    pub method: bool,

    /// Converters for the parameters
    #[serde(default)]
    pub converters: ConvertersConfig,

    /// Behavior per failure kind; kinds not listed propagate
    #[serde(default)]
    pub on_failure: HashMap<FailureKind, OnFailure>,
}

/// Converters bound by position and by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertersConfig {
    /// Ordered converters for positional parameters
    #[serde(default)]
    pub args: Vec<ConverterConfig>,

    /// Converters for keyword-only and variadic-keyword parameters
    #[serde(default)]
    pub kwargs: HashMap<String, ConverterConfig>,
}

/// Converter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConverterConfig {
    /// A built-in converter by name
    Named(ConverterKind),

    /// Fall back to a value when the inner converter fails
    Optional {
        /// Inner converter
        optional: Box<ConverterConfig>,
        /// Value used on failure; `null` when omitted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<Value>,
    },

    /// Collect a run of convertible positional arguments
    Greedy {
        /// Inner converter
        greedy: Box<ConverterConfig>,
    },

    /// Regex match with optional capture extraction
    Pattern {
        /// Regex pattern
        pattern: String,
        /// Capture group to yield; the whole match when omitted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<GroupRef>,
    },
}

/// Built-in leaf converters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// [`ToInt`]
    Int,
    /// [`ToFloat`]
    Float,
    /// [`ToBool`]
    Bool,
    /// [`ToStr`]
    Str,
    /// [`Ignore`]
    Ignore,
    /// [`ToTimestamp`]
    Timestamp,
    /// [`ToUuid`]
    Uuid,
}

/// Capture group reference in a pattern definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    /// Numbered group
    Index(usize),
    /// Named group, or digits given as a string
    Name(String),
}

impl From<&GroupRef> for CaptureGroup {
    fn from(group: &GroupRef) -> Self {
        match group {
            GroupRef::Index(index) => CaptureGroup::Index(*index),
            GroupRef::Name(name) => CaptureGroup::parse(name),
        }
    }
}

/// What to do when a conversion fails
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    /// Return the error to the caller
    #[default]
    Propagate,
    /// Log a warning and skip the call
    LogAndSkip,
    /// Skip the call silently
    Skip,
}

impl ConverterConfig {
    /// Instantiate the converter
    pub fn build(&self) -> Result<ConverterRef> {
        let converter = match self {
            Self::Named(kind) => match kind {
                ConverterKind::Int => ToInt.into_converter(),
                ConverterKind::Float => ToFloat.into_converter(),
                ConverterKind::Bool => ToBool.into_converter(),
                ConverterKind::Str => ToStr.into_converter(),
                ConverterKind::Ignore => Ignore.into_converter(),
                ConverterKind::Timestamp => ToTimestamp.into_converter(),
                ConverterKind::Uuid => ToUuid.into_converter(),
            },
            Self::Optional { optional, fallback } => {
                let inner = optional.build()?;
                Optional::new(inner)
                    .with_fallback(fallback.clone().unwrap_or(Value::Null))
                    .into_converter()
            }
            Self::Greedy { greedy } => Greedy::new(greedy.build()?).into_converter(),
            Self::Pattern { pattern, group } => {
                let mut converter = Pattern::new(pattern)?;
                if let Some(group) = group {
                    converter = converter.with_group(group.into());
                }
                converter.into_converter()
            }
        };
        Ok(converter)
    }
}

impl BindingConfig {
    /// Load a binding file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let binding = BindingConfig::load("binding.yaml")?;
    /// let convert = binding.to_convert()?;
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        tracing::debug!("Loaded binding from {}", path.display());
        Ok(config)
    }

    /// Parse a binding from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.method && self.signature.positional().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "a method binding needs a receiver as its first positional parameter"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Failure handlers for the configured behaviors
    pub fn failure_handlers(&self) -> FailureHandlers {
        let mut handlers = FailureHandlers::new();
        for (kind, behavior) in &self.on_failure {
            match behavior {
                OnFailure::Propagate => {}
                OnFailure::LogAndSkip => {
                    let label = kind.to_string();
                    handlers.insert(kind.clone(), move |converter, argument| {
                        tracing::warn!(
                            "Skipping call: {} was unable to convert {} ({})",
                            converter,
                            argument,
                            label
                        );
                    });
                }
                OnFailure::Skip => handlers.insert(kind.clone(), |_, _| {}),
            }
        }
        handlers
    }

    /// A [`Convert`] carrying the configured converters and failure handlers
    pub fn to_convert(&self) -> Result<Convert> {
        let mut convert = Convert::new().failure_handlers(self.failure_handlers());
        for converter in &self.converters.args {
            convert = convert.arg(converter.build()?);
        }

        // sorted so that logs and plans are stable across runs
        let mut kwargs: Vec<_> = self.converters.kwargs.iter().collect();
        kwargs.sort_by(|a, b| a.0.cmp(b.0));
        for (name, converter) in kwargs {
            convert = convert.kwarg(name.clone(), converter.build()?);
        }
        Ok(convert)
    }
}
