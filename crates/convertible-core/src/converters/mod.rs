//! Built-in converters
//!
//! Leaf converters turn one raw value into one typed value:
//!
//! - `ToInt`, `ToFloat`, `ToBool`, `ToStr` - scalar coercions
//! - `Pattern` - strings matching a regex, optionally extracting a capture group
//! - `ToTimestamp` - RFC 3339 strings or Unix seconds, normalised to UTC
//! - `ToUuid` - UUID strings, normalised to lower-case hyphenated form
//!
//! Composite converters wrap other converters and use the protocol:
//!
//! - `Ignore` - pass the argument through
//! - `Optional` - fall back to a fixed value when the inner converter fails
//! - `Greedy` - consume a run of convertible positional arguments into a list
//!
//! `FromFn` adapts a closure for one-off converters.

pub mod composite;
pub mod pattern;
pub mod scalar;
pub mod timestamp;

use std::fmt;

use crate::converter::{Argument, Conversion, Converter};

pub use composite::{Greedy, Ignore, Optional};
pub use pattern::{CaptureGroup, Pattern, ToUuid};
pub use scalar::{ToBool, ToFloat, ToInt, ToStr};
pub use timestamp::ToTimestamp;

/// Converter backed by a closure
pub struct FromFn<F> {
    name: String,
    function: F,
}

impl<F> FromFn<F>
where
    F: Fn(Argument) -> Conversion + Send + Sync,
{
    /// Create a named closure converter
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<F> Converter for FromFn<F>
where
    F: Fn(Argument) -> Conversion + Send + Sync,
{
    fn convert(&self, argument: Argument) -> Conversion {
        (self.function)(argument)
    }
}
