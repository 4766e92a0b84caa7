//! Composite converters built on the conversion protocol

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::converter::{Argument, Conversion, Converter, ConverterRef, IntoConverter};

/// Passes every argument through unchanged.
///
/// Used to neutralise a positional slot. The sentinel becomes `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl Converter for Ignore {
    fn convert(&self, argument: Argument) -> Conversion {
        Conversion::Converted(argument.into_value().unwrap_or(Value::Null))
    }
}

/// Runs the inner converter, substituting a fallback when it fails
#[derive(Clone)]
pub struct Optional {
    inner: ConverterRef,
    fallback: Value,
}

impl Optional {
    /// Wrap `inner`, falling back to `null`
    pub fn new(inner: impl IntoConverter) -> Self {
        Self {
            inner: inner.into_converter(),
            fallback: Value::Null,
        }
    }

    /// Use `fallback` instead of `null`
    pub fn with_fallback(mut self, fallback: Value) -> Self {
        self.fallback = fallback;
        self
    }
}

impl fmt::Debug for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fallback.is_null() {
            write!(f, "Optional({:?})", self.inner)
        } else {
            write!(f, "Optional({:?}, fallback={})", self.inner, self.fallback)
        }
    }
}

impl Converter for Optional {
    fn convert(&self, argument: Argument) -> Conversion {
        match self.inner.convert(argument) {
            Conversion::Failed(err) => {
                tracing::trace!("{:?} fell back: {}", self, err);
                Conversion::Converted(self.fallback.clone())
            }
            // keep the fallback in force for the rest of the chain
            Conversion::NeedMore(next) => Conversion::NeedMore(Arc::new(Self {
                inner: next,
                fallback: self.fallback.clone(),
            })),
            other => other,
        }
    }
}

/// Converts a run of positional arguments into a single list.
///
/// Each successful conversion asks for the next argument. The run ends at the
/// first argument the inner converter fails on, which is handed back, or when
/// no arguments remain. The executor only returns a handed-back value to the
/// positional arguments when it was taken from them.
#[derive(Clone)]
pub struct Greedy {
    inner: ConverterRef,
    results: Vec<Value>,
}

impl Greedy {
    /// Wrap `inner` with no accumulated results
    pub fn new(inner: impl IntoConverter) -> Self {
        Self {
            inner: inner.into_converter(),
            results: Vec::new(),
        }
    }

    /// Results accumulated so far in this run
    pub fn results(&self) -> &[Value] {
        &self.results
    }

    fn finish(&self, surplus: Vec<Value>) -> Conversion {
        Conversion::Reject {
            result: Value::Array(self.results.clone()),
            surplus,
        }
    }
}

impl fmt::Debug for Greedy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            write!(f, "Greedy({:?})", self.inner)
        } else {
            write!(f, "Greedy({:?}, results={:?})", self.inner, self.results)
        }
    }
}

impl Converter for Greedy {
    fn convert(&self, argument: Argument) -> Conversion {
        let Argument::Value(value) = argument else {
            return self.finish(Vec::new());
        };

        match self.inner.convert(Argument::Value(value.clone())) {
            Conversion::Converted(converted) => {
                // quadratic in the run length: every continuation owns its results
                let mut results = self.results.clone();
                results.push(converted);
                Conversion::NeedMore(Arc::new(Self {
                    inner: self.inner.clone(),
                    results,
                }))
            }
            // an inner converter that wants its own protocol ends the run
            Conversion::Failed(_) | Conversion::NeedMore(_) | Conversion::Reject { .. } => {
                self.finish(vec![value])
            }
        }
    }
}
