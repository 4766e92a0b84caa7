//! Convertible Core Library
//!
//! This crate provides per-parameter argument conversion for callables:
//! - Converter capability and the conversion protocol
//! - Leaf and composite converters
//! - Binding plans derived from a callable's signature
//! - The call-time sequencer and conversion executor
//! - Registration wrappers for functions and methods
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Signature  │────▶│   Binding   │────▶│  Sequencer  │────▶│  Executor   │
//! │ + Converters│     │    Plan     │     │ (per call)  │     │ (protocol)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use convertible_core::{Arguments, Convert, Signature};
//! use serde_json::Value;
//! use convertible_core::converters::ToInt;
//!
//! let signature = Signature::builder().positional(["a", "b"]).build()?;
//! let add = Convert::new()
//!     .arg(ToInt)
//!     .arg(ToInt)
//!     .function(&signature, |arguments: Arguments| {
//!         arguments.args.iter().filter_map(Value::as_i64).sum::<i64>()
//!     });
//!
//! assert_eq!(add.call(vec!["1".into(), "2".into()], [])?, Some(3));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod converter;
pub mod converters;
pub mod error;
pub mod failure;
pub mod handler;
pub mod plan;
pub mod sequencer;
pub mod signature;

pub use config::BindingConfig;
pub use convert::{BoundMethod, Convert, ConvertedFunction, ConvertedMethod};
pub use converter::{
    Argument, ConvertError, Conversion, Converter, ConverterRef, FailureKind, IntoConverter,
};
pub use error::{Error, Result};
pub use failure::FailureHandlers;
pub use handler::{Arguments, ConvertHandler};
pub use plan::{BindingPlan, ExtraPositional};
pub use signature::Signature;
