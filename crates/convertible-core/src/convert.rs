//! Registration surface
//!
//! [`Convert`] collects converters and failure handlers, then wraps a
//! callable. Free functions become a [`ConvertedFunction`]; methods become a
//! [`ConvertedMethod`], whose receiver never goes through conversion and is
//! not counted when converters are paired with parameters.
//!
//! # Example
//!
//! ```rust,ignore
//! let signature = Signature::builder().positional(["self", "amount"]).build()?;
//! let deposit = Convert::new()
//!     .arg(ToFloat)
//!     .on_failure(FailureKind::Unconvertible, |c, v| eprintln!("{c} rejected {v}"))
//!     .method(&signature, |account: &Account, arguments| account.deposit(&arguments.args[0]));
//!
//! deposit.bind(&account).call(vec!["12.5".into()], [])?;
//! ```

use serde_json::Value;

use crate::converter::{Argument, ConverterRef, FailureKind, IntoConverter};
use crate::error::Result;
use crate::failure::FailureHandlers;
use crate::handler::{Arguments, ConvertHandler};
use crate::plan::BindingPlan;
use crate::signature::Signature;

/// Converters and failure handlers waiting to be attached to a callable
#[derive(Debug, Clone, Default)]
pub struct Convert {
    args: Vec<ConverterRef>,
    kwargs: Vec<(String, ConverterRef)>,
    failures: FailureHandlers,
}

impl Convert {
    /// Start with no converters
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the next declared positional parameter
    pub fn arg(mut self, converter: impl IntoConverter) -> Self {
        self.args.push(converter.into_converter());
        self
    }

    /// Bind several positional parameters in order
    pub fn args<I, C>(mut self, converters: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoConverter,
    {
        self.args
            .extend(converters.into_iter().map(IntoConverter::into_converter));
        self
    }

    /// Bind a keyword-only or variadic-keyword parameter by name
    pub fn kwarg(mut self, name: impl Into<String>, converter: impl IntoConverter) -> Self {
        let name = name.into();
        let converter = converter.into_converter();
        match self.kwargs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = converter,
            None => self.kwargs.push((name, converter)),
        }
        self
    }

    /// Handle failures of `kind` instead of propagating them
    pub fn on_failure<F>(mut self, kind: FailureKind, handler: F) -> Self
    where
        F: Fn(&str, &Argument) + Send + Sync + 'static,
    {
        self.failures.insert(kind, handler);
        self
    }

    /// Replace all failure handlers
    pub fn failure_handlers(mut self, failures: FailureHandlers) -> Self {
        self.failures = failures;
        self
    }

    /// The executor for a free function with `signature`
    pub fn handler(&self, signature: &Signature) -> ConvertHandler {
        ConvertHandler::new(BindingPlan::new(signature, &self.args, &self.kwargs))
    }

    /// The executor for a method with `signature`, receiver first
    pub fn method_handler(&self, signature: &Signature) -> ConvertHandler {
        ConvertHandler::new(BindingPlan::for_method(signature, &self.args, &self.kwargs))
    }

    /// Wrap a free function
    pub fn function<F>(self, signature: &Signature, function: F) -> ConvertedFunction<F> {
        tracing::debug!("Wrapping function with signature {:?}", signature);
        ConvertedFunction {
            handler: self.handler(signature),
            failures: self.failures,
            function,
        }
    }

    /// Wrap a method; the first declared positional parameter is the receiver
    pub fn method<F>(self, signature: &Signature, method: F) -> ConvertedMethod<F> {
        tracing::debug!("Wrapping method with signature {:?}", signature);
        ConvertedMethod {
            handler: self.method_handler(signature),
            failures: self.failures,
            method,
        }
    }
}

fn invoke<A, K, R>(
    handler: &ConvertHandler,
    failures: &FailureHandlers,
    args: A,
    kwargs: K,
    call: impl FnOnce(Arguments) -> R,
) -> Result<Option<R>>
where
    A: IntoIterator<Item = Value>,
    K: IntoIterator<Item = (String, Value)>,
{
    match handler.convert(args, kwargs) {
        Ok(arguments) => Ok(Some(call(arguments))),
        Err(err) => {
            failures.handle(err)?;
            Ok(None)
        }
    }
}

/// A free function whose arguments are converted before each call
#[derive(Debug, Clone)]
pub struct ConvertedFunction<F> {
    handler: ConvertHandler,
    failures: FailureHandlers,
    function: F,
}

impl<F> ConvertedFunction<F> {
    /// Convert the arguments and call the function.
    ///
    /// Returns `Ok(None)` when a conversion failure was handled, and
    /// `Err(Error::Conversion(_))` when it was not.
    pub fn call<A, K, R>(&self, args: A, kwargs: K) -> Result<Option<R>>
    where
        F: Fn(Arguments) -> R,
        A: IntoIterator<Item = Value>,
        K: IntoIterator<Item = (String, Value)>,
    {
        invoke(&self.handler, &self.failures, args, kwargs, |arguments| {
            (self.function)(arguments)
        })
    }

    /// The underlying executor
    pub fn handler(&self) -> &ConvertHandler {
        &self.handler
    }
}

/// A method whose arguments, other than the receiver, are converted before each call
#[derive(Debug, Clone)]
pub struct ConvertedMethod<F> {
    handler: ConvertHandler,
    failures: FailureHandlers,
    method: F,
}

impl<F> ConvertedMethod<F> {
    /// Bind to a receiver
    pub fn bind<'a, T>(&'a self, receiver: &'a T) -> BoundMethod<'a, T, F> {
        BoundMethod {
            method: self,
            receiver,
        }
    }

    /// Convert the arguments and call the method on `receiver`
    pub fn call<T, A, K, R>(&self, receiver: &T, args: A, kwargs: K) -> Result<Option<R>>
    where
        F: Fn(&T, Arguments) -> R,
        A: IntoIterator<Item = Value>,
        K: IntoIterator<Item = (String, Value)>,
    {
        invoke(&self.handler, &self.failures, args, kwargs, |arguments| {
            (self.method)(receiver, arguments)
        })
    }

    /// The underlying executor
    pub fn handler(&self) -> &ConvertHandler {
        &self.handler
    }
}

/// A [`ConvertedMethod`] bound to its receiver
#[derive(Debug)]
pub struct BoundMethod<'a, T, F> {
    method: &'a ConvertedMethod<F>,
    receiver: &'a T,
}

impl<T, F> BoundMethod<'_, T, F> {
    /// Convert the arguments and call the method on the bound receiver
    pub fn call<A, K, R>(&self, args: A, kwargs: K) -> Result<Option<R>>
    where
        F: Fn(&T, Arguments) -> R,
        A: IntoIterator<Item = Value>,
        K: IntoIterator<Item = (String, Value)>,
    {
        self.method.call(self.receiver, args, kwargs)
    }
}
