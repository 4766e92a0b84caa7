//! Failure handlers keyed by failure kind
//!
//! A handler receives the failing converter's description and the offending
//! argument. A handled failure ends the wrapped call without a result; a
//! failure with no handler for its kind propagates to the caller.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::converter::{Argument, ConvertError, FailureKind};

/// Callback invoked with `(converter, argument)` for a handled failure
pub type FailureHandler = Arc<dyn Fn(&str, &Argument) + Send + Sync>;

/// Handlers for conversion failures, by kind
#[derive(Clone, Default)]
pub struct FailureHandlers {
    handlers: HashMap<FailureKind, FailureHandler>,
}

impl FailureHandlers {
    /// No handlers: every failure propagates
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, replacing any previous one
    pub fn on<F>(mut self, kind: FailureKind, handler: F) -> Self
    where
        F: Fn(&str, &Argument) + Send + Sync + 'static,
    {
        self.insert(kind, handler);
        self
    }

    /// Register `handler` for `kind` in place
    pub fn insert<F>(&mut self, kind: FailureKind, handler: F)
    where
        F: Fn(&str, &Argument) + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Arc::new(handler));
    }

    /// Whether a handler is registered for `kind`
    pub fn handles(&self, kind: &FailureKind) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Whether no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `error`, or give the error back when there is none
    pub fn handle(&self, error: ConvertError) -> Result<(), ConvertError> {
        match self.handlers.get(&error.kind) {
            Some(handler) => {
                tracing::debug!("Handling {} failure: {}", error.kind, error);
                handler(&error.converter, &error.argument);
                Ok(())
            }
            None => Err(error),
        }
    }
}

impl fmt::Debug for FailureHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.handlers.keys().map(ToString::to_string).collect();
        kinds.sort();
        f.debug_struct("FailureHandlers")
            .field("kinds", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::ToInt;
    use serde_json::json;
    use std::sync::Mutex;

    fn unconvertible() -> ConvertError {
        ConvertError::new(&ToInt, Argument::Value(json!("x")), FailureKind::Unconvertible)
    }

    #[test]
    fn test_registered_kind_is_handled() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handlers = FailureHandlers::new().on(FailureKind::Unconvertible, move |c, a| {
            sink.lock().unwrap().push((c.to_string(), a.clone()));
        });

        assert!(handlers.handle(unconvertible()).is_ok());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("ToInt".to_string(), Argument::Value(json!("x")))]
        );
    }

    #[test]
    fn test_other_kind_propagates() {
        let handlers = FailureHandlers::new().on(FailureKind::Exhausted, |_, _| {});
        let err = handlers.handle(unconvertible()).unwrap_err();
        assert_eq!(err, unconvertible());
    }

    #[test]
    fn test_debug_lists_kinds() {
        let handlers = FailureHandlers::new()
            .on(FailureKind::Unconvertible, |_, _| {})
            .on(FailureKind::Custom("range".into()), |_, _| {});
        assert_eq!(
            format!("{handlers:?}"),
            r#"FailureHandlers { kinds: ["range", "unconvertible"] }"#
        );
    }
}
