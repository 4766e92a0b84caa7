//! Conversion executor
//!
//! Drives an [`ArgumentSequencer`] for one call and applies each record's
//! converter, following the protocol until the converter settles on a value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::converter::{Argument, ConvertError, Conversion, ConverterRef, FailureKind};
use crate::plan::BindingPlan;
use crate::sequencer::{ArgumentSequencer, CallFrame, Origin};

/// Converted arguments handed to the wrapped callable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    /// Positional arguments, in order
    pub args: Vec<Value>,
    /// Keyword arguments
    pub kwargs: Map<String, Value>,
}

impl Arguments {
    fn push(&mut self, name: Option<String>, value: Value) {
        match name {
            Some(name) => {
                self.kwargs.insert(name, value);
            }
            None => self.args.push(value),
        }
    }
}

/// Converts the arguments of calls according to a binding plan
#[derive(Debug, Clone)]
pub struct ConvertHandler {
    plan: BindingPlan,
}

impl ConvertHandler {
    /// Create a handler for `plan`
    pub fn new(plan: BindingPlan) -> Self {
        Self { plan }
    }

    /// The binding plan in use
    pub fn plan(&self) -> &BindingPlan {
        &self.plan
    }

    /// Convert the arguments of one call
    pub fn convert<A, K>(&self, args: A, kwargs: K) -> Result<Arguments, ConvertError>
    where
        A: IntoIterator<Item = Value>,
        K: IntoIterator<Item = (String, Value)>,
    {
        let mut sequencer = ArgumentSequencer::new(&self.plan, CallFrame::new(args, kwargs));
        let mut arguments = Arguments::default();

        while let Some(record) = sequencer.next() {
            let value = match record.converter {
                Some(converter) => {
                    run(converter, record.value, record.origin, sequencer.frame_mut())?
                }
                None => record.value,
            };
            tracing::trace!("Argument {:?} -> {}", record.name, value);
            arguments.push(record.name, value);
        }

        tracing::debug!(
            "Converted {} positional and {} keyword argument(s)",
            arguments.args.len(),
            arguments.kwargs.len()
        );
        Ok(arguments)
    }
}

/// Apply `converter` to `value`, pulling more positional values from `frame` on request.
///
/// Surplus handed back is a suffix of the values consumed for this record: the
/// record's own value followed by every value pulled from `frame`. A value that
/// did not come from the positional arguments is never put back there.
fn run(
    mut converter: ConverterRef,
    value: Value,
    origin: Origin,
    frame: &mut CallFrame,
) -> Result<Value, ConvertError> {
    let mut argument = Argument::Value(value);
    let mut pulled = 0;
    loop {
        let exhausted = argument.is_exhausted();
        match converter.convert(argument) {
            Conversion::Converted(value) => return Ok(value),
            Conversion::NeedMore(next) => {
                if exhausted {
                    // the sentinel cannot be requested past
                    return Err(ConvertError::new(
                        &converter,
                        Argument::Exhausted,
                        FailureKind::Exhausted,
                    )
                    .with_message("requested more input after the last argument"));
                }
                tracing::trace!(
                    "{:?} requested another argument ({} remaining)",
                    converter,
                    frame.remaining_positional()
                );
                argument = match frame.pop_positional() {
                    Some(value) => {
                        pulled += 1;
                        Argument::Value(value)
                    }
                    None => Argument::Exhausted,
                };
                converter = next;
            }
            Conversion::Reject { result, mut surplus } => {
                if origin != Origin::Positional && surplus.len() > pulled {
                    let own = surplus.len() - pulled;
                    tracing::trace!(
                        "{:?} handed back {} {:?} value(s); dropped",
                        converter,
                        own,
                        origin
                    );
                    surplus.drain(..own);
                }
                tracing::trace!(
                    "{:?} returned {} unused argument(s)",
                    converter,
                    surplus.len()
                );
                frame.restore_positional(surplus);
                return Ok(result);
            }
            Conversion::Failed(err) => return Err(err),
        }
    }
}
