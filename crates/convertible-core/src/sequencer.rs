//! Call-time argument sequencing
//!
//! A [`CallFrame`] holds the arguments of one call that have not been
//! classified yet. The [`ArgumentSequencer`] walks a [`BindingPlan`] over that
//! frame and yields one [`ArgumentRecord`] per argument, in four phases:
//!
//! 1. declared positional slots (next positional value, else the keyword of the
//!    same name, else `null`)
//! 2. extra positional values, paired with the extra-positional converters
//! 3. keyword-only parameters that have converters (`null` when not supplied)
//! 4. every remaining keyword, in the order it was supplied
//!
//! Values handed back by a converter after phase 1 are yielded as extra
//! positional values before the sequencer moves on, so the frame is always
//! empty once the sequencer is exhausted.
//!
//! Each record remembers whether its value was positional, came from a
//! keyword, or was absent; only positional values may be handed back.

use std::collections::VecDeque;

use serde_json::Value;

use crate::converter::ConverterRef;
use crate::plan::BindingPlan;

/// Arguments of one call not yet classified
#[derive(Debug, Clone, Default)]
pub struct CallFrame {
    positional: VecDeque<Value>,
    keywords: Vec<(String, Value)>,
}

impl CallFrame {
    /// Create a frame; a repeated keyword keeps its last value
    pub fn new<A, K>(args: A, kwargs: K) -> Self
    where
        A: IntoIterator<Item = Value>,
        K: IntoIterator<Item = (String, Value)>,
    {
        let mut keywords: Vec<(String, Value)> = Vec::new();
        for (name, value) in kwargs {
            match keywords.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value,
                None => keywords.push((name, value)),
            }
        }
        Self {
            positional: args.into_iter().collect(),
            keywords,
        }
    }

    /// Take the next positional value
    pub fn pop_positional(&mut self) -> Option<Value> {
        self.positional.pop_front()
    }

    /// Put values back in front of the remaining positional values, keeping their order
    pub fn restore_positional(&mut self, values: Vec<Value>) {
        for value in values.into_iter().rev() {
            self.positional.push_front(value);
        }
    }

    /// Take the keyword argument `name`
    pub fn take_keyword(&mut self, name: &str) -> Option<Value> {
        let index = self.keywords.iter().position(|(k, _)| k == name)?;
        Some(self.keywords.remove(index).1)
    }

    /// Take the earliest remaining keyword argument
    pub fn pop_keyword(&mut self) -> Option<(String, Value)> {
        if self.keywords.is_empty() {
            None
        } else {
            Some(self.keywords.remove(0))
        }
    }

    /// Number of positional values left
    pub fn remaining_positional(&self) -> usize {
        self.positional.len()
    }

    /// Whether every argument has been taken
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }
}

/// Where the value of an [`ArgumentRecord`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Taken from the positional arguments
    Positional,
    /// Taken from a keyword argument
    Keyword,
    /// Not supplied; the value is `null`
    Absent,
}

/// One argument paired with its converter
#[derive(Debug, Clone)]
pub struct ArgumentRecord {
    /// Output keyword; `None` for a positional output
    pub name: Option<String>,
    /// Converter to apply, if any
    pub converter: Option<ConverterRef>,
    /// Raw value
    pub value: Value,
    /// Source of `value`
    pub origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Declared,
    Extra,
    KeywordOnly,
    Variadic,
    Done,
}

/// Lazily classifies the arguments of one call
#[derive(Debug)]
pub struct ArgumentSequencer<'a> {
    plan: &'a BindingPlan,
    frame: CallFrame,
    phase: Phase,
    index: usize,
    extra_index: usize,
}

impl<'a> ArgumentSequencer<'a> {
    /// Start sequencing `frame` against `plan`
    pub fn new(plan: &'a BindingPlan, frame: CallFrame) -> Self {
        Self {
            plan,
            frame,
            phase: Phase::Declared,
            index: 0,
            extra_index: 0,
        }
    }

    /// The remaining arguments, for converters that consume extra input
    pub fn frame_mut(&mut self) -> &mut CallFrame {
        &mut self.frame
    }

    fn extra(&mut self, value: Value) -> ArgumentRecord {
        let converter = self.plan.extra_positional().get(self.extra_index).cloned();
        self.extra_index += 1;
        ArgumentRecord {
            name: None,
            converter,
            value,
            origin: Origin::Positional,
        }
    }
}

impl Iterator for ArgumentSequencer<'_> {
    type Item = ArgumentRecord;

    fn next(&mut self) -> Option<ArgumentRecord> {
        loop {
            if self.phase == Phase::Declared {
                let Some((name, converter)) = self.plan.positional().get(self.index) else {
                    self.phase = Phase::Extra;
                    self.index = 0;
                    continue;
                };
                self.index += 1;
                let (value, origin) = if let Some(value) = self.frame.pop_positional() {
                    (value, Origin::Positional)
                } else if let Some(value) = self.frame.take_keyword(name) {
                    (value, Origin::Keyword)
                } else {
                    (Value::Null, Origin::Absent)
                };
                return Some(ArgumentRecord {
                    name: None,
                    converter: Some(converter.clone()),
                    value,
                    origin,
                });
            }

            if let Some(value) = self.frame.pop_positional() {
                return Some(self.extra(value));
            }

            match self.phase {
                Phase::Extra => self.phase = Phase::KeywordOnly,
                Phase::KeywordOnly => {
                    let Some((name, converter)) = self.plan.keyword_only().get(self.index) else {
                        self.phase = Phase::Variadic;
                        continue;
                    };
                    self.index += 1;
                    let (value, origin) = match self.frame.take_keyword(name) {
                        Some(value) => (value, Origin::Keyword),
                        None => (Value::Null, Origin::Absent),
                    };
                    return Some(ArgumentRecord {
                        name: Some(name.clone()),
                        converter: Some(converter.clone()),
                        value,
                        origin,
                    });
                }
                Phase::Variadic => {
                    let Some((name, value)) = self.frame.pop_keyword() else {
                        self.phase = Phase::Done;
                        continue;
                    };
                    let converter = self.plan.keyword(&name).cloned();
                    return Some(ArgumentRecord {
                        name: Some(name),
                        converter,
                        value,
                        origin: Origin::Keyword,
                    });
                }
                Phase::Done => return None,
                Phase::Declared => unreachable!("declared phase handled above"),
            }
        }
    }
}
