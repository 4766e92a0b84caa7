//! Scalar converters

use serde_json::{Number, Value};

use crate::converter::{Argument, Conversion, Converter};

/// Converts integers, integral floats, and decimal strings to an integer
#[derive(Debug, Clone, Copy, Default)]
pub struct ToInt;

impl Converter for ToInt {
    fn convert(&self, argument: Argument) -> Conversion {
        let Some(value) = argument.into_value() else {
            return Conversion::exhausted(self);
        };
        match to_int(&value) {
            Some(number) => Conversion::Converted(Value::Number(number)),
            None => Conversion::unconvertible(self, value),
        }
    }
}

fn to_int(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.clone()),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .and_then(integral_float),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .or_else(|_| s.parse::<u64>().map(Number::from))
                .ok()
        }
        _ => None,
    }
}

// i64::MAX as f64 rounds up to 2^63, so both upper bounds are exclusive
fn integral_float(f: f64) -> Option<Number> {
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Number::from(f as i64))
    } else if f >= 0.0 && f < u64::MAX as f64 {
        Some(Number::from(f as u64))
    } else {
        None
    }
}

/// Converts numbers and numeric strings to a float
#[derive(Debug, Clone, Copy, Default)]
pub struct ToFloat;

impl Converter for ToFloat {
    fn convert(&self, argument: Argument) -> Conversion {
        let Some(value) = argument.into_value() else {
            return Conversion::exhausted(self);
        };
        let parsed = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        // NaN and infinities have no JSON representation
        match parsed.and_then(Number::from_f64) {
            Some(number) => Conversion::Converted(Value::Number(number)),
            None => Conversion::unconvertible(self, value),
        }
    }
}

/// Converts booleans, common boolean words, and 0/1 to a boolean
#[derive(Debug, Clone, Copy, Default)]
pub struct ToBool;

impl Converter for ToBool {
    fn convert(&self, argument: Argument) -> Conversion {
        let Some(value) = argument.into_value() else {
            return Conversion::exhausted(self);
        };
        let parsed = match &value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        };
        match parsed {
            Some(b) => Conversion::Converted(Value::Bool(b)),
            None => Conversion::unconvertible(self, value),
        }
    }
}

/// Converts strings, numbers, and booleans to a string
#[derive(Debug, Clone, Copy, Default)]
pub struct ToStr;

impl Converter for ToStr {
    fn convert(&self, argument: Argument) -> Conversion {
        match argument {
            Argument::Value(Value::String(s)) => Conversion::Converted(Value::String(s)),
            Argument::Value(Value::Number(n)) => {
                Conversion::Converted(Value::String(n.to_string()))
            }
            Argument::Value(Value::Bool(b)) => Conversion::Converted(Value::String(b.to_string())),
            Argument::Value(other) => Conversion::unconvertible(self, other),
            Argument::Exhausted => Conversion::exhausted(self),
        }
    }
}
