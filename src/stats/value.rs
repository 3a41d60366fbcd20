use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edit_distance::EditRecord;
use crate::error::{LogError, Result};

/// One epoch-level statistic (learning rate, epoch number, run tag, ...).
///
/// `Display` is the text-sink rendering: floats always get exactly two
/// fractional digits (NaN prints as `nan`, infinities as `inf`/`-inf`), every
/// other variant prints its natural form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    /// Numeric value forwarded to a series backend. Booleans map to 0/1.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatValue::Bool(b)  => Some(if *b { 1.0 } else { 0.0 }),
            StatValue::Int(i)   => Some(*i as f64),
            StatValue::Float(x) => Some(*x),
            StatValue::Text(_)  => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Bool(b)  => write!(f, "{b}"),
            StatValue::Int(i)   => write!(f, "{i}"),
            StatValue::Float(x) if x.is_nan() => f.write_str("nan"),
            StatValue::Float(x) => write!(f, "{x:.2}"),
            StatValue::Text(s)  => f.write_str(s),
        }
    }
}

impl From<f64> for StatValue {
    fn from(x: f64) -> Self {
        StatValue::Float(x)
    }
}

impl From<f32> for StatValue {
    fn from(x: f32) -> Self {
        StatValue::Float(x as f64)
    }
}

impl From<i64> for StatValue {
    fn from(i: i64) -> Self {
        StatValue::Int(i)
    }
}

impl From<i32> for StatValue {
    fn from(i: i32) -> Self {
        StatValue::Int(i as i64)
    }
}

impl From<usize> for StatValue {
    fn from(i: usize) -> Self {
        StatValue::Int(i as i64)
    }
}

impl From<bool> for StatValue {
    fn from(b: bool) -> Self {
        StatValue::Bool(b)
    }
}

impl From<&str> for StatValue {
    fn from(s: &str) -> Self {
        StatValue::Text(s.to_string())
    }
}

impl From<String> for StatValue {
    fn from(s: String) -> Self {
        StatValue::Text(s)
    }
}

/// One raw per-batch sample collected during a phase.
///
/// Most statistics are plain numbers. Error-rate statistics instead collect
/// one alignment record per utterance and are reduced by
/// `summarize_error_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Value(f64),
    Edit(EditRecord),
}

impl Sample {
    /// The sample as a plain number; edit records have none.
    pub fn scalar(&self) -> Result<f64> {
        match self {
            Sample::Value(x) => Ok(*x),
            Sample::Edit(record) => {
                Err(LogError::NonScalar(format!("edit record `{}`", record.key)))
            }
        }
    }
}

impl From<f64> for Sample {
    fn from(x: f64) -> Self {
        Sample::Value(x)
    }
}

impl From<f32> for Sample {
    fn from(x: f32) -> Self {
        Sample::Value(x as f64)
    }
}

impl From<EditRecord> for Sample {
    fn from(record: EditRecord) -> Self {
        Sample::Edit(record)
    }
}
