// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/value.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single attribute value carried by an event.
///
/// Upstream operators populate raw stream fields with these; attribute
/// processors write projected/aggregated results back as these. `Null`
/// represents an explicitly absent value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum AttributeValue {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    #[default]
    Null,
}

impl AttributeValue {
    pub fn as_string(&self) -> Option<&String> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Numeric view of the value, for arithmetic in aggregators and
    /// comparators. Strings parse if they hold a number.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(i) => Some(*i as f64),
            AttributeValue::Long(l) => Some(*l as f64),
            AttributeValue::Float(f) => Some(*f as f64),
            AttributeValue::Double(d) => Some(*d),
            AttributeValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            AttributeValue::String(s) => s.parse::<f64>().ok(),
            AttributeValue::Null => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Long(l) => write!(f, "{l}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Double(v) => write!(f, "{v}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Null => write!(f, "null"),
        }
    }
}
