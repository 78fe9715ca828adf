//! Decoded value definitions

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;

/// A decoded reply
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `+OK`
    Bool(bool),

    /// Any other status text
    Status(String),

    /// Integer reply
    Integer(i64),

    /// UTF-8 bulk string
    String(String),

    /// Bulk string that is not valid UTF-8
    Bytes(Bytes),

    /// Explicit absence (nil bulk or nil array)
    Nil,

    /// Array reply, each element decoded in turn
    Array(Vec<Value>),

    /// Flat key/value array folded into a map
    Map(HashMap<String, Value>),

    /// Server time
    Time(SystemTime),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrow the text of a status or string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Status(s) | Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<SystemTime> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Time value as seconds since the Unix epoch, with sub-second precision
    pub fn as_epoch_secs(&self) -> Option<f64> {
        self.as_time()
            .map(|t| t.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_secs_f64())
    }
}
