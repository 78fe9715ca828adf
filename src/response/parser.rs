//! Response parsers
//!
//! Each parser turns one raw reply into a typed value. Parsers carry no
//! state, so a single value can be shared by any number of commands and
//! threads.

use std::collections::HashMap;
use std::time::{Duration, UNIX_EPOCH};

use crate::error::{RedwireError, Result};
use super::{Reply, Value};

/// Reply interpretation bound to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseParser {
    /// Map each reply shape to its natural value
    #[default]
    Default,

    /// Fold a flat `[k1, v1, k2, v2, ...]` array into a map
    AssocArray,

    /// Combine `[seconds, microseconds]` into a point in time
    Time,
}

impl ResponseParser {
    pub const fn default_parser() -> Self {
        ResponseParser::Default
    }

    pub const fn assoc_array() -> Self {
        ResponseParser::AssocArray
    }

    pub const fn time() -> Self {
        ResponseParser::Time
    }

    /// Parse a reply with this parser
    ///
    /// Error replies are surfaced as `Remote` before any shape logic runs.
    pub fn parse(&self, reply: Reply) -> Result<Value> {
        if let Reply::Error(message) = reply {
            return Err(RedwireError::Remote(message));
        }

        match self {
            ResponseParser::Default => default_value(reply),
            ResponseParser::AssocArray => assoc_array(reply),
            ResponseParser::Time => time(reply),
        }
    }
}

/// Decode a reply with the given parser
pub fn decode(reply: Reply, parser: ResponseParser) -> Result<Value> {
    parser.parse(reply)
}

fn default_value(reply: Reply) -> Result<Value> {
    Ok(match reply {
        Reply::Status(s) if s == "OK" => Value::Bool(true),
        Reply::Status(s) => Value::Status(s),
        Reply::Integer(n) => Value::Integer(n),
        Reply::Bulk(b) => match std::str::from_utf8(&b) {
            Ok(s) => Value::String(s.to_string()),
            Err(_) => Value::Bytes(b),
        },
        Reply::Nil => Value::Nil,
        Reply::Array(items) => Value::Array(
            items
                .into_iter()
                .map(default_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        Reply::Error(message) => return Err(RedwireError::Remote(message)),
    })
}

fn assoc_array(reply: Reply) -> Result<Value> {
    let items = match reply {
        Reply::Array(items) => items,
        other => {
            return Err(RedwireError::Protocol(format!(
                "expected array of key/value pairs, got {}",
                other.shape()
            )))
        }
    };

    if items.len() % 2 != 0 {
        return Err(RedwireError::Protocol(format!(
            "key/value array has odd length {}",
            items.len()
        )));
    }

    let mut map = HashMap::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        let key = key.as_text().ok_or_else(|| {
            RedwireError::Protocol(format!("map key must be a string, got {}", key.shape()))
        })?;
        map.insert(key, default_value(value)?);
    }

    Ok(Value::Map(map))
}

fn time(reply: Reply) -> Result<Value> {
    let items = match reply {
        Reply::Array(items) if items.len() == 2 => items,
        Reply::Array(items) => {
            return Err(RedwireError::Protocol(format!(
                "time reply must have 2 elements, got {}",
                items.len()
            )))
        }
        other => {
            return Err(RedwireError::Protocol(format!(
                "time reply must be an array, got {}",
                other.shape()
            )))
        }
    };

    let seconds = time_component(&items[0], "seconds")?;
    let micros = time_component(&items[1], "microseconds")?;

    Duration::from_secs(seconds)
        .checked_add(Duration::from_micros(micros))
        .and_then(|offset| UNIX_EPOCH.checked_add(offset))
        .map(Value::Time)
        .ok_or_else(|| {
            RedwireError::Protocol(format!(
                "time {}.{:06} is out of range",
                seconds, micros
            ))
        })
}

fn time_component(reply: &Reply, name: &str) -> Result<u64> {
    reply
        .as_text()
        .and_then(|text| text.trim().parse::<u64>().ok())
        .ok_or_else(|| {
            RedwireError::Protocol(format!("time {} is not numeric: {:?}", name, reply))
        })
}
