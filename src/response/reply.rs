//! Raw reply definitions
//!
//! The reply shapes a server can send, before any interpretation.

use bytes::Bytes;

/// A raw protocol reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Simple string (`+OK`)
    Status(String),

    /// Integer (`:1000`)
    Integer(i64),

    /// Bulk string (`$6\r\nfoobar`)
    Bulk(Bytes),

    /// Nil bulk string or nil array (`$-1`, `*-1`)
    Nil,

    /// Array of replies, possibly nested
    Array(Vec<Reply>),

    /// Error reported by the server (`-ERR ...`)
    Error(String),
}

impl Reply {
    /// Create a bulk reply from anything byte-like
    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Reply::Bulk(data.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Short name of the shape, used in error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Reply::Status(_) => "status",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk string",
            Reply::Nil => "nil",
            Reply::Array(_) => "array",
            Reply::Error(_) => "error",
        }
    }

    /// Text of a scalar reply (status, integer or UTF-8 bulk)
    pub fn as_text(&self) -> Option<String> {
        match self {
            Reply::Status(s) => Some(s.clone()),
            Reply::Integer(n) => Some(n.to_string()),
            Reply::Bulk(b) => std::str::from_utf8(b).ok().map(str::to_string),
            _ => None,
        }
    }
}
