//! Parameter definitions
//!
//! A Parameter turns one typed argument into zero or more wire tokens.
//! Encoding is pure: the same Parameter always yields the same tokens.

use std::fmt;

use crate::error::{RedwireError, Result};
use super::{check_verb, Command};

/// A single typed command argument
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// One token, verbatim
    String(String),

    /// One token, decimal text of an integer
    Integer(IntegerValue),

    /// One key name
    Key(String),

    /// One token per key; at least one key is required
    Keys(Vec<String>),

    /// One token per string, order preserved
    Strings(Vec<String>),

    /// A value checked against a fixed set of allowed entries
    Enum(EnumParameter),

    /// A `host:port` address
    Address(Address),

    /// A boolean option sent as `yes` / `no`
    Flag(bool),

    /// Another command carried as payload (verb and arguments inline)
    Command(Box<Command>),
}

impl Parameter {
    pub fn string(value: impl Into<String>) -> Self {
        Parameter::String(value.into())
    }

    pub fn integer(value: impl Into<IntegerValue>) -> Self {
        Parameter::Integer(value.into())
    }

    pub fn key(key: impl Into<String>) -> Self {
        Parameter::Key(key.into())
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Parameter::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Parameter::Strings(values.into_iter().map(Into::into).collect())
    }

    pub fn enumeration(param: EnumParameter) -> Self {
        Parameter::Enum(param)
    }

    pub fn address(address: impl Into<Address>) -> Self {
        Parameter::Address(address.into())
    }

    pub fn flag(value: bool) -> Self {
        Parameter::Flag(value)
    }

    pub fn command(command: Command) -> Self {
        Parameter::Command(Box::new(command))
    }

    /// Encode this parameter into its wire tokens
    pub fn encode(&self) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        self.encode_into(&mut tokens)?;
        Ok(tokens)
    }

    /// Append this parameter's tokens to `out`
    ///
    /// On error nothing useful is left in `out`; callers discard it.
    pub(crate) fn encode_into(&self, out: &mut Vec<String>) -> Result<()> {
        match self {
            Parameter::String(s) | Parameter::Key(s) => out.push(s.clone()),
            Parameter::Integer(value) => out.push(value.to_token()?),
            Parameter::Keys(keys) => {
                if keys.is_empty() {
                    return Err(RedwireError::InvalidArgument(
                        "at least one key is required".to_string(),
                    ));
                }
                out.extend(keys.iter().cloned());
            }
            Parameter::Strings(values) => out.extend(values.iter().cloned()),
            Parameter::Enum(param) => {
                if let Some(token) = param.resolve()? {
                    out.push(token.to_string());
                }
            }
            Parameter::Address(address) => out.push(address.to_token()?),
            Parameter::Flag(value) => out.push(if *value { "yes" } else { "no" }.to_string()),
            Parameter::Command(command) => {
                check_verb(command.verb())?;
                out.extend(command.verb().split_whitespace().map(str::to_string));
                for param in command.parameters() {
                    param.encode_into(out)?;
                }
            }
        }
        Ok(())
    }
}

impl From<Command> for Parameter {
    fn from(command: Command) -> Self {
        Parameter::command(command)
    }
}

impl From<EnumParameter> for Parameter {
    fn from(param: EnumParameter) -> Self {
        Parameter::Enum(param)
    }
}

impl From<Address> for Parameter {
    fn from(address: Address) -> Self {
        Parameter::Address(address)
    }
}

// =============================================================================
// Integer
// =============================================================================

/// Input accepted by an integer parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerValue {
    /// A native integer
    Native(i64),

    /// Text that must parse as an integer
    Text(String),
}

impl IntegerValue {
    fn to_token(&self) -> Result<String> {
        match self {
            IntegerValue::Native(n) => Ok(n.to_string()),
            IntegerValue::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|_| {
                    RedwireError::Encoding(format!("'{}' is not a valid integer", text))
                }),
        }
    }
}

macro_rules! integer_from_native {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IntegerValue {
                fn from(n: $ty) -> Self {
                    IntegerValue::Native(i64::from(n))
                }
            }
        )*
    };
}

integer_from_native!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for IntegerValue {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => IntegerValue::Native(n),
            Err(_) => IntegerValue::Text(n.to_string()),
        }
    }
}

impl From<usize> for IntegerValue {
    fn from(n: usize) -> Self {
        IntegerValue::from(n as u64)
    }
}

impl From<&str> for IntegerValue {
    fn from(text: &str) -> Self {
        IntegerValue::Text(text.to_string())
    }
}

impl From<String> for IntegerValue {
    fn from(text: String) -> Self {
        IntegerValue::Text(text)
    }
}

// =============================================================================
// Enum
// =============================================================================

/// A value restricted to a fixed set of allowed entries
///
/// Matching trims the candidate and ignores case. The token sent is the
/// allowed entry as written in `allowed`; an empty entry sends nothing, which
/// models an optional flag that is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParameter {
    /// Candidate value supplied by the caller
    pub value: Option<String>,

    /// Allowed entries in canonical form
    pub allowed: Vec<String>,

    /// Entry used when the candidate is absent or blank
    pub default_index: Option<usize>,
}

impl EnumParameter {
    /// Create an enum parameter without a default
    pub fn new<V, I, S>(value: Option<V>, allowed: I) -> Self
    where
        V: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.map(Into::into),
            allowed: allowed.into_iter().map(Into::into).collect(),
            default_index: None,
        }
    }

    /// Use `allowed[index]` when the candidate is absent or blank
    pub fn with_default(mut self, index: usize) -> Self {
        self.default_index = Some(index);
        self
    }

    /// Resolve the candidate to its canonical allowed entry
    ///
    /// Returns `None` when the matched entry is the empty string.
    pub fn resolve(&self) -> Result<Option<&str>> {
        let candidate = self.value.as_deref().map(str::trim).unwrap_or("");

        if candidate.is_empty() {
            if let Some(index) = self.default_index {
                let entry = self.allowed.get(index).ok_or_else(|| {
                    RedwireError::InvalidArgument(format!(
                        "default index {} out of range for {}",
                        index,
                        AllowedSet(&self.allowed)
                    ))
                })?;
                return Ok(non_empty(entry));
            }
        }

        self.allowed
            .iter()
            .find(|entry| entry.trim().eq_ignore_ascii_case(candidate))
            .map(|entry| non_empty(entry))
            .ok_or_else(|| {
                RedwireError::InvalidArgument(format!(
                    "'{}' is not one of {}",
                    self.value.as_deref().unwrap_or(""),
                    AllowedSet(&self.allowed)
                ))
            })
    }
}

fn non_empty(entry: &str) -> Option<&str> {
    if entry.is_empty() {
        None
    } else {
        Some(entry)
    }
}

/// Formats an allowed set as `[a, b, c]` for error messages
struct AllowedSet<'a>(&'a [String]);

impl fmt::Display for AllowedSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", entry)?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Address
// =============================================================================

/// A network address argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Combined `host:port` text, validated on encode
    Combined(String),

    /// Separate host and port
    Pair { host: String, port: u16 },
}

impl Address {
    fn to_token(&self) -> Result<String> {
        match self {
            Address::Combined(text) => {
                let (host, port) = text.rsplit_once(':').ok_or_else(|| malformed(text))?;
                validate_host(host).map_err(|_| malformed(text))?;
                if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed(text));
                }
                port.parse::<u16>().map_err(|_| malformed(text))?;
                Ok(text.clone())
            }
            Address::Pair { host, port } => {
                validate_host(host)?;
                Ok(format!("{}:{}", host, port))
            }
        }
    }
}

fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(RedwireError::InvalidArgument(format!("invalid host '{}'", host)));
    }
    Ok(())
}

fn malformed(text: &str) -> RedwireError {
    RedwireError::InvalidArgument(format!("'{}' is not a valid host:port address", text))
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Address::Combined(text.to_string())
    }
}

impl From<String> for Address {
    fn from(text: String) -> Self {
        Address::Combined(text)
    }
}

impl<H: Into<String>> From<(H, u16)> for Address {
    fn from((host, port): (H, u16)) -> Self {
        Address::Pair { host: host.into(), port }
    }
}
