//! Command Module
//!
//! Typed command invocations and their encoding into wire tokens.
//!
//! ## Structure
//! ```text
//! Command ──► verb ("CLIENT KILL")
//!         ├─► Parameter* ──encode──► token*
//!         └─► ResponseParser (optional, Default when unbound)
//! ```
//!
//! A Command is a transient value: build one per call, dispatch it, drop it.

mod parameter;

pub use parameter::{Address, EnumParameter, IntegerValue, Parameter};

use std::fmt;

use crate::error::{RedwireError, Result};
use crate::response::ResponseParser;

/// A command invocation: verb, ordered parameters and an optional parser
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Protocol keyword, possibly multi-word
    verb: String,

    /// Arguments in wire order
    parameters: Vec<Parameter>,

    /// Parser applied to the reply (Default when unbound)
    parser: Option<ResponseParser>,
}

impl Command {
    /// Create a command with no parameters
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            parameters: Vec::new(),
            parser: None,
        }
    }

    /// Create a command with the given parameters
    pub fn with_parameters(verb: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            verb: verb.into(),
            parameters,
            parser: None,
        }
    }

    /// Append one parameter
    pub fn arg(mut self, parameter: impl Into<Parameter>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Bind a response parser
    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parser(&self) -> Option<ResponseParser> {
        self.parser
    }

    /// Encode all parameters, left to right, into a ready-to-send command
    pub fn build(&self) -> Result<BuiltCommand> {
        check_verb(&self.verb)?;

        let mut tokens = Vec::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            parameter.encode_into(&mut tokens)?;
        }

        Ok(BuiltCommand {
            verb: self.verb.clone(),
            tokens,
            parser: self.parser.unwrap_or_default(),
        })
    }
}

/// Verbs must hold at least one word, nested or not
pub(crate) fn check_verb(verb: &str) -> Result<()> {
    if verb.trim().is_empty() {
        return Err(RedwireError::InvalidArgument(
            "command verb must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// A fully encoded command
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltCommand {
    /// Protocol keyword as given to the Command
    pub verb: String,

    /// Flattened argument tokens
    pub tokens: Vec<String>,

    /// Parser to apply to the reply
    pub parser: ResponseParser,
}

impl BuiltCommand {
    /// Verb words followed by tokens, exactly as framed on the wire
    pub fn wire_args(&self) -> Vec<String> {
        self.verb
            .split_whitespace()
            .map(str::to_string)
            .chain(self.tokens.iter().cloned())
            .collect()
    }
}

impl fmt::Display for BuiltCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        for token in &self.tokens {
            write!(f, " {}", token)?;
        }
        Ok(())
    }
}
