//! # redwire
//!
//! Typed command encoding and reply decoding for Redis-style
//! request/reply protocols:
//! - Parameters that validate and encode typed arguments into tokens
//! - Commands that flatten parameters into wire-ready argument lists
//! - Response parsers that turn raw replies into typed values
//! - A dispatcher boundary for whatever owns the connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Command methods (ServerCommands)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command { verb, Parameter*, parser }
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Client::execute                          │
//! └──────────┬──────────────────────────────────────▲───────────┘
//!            │ wire args                            │ Value
//!            ▼                                      │
//!   ┌─────────────────┐                    ┌────────┴────────┐
//!   │   Dispatcher    │ ───── Reply ─────► │ ResponseParser  │
//!   │ (codec + stream)│                    │ Default / Assoc │
//!   └─────────────────┘                    │ Array / Time    │
//!                                          └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use redwire::{Command, EnumParameter, Parameter};
//!
//! let built = Command::new("SHUTDOWN")
//!     .arg(EnumParameter::new(Some(" save "), ["", "NOSAVE", "SAVE"]).with_default(0))
//!     .build()
//!     .unwrap();
//! assert_eq!(built.wire_args(), vec!["SHUTDOWN", "SAVE"]);
//!
//! let nested = Command::new("COMMAND GETKEYS")
//!     .arg(Command::new("GET").arg(Parameter::key("foo")))
//!     .build()
//!     .unwrap();
//! assert_eq!(nested.tokens, vec!["GET", "foo"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod command;
pub mod response;
pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RedwireError, Result};
pub use config::Config;
pub use command::{Address, BuiltCommand, Command, EnumParameter, IntegerValue, Parameter};
pub use response::{decode, Reply, ResponseParser, Value};
pub use client::{Client, ClientKillFilter, Dispatcher, ServerCommands, StreamDispatcher};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of redwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
