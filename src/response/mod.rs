//! Response Module
//!
//! Turns raw protocol replies into typed values.
//!
//! ## Reply Shapes
//! - `+` status        -> `Value::Bool(true)` for `OK`, `Value::Status` otherwise
//! - `:` integer       -> `Value::Integer`
//! - `$` bulk string   -> `Value::String` (or `Value::Bytes` if not UTF-8)
//! - `$-1` / `*-1` nil -> `Value::Nil`
//! - `*` array         -> `Value::Array`, or whatever the bound parser builds
//! - `-` error         -> `RedwireError::Remote`, never handed to a parser

mod reply;
mod value;
mod parser;

pub use reply::Reply;
pub use value::Value;
pub use parser::{decode, ResponseParser};
