//! Protocol Module
//!
//! Byte-level framing of requests and replies.
//!
//! Commands and parsers only deal in tokens and reply shapes; this module is
//! where those meet the bytes on the wire. See [`codec`] for the format.

pub mod codec;

pub use codec::{decode_reply, encode_request, read_reply, write_request};
