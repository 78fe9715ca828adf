//! Protocol codec
//!
//! Encoding of requests and decoding of replies for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<arg>\r\n      (repeated argc times)
//! ```
//!
//! ### Reply Format (first byte selects the shape)
//! ```text
//! +<status>\r\n
//! -<error message>\r\n
//! :<integer>\r\n
//! $<len>\r\n<bytes>\r\n    ($-1\r\n is nil)
//! *<count>\r\n<reply>...   (*-1\r\n is nil)
//! ```

use std::io::{BufRead, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::Config;
use crate::error::{RedwireError, Result};
use crate::response::Reply;

const CRLF: &[u8] = b"\r\n";

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode an argument list as a request
///
/// Format: `*argc` header followed by one bulk string per argument
pub fn encode_request<A: AsRef<[u8]>>(args: &[A]) -> Bytes {
    let payload_len: usize = args.iter().map(|a| a.as_ref().len() + 16).sum();
    let mut message = BytesMut::with_capacity(16 + payload_len);

    message.put_u8(b'*');
    message.put_slice(args.len().to_string().as_bytes());
    message.put_slice(CRLF);

    for arg in args {
        let arg = arg.as_ref();
        message.put_u8(b'$');
        message.put_slice(arg.len().to_string().as_bytes());
        message.put_slice(CRLF);
        message.put_slice(arg);
        message.put_slice(CRLF);
    }

    message.freeze()
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode one reply from the front of `bytes`
///
/// Returns the reply and the number of bytes consumed, or `None` when
/// `bytes` does not yet hold a complete reply.
pub fn decode_reply(bytes: &[u8], config: &Config) -> Result<Option<(Reply, usize)>> {
    decode_at(bytes, 0, config, 0)
}

fn decode_at(
    bytes: &[u8],
    pos: usize,
    config: &Config,
    depth: usize,
) -> Result<Option<(Reply, usize)>> {
    let (line, next) = match find_line(bytes, pos) {
        Some(found) => found,
        None => return Ok(None),
    };

    if line.is_empty() {
        return Err(RedwireError::Protocol("empty reply line".to_string()));
    }

    match Header::parse(line)? {
        Header::Done(reply) => Ok(Some((reply, next))),
        Header::Bulk(len) => {
            check_bulk_len(len, config)?;
            let end = next + len;
            if bytes.len() < end + CRLF.len() {
                return Ok(None);
            }
            if &bytes[end..end + CRLF.len()] != CRLF {
                return Err(RedwireError::Protocol(
                    "bulk string not terminated by CRLF".to_string(),
                ));
            }
            let data = Bytes::copy_from_slice(&bytes[next..end]);
            Ok(Some((Reply::Bulk(data), end + CRLF.len())))
        }
        Header::Array(count) => {
            check_array(count, depth, config)?;
            let mut items = Vec::with_capacity(count.min(1024));
            let mut cursor = next;
            for _ in 0..count {
                match decode_at(bytes, cursor, config, depth + 1)? {
                    Some((item, after)) => {
                        items.push(item);
                        cursor = after;
                    }
                    None => return Ok(None),
                }
            }
            Ok(Some((Reply::Array(items), cursor)))
        }
    }
}

/// Locate the CRLF-terminated line starting at `pos`
fn find_line(bytes: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    let rest = bytes.get(pos..)?;
    rest.windows(2)
        .position(|w| w == CRLF)
        .map(|i| (&rest[..i], pos + i + CRLF.len()))
}

/// A parsed reply header line
enum Header {
    /// The line is the whole reply
    Done(Reply),

    /// A bulk string of this many bytes follows
    Bulk(usize),

    /// An array of this many replies follows
    Array(usize),
}

impl Header {
    fn parse(line: &[u8]) -> Result<Self> {
        let body = &line[1..];
        match line[0] {
            b'+' => Ok(Header::Done(Reply::Status(text(body)?))),
            b'-' => Ok(Header::Done(Reply::Error(text(body)?))),
            b':' => Ok(Header::Done(Reply::Integer(integer(body)?))),
            b'$' => match integer(body)? {
                -1 => Ok(Header::Done(Reply::Nil)),
                len if len >= 0 => Ok(Header::Bulk(len as usize)),
                len => Err(RedwireError::Protocol(format!("invalid bulk length {}", len))),
            },
            b'*' => match integer(body)? {
                -1 => Ok(Header::Done(Reply::Nil)),
                0 => Ok(Header::Done(Reply::Array(Vec::new()))),
                count if count > 0 => Ok(Header::Array(count as usize)),
                count => Err(RedwireError::Protocol(format!("invalid array length {}", count))),
            },
            other => Err(RedwireError::Protocol(format!(
                "Unknown reply type: 0x{:02x}",
                other
            ))),
        }
    }
}

fn text(body: &[u8]) -> Result<String> {
    String::from_utf8(body.to_vec())
        .map_err(|_| RedwireError::Protocol("reply line is not valid UTF-8".to_string()))
}

fn integer(body: &[u8]) -> Result<i64> {
    std::str::from_utf8(body)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            RedwireError::Protocol(format!(
                "invalid integer '{}'",
                String::from_utf8_lossy(body)
            ))
        })
}

fn check_bulk_len(len: usize, config: &Config) -> Result<()> {
    if len > config.max_bulk_len {
        tracing::warn!("Rejecting bulk reply of {} bytes", len);
        return Err(RedwireError::Protocol(format!(
            "Bulk string too large: {} bytes (max {})",
            len, config.max_bulk_len
        )));
    }
    Ok(())
}

fn check_array(count: usize, depth: usize, config: &Config) -> Result<()> {
    if count > config.max_array_len {
        tracing::warn!("Rejecting array reply of {} elements", count);
        return Err(RedwireError::Protocol(format!(
            "Array too large: {} elements (max {})",
            count, config.max_array_len
        )));
    }
    if depth >= config.max_depth {
        tracing::warn!("Rejecting array reply nested {} levels deep", depth + 1);
        return Err(RedwireError::Protocol(format!(
            "Array nesting too deep (max {})",
            config.max_depth
        )));
    }
    Ok(())
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete reply from a stream
///
/// Blocks until a complete reply is received or an error occurs
pub fn read_reply<R: BufRead>(reader: &mut R, config: &Config) -> Result<Reply> {
    read_reply_at(reader, config, 0)
}

fn read_reply_at<R: BufRead>(reader: &mut R, config: &Config, depth: usize) -> Result<Reply> {
    let mut line = Vec::new();
    let read = reader.read_until(b'\n', &mut line)?;
    if read == 0 {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    if !line.ends_with(CRLF) || line.len() < 3 {
        return Err(RedwireError::Protocol(format!(
            "malformed reply line: {:?}",
            String::from_utf8_lossy(&line)
        )));
    }
    line.truncate(line.len() - CRLF.len());

    match Header::parse(&line)? {
        Header::Done(reply) => Ok(reply),
        Header::Bulk(len) => {
            check_bulk_len(len, config)?;
            let mut data = vec![0u8; len + CRLF.len()];
            reader.read_exact(&mut data)?;
            if &data[len..] != CRLF {
                return Err(RedwireError::Protocol(
                    "bulk string not terminated by CRLF".to_string(),
                ));
            }
            data.truncate(len);
            Ok(Reply::Bulk(Bytes::from(data)))
        }
        Header::Array(count) => {
            check_array(count, depth, config)?;
            let mut items = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                items.push(read_reply_at(reader, config, depth + 1)?);
            }
            Ok(Reply::Array(items))
        }
    }
}

/// Write a request to a stream
pub fn write_request<W: Write, A: AsRef<[u8]>>(writer: &mut W, args: &[A]) -> Result<()> {
    let bytes = encode_request(args);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
