//! Dispatchers
//!
//! A dispatcher sends one request and hands back exactly one raw reply.
//! Connecting, reconnecting and retrying are left to whoever owns the stream.

use std::io::{BufReader, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::{RedwireError, Result};
use crate::protocol::{read_reply, write_request};
use crate::response::Reply;

/// Sends wire arguments and returns the raw reply
pub trait Dispatcher {
    /// Send `args` as one request and wait for its reply
    fn dispatch(&mut self, args: &[String]) -> Result<Reply>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn dispatch(&mut self, args: &[String]) -> Result<Reply> {
        (**self).dispatch(args)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for &mut D {
    fn dispatch(&mut self, args: &[String]) -> Result<Reply> {
        (**self).dispatch(args)
    }
}

/// Dispatcher over an already-connected byte stream
pub struct StreamDispatcher<S: Read + Write> {
    /// Stream, buffered for reading (writes go straight through)
    stream: BufReader<S>,

    /// Decoding limits
    config: Config,

    /// Peer address for logging
    peer_addr: String,

    /// Set once an exchange fails; the stream may hold part of a reply
    closed: bool,
}

impl<S: Read + Write> StreamDispatcher<S> {
    /// Wrap a connected stream
    pub fn new(stream: S, config: Config) -> Self {
        Self {
            stream: BufReader::new(stream),
            config,
            peer_addr: "stream".to_string(),
            closed: false,
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// True once a failed exchange has made the stream unusable
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    /// Unwrap the underlying stream
    ///
    /// Any reply bytes already buffered are lost.
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}

impl StreamDispatcher<TcpStream> {
    /// Wrap a connected TCP stream, applying the configured timeouts
    pub fn tcp(stream: TcpStream, config: Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        tracing::debug!("Dispatcher attached to {}", peer_addr);

        Ok(Self {
            stream: BufReader::new(stream),
            config,
            peer_addr,
            closed: false,
        })
    }
}

impl<S: Read + Write> Dispatcher for StreamDispatcher<S> {
    fn dispatch(&mut self, args: &[String]) -> Result<Reply> {
        if self.closed {
            return Err(RedwireError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                format!("connection to {} closed after a failed request", self.peer_addr),
            )));
        }

        let result = self.exchange(args);
        if result.is_err() {
            // Replies are paired by position; after a failure they no longer line up
            self.closed = true;
        }
        result
    }
}

impl<S: Read + Write> StreamDispatcher<S> {
    /// Send one request and read its reply
    fn exchange(&mut self, args: &[String]) -> Result<Reply> {
        if let Err(e) = write_request(self.stream.get_mut(), args) {
            tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
            return Err(e);
        }

        match read_reply(&mut self.stream, &self.config) {
            Ok(reply) => {
                tracing::trace!("Received {} reply from {}", reply.shape(), self.peer_addr);
                Ok(reply)
            }
            Err(RedwireError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                tracing::debug!("Connection closed by {}", self.peer_addr);
                Err(RedwireError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("connection closed by {}", self.peer_addr),
                )))
            }
            Err(RedwireError::Io(ref e))
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                // Read timeout (Windows uses TimedOut instead of WouldBlock)
                tracing::debug!("Read timeout waiting on {}", self.peer_addr);
                Err(RedwireError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("timed out waiting for reply from {}", self.peer_addr),
                )))
            }
            Err(e) => {
                tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                Err(e)
            }
        }
    }
}
