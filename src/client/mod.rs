//! Client Module
//!
//! The single entry point every command method goes through.
//!
//! ## Flow
//! ```text
//! Command ──build──► wire args ──Dispatcher──► Reply ──ResponseParser──► Value
//! ```
//!
//! ## Concurrency
//! - Building and parsing run on the caller's thread, no locks
//! - The dispatcher sits behind a mutex: one request in flight per client

mod dispatcher;
mod server;

pub use dispatcher::{Dispatcher, StreamDispatcher};
pub use server::{ClientKillFilter, ServerCommands};

use parking_lot::Mutex;

use crate::command::Command;
use crate::error::Result;
use crate::response::{decode, Value};

/// Executes commands over a dispatcher
pub struct Client<D> {
    dispatcher: Mutex<D>,
}

impl<D: Dispatcher> Client<D> {
    /// Create a client over the given dispatcher
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher: Mutex::new(dispatcher),
        }
    }

    /// Encode, send and decode one command
    ///
    /// Argument errors are raised before anything is sent. Error replies
    /// come back as `RedwireError::Remote` whatever parser is bound.
    pub fn execute(&self, command: Command) -> Result<Value> {
        let built = command.build()?;
        let args = built.wire_args();

        tracing::debug!("Executing {}", built.verb);
        tracing::trace!("Wire args: {:?}", args);

        // Lock held for exactly one request/reply exchange
        let reply = self.dispatcher.lock().dispatch(&args)?;

        decode(reply, built.parser)
    }

    /// Unwrap the dispatcher
    pub fn into_inner(self) -> D {
        self.dispatcher.into_inner()
    }
}
