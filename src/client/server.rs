//! Server administration commands
//!
//! Every method builds one Command and hands it to `execute`; nothing else.

use crate::command::{Address, Command, EnumParameter, Parameter};
use crate::error::Result;
use crate::response::{ResponseParser, Value};
use super::{Client, Dispatcher};

/// Filters for `CLIENT KILL`
///
/// Every field is optional; set fields are sent in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ClientKillFilter {
    /// Legacy form: kill the client at this address
    pub addr: Option<Address>,

    /// `ID <client-id>`, sent whenever set (including 0)
    pub id: Option<u64>,

    /// `TYPE normal|slave|pubsub`
    pub client_type: Option<String>,

    /// `ADDR <ip:port>`
    pub addr_filter: Option<Address>,

    /// `SKIPME yes|no`
    pub skip_me: Option<bool>,
}

impl ClientKillFilter {
    fn into_parameters(self) -> Vec<Parameter> {
        let mut params = Vec::new();
        if let Some(addr) = self.addr {
            params.push(Parameter::Address(addr));
        }
        if let Some(id) = self.id {
            params.push(Parameter::string("ID"));
            params.push(Parameter::integer(id));
        }
        if let Some(client_type) = self.client_type {
            params.push(Parameter::string("TYPE"));
            params.push(Parameter::enumeration(EnumParameter::new(
                Some(client_type),
                ["normal", "slave", "pubsub"],
            )));
        }
        if let Some(addr) = self.addr_filter {
            params.push(Parameter::string("ADDR"));
            params.push(Parameter::Address(addr));
        }
        if let Some(skip_me) = self.skip_me {
            params.push(Parameter::string("SKIPME"));
            params.push(Parameter::flag(skip_me));
        }
        params
    }
}

/// Server commands (`BGSAVE`, `CLIENT *`, `CONFIG *`, `SHUTDOWN`, `TIME`, ...)
pub trait ServerCommands {
    /// Dispatch a command and decode its reply
    fn execute(&self, command: Command) -> Result<Value>;

    fn bgrewriteaof(&self) -> Result<Value> {
        self.execute(Command::new("BGREWRITEAOF"))
    }

    fn bgsave(&self) -> Result<Value> {
        self.execute(Command::new("BGSAVE"))
    }

    /// Connection name, or `Value::Nil` if none is set
    fn client_getname(&self) -> Result<Value> {
        self.execute(Command::new("CLIENT GETNAME"))
    }

    /// `Value::Bool(true)` for the legacy address form, otherwise the number
    /// of clients killed
    fn client_kill(&self, filter: ClientKillFilter) -> Result<Value> {
        self.execute(Command::with_parameters(
            "CLIENT KILL",
            filter.into_parameters(),
        ))
    }

    fn client_list(&self) -> Result<Value> {
        self.execute(Command::new("CLIENT LIST"))
    }

    fn client_pause(&self, timeout_ms: u64) -> Result<Value> {
        self.execute(Command::new("CLIENT PAUSE").arg(Parameter::integer(timeout_ms)))
    }

    fn client_setname(&self, name: &str) -> Result<Value> {
        self.execute(Command::new("CLIENT SETNAME").arg(Parameter::string(name)))
    }

    fn command(&self) -> Result<Value> {
        self.execute(Command::new("COMMAND"))
    }

    fn command_count(&self) -> Result<Value> {
        self.execute(Command::new("COMMAND COUNT"))
    }

    /// Keys the server would extract from `command`
    fn command_getkeys(&self, command: Command) -> Result<Value> {
        self.execute(Command::new("COMMAND GETKEYS").arg(Parameter::command(command)))
    }

    fn command_info(&self, names: &[&str]) -> Result<Value> {
        self.execute(Command::new("COMMAND INFO").arg(Parameter::strings(names.iter().copied())))
    }

    /// Matching configuration parameters as `Value::Map`
    fn config_get(&self, parameter: &str) -> Result<Value> {
        self.execute(
            Command::new("CONFIG GET")
                .arg(Parameter::string(parameter))
                .with_parser(ResponseParser::assoc_array()),
        )
    }

    fn config_resetstat(&self) -> Result<Value> {
        self.execute(Command::new("CONFIG RESETSTAT"))
    }

    fn config_rewrite(&self) -> Result<Value> {
        self.execute(Command::new("CONFIG REWRITE"))
    }

    fn config_set(&self, parameter: &str, value: &str) -> Result<Value> {
        self.execute(
            Command::new("CONFIG SET")
                .arg(Parameter::string(parameter))
                .arg(Parameter::string(value)),
        )
    }

    fn dbsize(&self) -> Result<Value> {
        self.execute(Command::new("DBSIZE"))
    }

    fn debug_object(&self, key: &str) -> Result<Value> {
        self.execute(Command::new("DEBUG OBJECT").arg(Parameter::key(key)))
    }

    fn debug_segfault(&self) -> Result<Value> {
        self.execute(Command::new("DEBUG SEGFAULT"))
    }

    fn flushall(&self) -> Result<Value> {
        self.execute(Command::new("FLUSHALL"))
    }

    fn flushdb(&self) -> Result<Value> {
        self.execute(Command::new("FLUSHDB"))
    }

    fn info(&self, section: Option<&str>) -> Result<Value> {
        let mut command = Command::new("INFO");
        if let Some(section) = section {
            command = command.arg(Parameter::string(section));
        }
        self.execute(command)
    }

    /// Unix timestamp of the last successful save
    fn lastsave(&self) -> Result<Value> {
        self.execute(Command::new("LASTSAVE"))
    }

    fn monitor(&self) -> Result<Value> {
        self.execute(Command::new("MONITOR"))
    }

    fn role(&self) -> Result<Value> {
        self.execute(Command::new("ROLE"))
    }

    fn save(&self) -> Result<Value> {
        self.execute(Command::new("SAVE"))
    }

    /// `mode` is `NOSAVE`, `SAVE`, or `None` for the server default
    fn shutdown(&self, mode: Option<&str>) -> Result<Value> {
        self.execute(Command::new("SHUTDOWN").arg(
            EnumParameter::new(mode, ["", "NOSAVE", "SAVE"]).with_default(0),
        ))
    }

    /// `slaveof("NO", "ONE")` turns replication off
    fn slaveof(&self, host: &str, port: &str) -> Result<Value> {
        self.execute(
            Command::new("SLAVEOF")
                .arg(Parameter::string(host))
                .arg(Parameter::string(port)),
        )
    }

    fn slowlog(&self, subcommand: &str, argument: Option<&str>) -> Result<Value> {
        let mut command = Command::new("SLOWLOG").arg(EnumParameter::new(
            Some(subcommand),
            ["GET", "LEN", "RESET"],
        ));
        if let Some(argument) = argument {
            command = command.arg(Parameter::string(argument));
        }
        self.execute(command)
    }

    fn sync(&self) -> Result<Value> {
        self.execute(Command::new("SYNC"))
    }

    /// Server clock as `Value::Time`
    fn time(&self) -> Result<Value> {
        self.execute(Command::new("TIME").with_parser(ResponseParser::time()))
    }
}

impl<D: Dispatcher> ServerCommands for Client<D> {
    fn execute(&self, command: Command) -> Result<Value> {
        Client::execute(self, command)
    }
}

