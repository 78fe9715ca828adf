//! Server Command Tests
//!
//! Each command method must build the right wire arguments and bind the
//! right parser. A recording dispatcher captures what would be sent.

use std::collections::VecDeque;

use redwire::{
    Address, Client, ClientKillFilter, Command, Dispatcher, Parameter, RedwireError, Reply,
    ServerCommands, Value,
};

// =============================================================================
// Helper Functions
// =============================================================================

struct Recorder {
    sent: Vec<Vec<String>>,
    replies: VecDeque<Reply>,
}

impl Dispatcher for Recorder {
    fn dispatch(&mut self, args: &[String]) -> redwire::Result<Reply> {
        self.sent.push(args.to_vec());
        Ok(self.replies.pop_front().unwrap_or(Reply::Status("OK".into())))
    }
}

type Call = fn(&Client<Recorder>) -> redwire::Result<Value>;

fn client() -> Client<Recorder> {
    client_replying(vec![])
}

fn client_replying(replies: Vec<Reply>) -> Client<Recorder> {
    Client::new(Recorder {
        sent: Vec::new(),
        replies: replies.into(),
    })
}

fn last_sent(client: Client<Recorder>) -> Vec<String> {
    client.into_inner().sent.pop().expect("a request was sent")
}

fn bulk(s: &str) -> Reply {
    Reply::bulk(s.as_bytes().to_vec())
}

// =============================================================================
// Verb-Only Commands
// =============================================================================

#[test]
fn test_verb_only_commands() {
    let cases: [(Call, &[&str]); 17] = [
        (|c| c.bgrewriteaof(), &["BGREWRITEAOF"]),
        (|c| c.bgsave(), &["BGSAVE"]),
        (|c| c.client_getname(), &["CLIENT", "GETNAME"]),
        (|c| c.client_list(), &["CLIENT", "LIST"]),
        (|c| c.command(), &["COMMAND"]),
        (|c| c.command_count(), &["COMMAND", "COUNT"]),
        (|c| c.config_resetstat(), &["CONFIG", "RESETSTAT"]),
        (|c| c.config_rewrite(), &["CONFIG", "REWRITE"]),
        (|c| c.dbsize(), &["DBSIZE"]),
        (|c| c.debug_segfault(), &["DEBUG", "SEGFAULT"]),
        (|c| c.flushall(), &["FLUSHALL"]),
        (|c| c.flushdb(), &["FLUSHDB"]),
        (|c| c.lastsave(), &["LASTSAVE"]),
        (|c| c.monitor(), &["MONITOR"]),
        (|c| c.role(), &["ROLE"]),
        (|c| c.save(), &["SAVE"]),
        (|c| c.sync(), &["SYNC"]),
    ];

    for (call, expected) in cases {
        let c = client();
        call(&c).unwrap();
        assert_eq!(last_sent(c), expected);
    }
}

// =============================================================================
// CLIENT Commands
// =============================================================================

#[test]
fn test_client_kill_legacy_address() {
    let c = client();
    c.client_kill(ClientKillFilter {
        addr: Some(Address::from("127.0.0.1:51234")),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(last_sent(c), vec!["CLIENT", "KILL", "127.0.0.1:51234"]);
}

#[test]
fn test_client_kill_all_filters() {
    let c = client_replying(vec![Reply::Integer(2)]);
    let killed = c
        .client_kill(ClientKillFilter {
            addr: None,
            id: Some(42),
            client_type: Some(" PubSub ".into()),
            addr_filter: Some(Address::from(("10.0.0.1", 6000))),
            skip_me: Some(false),
        })
        .unwrap();

    assert_eq!(killed, Value::Integer(2));
    assert_eq!(
        last_sent(c),
        vec![
            "CLIENT", "KILL", "ID", "42", "TYPE", "pubsub", "ADDR", "10.0.0.1:6000", "SKIPME",
            "no"
        ]
    );
}

#[test]
fn test_client_kill_id_zero_is_sent() {
    let c = client_replying(vec![Reply::Integer(0)]);
    c.client_kill(ClientKillFilter {
        id: Some(0),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(last_sent(c), vec!["CLIENT", "KILL", "ID", "0"]);
}

#[test]
fn test_client_kill_bad_type_rejected() {
    let c = client();
    let result = c.client_kill(ClientKillFilter {
        client_type: Some("master".into()),
        ..Default::default()
    });

    assert!(matches!(result, Err(RedwireError::InvalidArgument(_))));
    assert!(c.into_inner().sent.is_empty());
}

#[test]
fn test_client_kill_bad_address_rejected() {
    let c = client();
    let result = c.client_kill(ClientKillFilter {
        addr: Some(Address::from("localhost")),
        ..Default::default()
    });

    assert!(matches!(result, Err(RedwireError::InvalidArgument(_))));
}

#[test]
fn test_client_pause_and_setname() {
    let c = client();
    c.client_pause(1500).unwrap();
    assert_eq!(last_sent(c), vec!["CLIENT", "PAUSE", "1500"]);

    let c = client();
    c.client_setname("reporting").unwrap();
    assert_eq!(last_sent(c), vec!["CLIENT", "SETNAME", "reporting"]);
}

// =============================================================================
// COMMAND Introspection
// =============================================================================

#[test]
fn test_command_getkeys_nests_command() {
    let c = client_replying(vec![Reply::Array(vec![bulk("a"), bulk("b")])]);
    let keys = c
        .command_getkeys(Command::new("MSET").arg(Parameter::strings(["a", "1", "b", "2"])))
        .unwrap();

    assert_eq!(
        keys,
        Value::Array(vec![Value::String("a".into()), Value::String("b".into())])
    );
    assert_eq!(
        last_sent(c),
        vec!["COMMAND", "GETKEYS", "MSET", "a", "1", "b", "2"]
    );
}

#[test]
fn test_command_info_names() {
    let c = client();
    c.command_info(&["get", "set"]).unwrap();
    assert_eq!(last_sent(c), vec!["COMMAND", "INFO", "get", "set"]);
}

// =============================================================================
// CONFIG Commands
// =============================================================================

#[test]
fn test_config_get_returns_map() {
    let c = client_replying(vec![Reply::Array(vec![bulk("timeout"), bulk("300")])]);
    let value = c.config_get("timeout").unwrap();

    assert_eq!(value.as_map().unwrap()["timeout"].as_str(), Some("300"));
    assert_eq!(last_sent(c), vec!["CONFIG", "GET", "timeout"]);
}

#[test]
fn test_config_get_odd_reply_is_protocol_error() {
    let c = client_replying(vec![Reply::Array(vec![bulk("timeout")])]);
    assert!(matches!(c.config_get("timeout"), Err(RedwireError::Protocol(_))));
}

#[test]
fn test_config_set_sends_parameter_and_value() {
    let c = client();
    assert_eq!(c.config_set("maxmemory", "100mb").unwrap(), Value::Bool(true));
    assert_eq!(last_sent(c), vec!["CONFIG", "SET", "maxmemory", "100mb"]);
}

// =============================================================================
// Other Commands
// =============================================================================

#[test]
fn test_debug_object_key() {
    let c = client();
    c.debug_object("session:1").unwrap();
    assert_eq!(last_sent(c), vec!["DEBUG", "OBJECT", "session:1"]);
}

#[test]
fn test_info_optional_section() {
    let c = client();
    c.info(None).unwrap();
    assert_eq!(last_sent(c), vec!["INFO"]);

    let c = client();
    c.info(Some("memory")).unwrap();
    assert_eq!(last_sent(c), vec!["INFO", "memory"]);
}

#[test]
fn test_shutdown_modes() {
    let cases = [
        (None, vec!["SHUTDOWN"]),
        (Some(""), vec!["SHUTDOWN"]),
        (Some("save"), vec!["SHUTDOWN", "SAVE"]),
        (Some(" NoSave "), vec!["SHUTDOWN", "NOSAVE"]),
    ];

    for (mode, expected) in cases {
        let c = client();
        c.shutdown(mode).unwrap();
        assert_eq!(last_sent(c), expected, "mode {:?}", mode);
    }
}

#[test]
fn test_shutdown_invalid_mode() {
    let c = client();
    assert!(matches!(c.shutdown(Some("now")), Err(RedwireError::InvalidArgument(_))));
}

#[test]
fn test_slaveof() {
    let c = client();
    c.slaveof("NO", "ONE").unwrap();
    assert_eq!(last_sent(c), vec!["SLAVEOF", "NO", "ONE"]);
}

#[test]
fn test_slowlog() {
    let c = client_replying(vec![Reply::Array(vec![])]);
    c.slowlog("get", Some("10")).unwrap();
    assert_eq!(last_sent(c), vec!["SLOWLOG", "GET", "10"]);

    let c = client_replying(vec![Reply::Integer(3)]);
    assert_eq!(c.slowlog("len", None).unwrap(), Value::Integer(3));
    assert_eq!(last_sent(c), vec!["SLOWLOG", "LEN"]);

    let c = client();
    assert!(matches!(c.slowlog("flush", None), Err(RedwireError::InvalidArgument(_))));
}

#[test]
fn test_time_binds_time_parser() {
    let c = client_replying(vec![Reply::Array(vec![bulk("1000"), bulk("500000")])]);
    let value = c.time().unwrap();

    assert_eq!(value.as_epoch_secs(), Some(1000.5));
    assert_eq!(last_sent(c), vec!["TIME"]);
}

#[test]
fn test_remote_error_from_server_command() {
    let c = client_replying(vec![Reply::Error("ERR Background save already in progress".into())]);
    match c.bgsave() {
        Err(RedwireError::Remote(msg)) => assert!(msg.contains("already in progress")),
        other => panic!("Expected remote error, got {:?}", other),
    }
}
