//! Command Tests
//!
//! Tests verify:
//! - Left-to-right flattening of parameters
//! - Verb-only commands
//! - Parser binding and the Default fallback
//! - Wire argument layout for multi-word verbs
//! - Errors surface before anything is sent

use redwire::{Command, EnumParameter, Parameter, RedwireError, ResponseParser};

// =============================================================================
// Assembly Tests
// =============================================================================

#[test]
fn test_verb_only_command() {
    let built = Command::new("DBSIZE").build().unwrap();

    assert_eq!(built.verb, "DBSIZE");
    assert!(built.tokens.is_empty());
    assert_eq!(built.parser, ResponseParser::Default);
    assert_eq!(built.wire_args(), vec!["DBSIZE"]);
}

#[test]
fn test_parameters_flatten_in_order() {
    let built = Command::new("CLIENT KILL")
        .arg(Parameter::address("127.0.0.1:6379"))
        .arg(Parameter::string("ID"))
        .arg(Parameter::integer(12))
        .arg(Parameter::string("SKIPME"))
        .arg(Parameter::flag(false))
        .build()
        .unwrap();

    assert_eq!(
        built.tokens,
        vec!["127.0.0.1:6379", "ID", "12", "SKIPME", "no"]
    );
}

#[test]
fn test_multi_token_parameters_keep_internal_order() {
    let built = Command::with_parameters(
        "MSETLIKE",
        vec![
            Parameter::keys(["k1", "k2"]),
            Parameter::strings(["v1", "v2", "v3"]),
            Parameter::key("k3"),
        ],
    )
    .build()
    .unwrap();

    assert_eq!(built.tokens, vec!["k1", "k2", "v1", "v2", "v3", "k3"]);
}

#[test]
fn test_empty_enum_contributes_no_token() {
    let built = Command::new("SHUTDOWN")
        .arg(EnumParameter::new(None::<&str>, ["", "NOSAVE", "SAVE"]).with_default(0))
        .build()
        .unwrap();

    assert!(built.tokens.is_empty());
    assert_eq!(built.wire_args(), vec!["SHUTDOWN"]);
}

#[test]
fn test_nested_command_at_its_position() {
    let built = Command::new("OUTER")
        .arg(Parameter::string("before"))
        .arg(Command::new("GET").arg(Parameter::key("foo")))
        .arg(Parameter::string("after"))
        .build()
        .unwrap();

    assert_eq!(built.tokens, vec!["before", "GET", "foo", "after"]);
}

// =============================================================================
// Wire Layout Tests
// =============================================================================

#[test]
fn test_multi_word_verb_splits_on_wire() {
    let built = Command::new("CONFIG GET").arg(Parameter::string("maxmemory")).build().unwrap();

    assert_eq!(built.verb, "CONFIG GET");
    assert_eq!(built.tokens, vec!["maxmemory"]);
    assert_eq!(built.wire_args(), vec!["CONFIG", "GET", "maxmemory"]);
}

#[test]
fn test_display() {
    let built = Command::new("CLIENT SETNAME").arg(Parameter::string("worker-1")).build().unwrap();
    assert_eq!(built.to_string(), "CLIENT SETNAME worker-1");
}

// =============================================================================
// Parser Binding Tests
// =============================================================================

#[test]
fn test_bound_parser_is_carried() {
    let command = Command::new("TIME").with_parser(ResponseParser::time());
    assert_eq!(command.parser(), Some(ResponseParser::Time));
    assert_eq!(command.build().unwrap().parser, ResponseParser::Time);
}

#[test]
fn test_unbound_parser_defaults() {
    let command = Command::new("PING");
    assert_eq!(command.parser(), None);
    assert_eq!(command.build().unwrap().parser, ResponseParser::default_parser());
}

#[test]
fn test_shared_parser_across_commands() {
    let parser = ResponseParser::assoc_array();
    let a = Command::new("CONFIG GET").arg(Parameter::string("a")).with_parser(parser);
    let b = Command::new("HGETALL").arg(Parameter::key("h")).with_parser(parser);

    assert_eq!(a.build().unwrap().parser, b.build().unwrap().parser);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_empty_verb_fails() {
    for verb in ["", "   "] {
        let result = Command::new(verb).build();
        assert!(matches!(result, Err(RedwireError::InvalidArgument(_))));
    }
}

#[test]
fn test_first_failing_parameter_fails_build() {
    let result = Command::new("SLOWLOG")
        .arg(EnumParameter::new(Some("TRUNCATE"), ["GET", "LEN", "RESET"]))
        .arg(Parameter::integer("x"))
        .build();

    match result {
        Err(e @ RedwireError::InvalidArgument(_)) => assert!(e.is_argument_error()),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_build_is_repeatable() {
    let command = Command::new("COMMAND INFO").arg(Parameter::strings(["get", "set"]));
    assert_eq!(command.build().unwrap(), command.build().unwrap());
}
