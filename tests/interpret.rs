use std::sync::Arc;
use std::thread;

use sieve_interp::config::InterpreterConfig;
use sieve_interp::mail::{CheckMailAdapter, MailAdapter};
use sieve_interp::model::action::Action;
use sieve_interp::sieve::comparator::{self, Comparator};
use sieve_interp::sieve::glob::glob_match;
use sieve_interp::sieve::{Argument, Command, Flow, Registries, Script, SieveError, SieveFactory, Test};

fn message() -> CheckMailAdapter {
    CheckMailAdapter::new()
        .with_header("From", "\"Mailing List\" <list@lists.example.org>")
        .with_header("To", "me@example.com")
        .with_header("Subject", "[announce] Release 2.0")
        .with_header("X-Spam-Score", "7")
        .with_size(12_000)
}

fn header_test(match_type: &str, name: &str, key: &str) -> Test {
    Test::new("header").with_args(vec![
        Argument::tag(match_type),
        Argument::string(name),
        Argument::string(key),
    ])
}

fn fileinto(mailbox: &str) -> Command {
    Command::new("fileinto").with_args(vec![Argument::string(mailbox)])
}

fn run(script: &Script) -> (Result<Flow, SieveError>, CheckMailAdapter) {
    let factory = SieveFactory::builtin();
    let mut mail = message();
    let result = factory.evaluate(script, &mut mail);
    (result, mail)
}

#[test]
fn test_mailing_list_filter() {
    let script = Script::new(vec![
        Command::new("require").with_args(vec![Argument::strings(["fileinto", "comparator-i;ascii-numeric"])]),
        Command::new("if")
            .with_test(Test::new("header").with_args(vec![
                Argument::tag("comparator"),
                Argument::string("i;ascii-numeric"),
                Argument::string("X-Spam-Score"),
                Argument::string("7"),
            ]))
            .with_block(vec![fileinto("Junk"), Command::new("stop")]),
        Command::new("keep"),
    ]);
    let (result, mail) = run(&script);
    assert_eq!(result.unwrap(), Flow::Stop);
    assert_eq!(mail.actions(), [Action::FileInto { mailbox: "Junk".into() }]);
}

#[test]
fn test_if_elsif_else_runs_exactly_one_branch() {
    let chain = |first: bool, second: bool| {
        Script::new(vec![
            Command::new("if")
                .with_test(Test::new(if first { "true" } else { "false" }))
                .with_block(vec![fileinto("A")]),
            Command::new("elsif")
                .with_test(Test::new(if second { "true" } else { "false" }))
                .with_block(vec![fileinto("B")]),
            Command::new("else").with_block(vec![fileinto("C")]),
        ])
    };
    for (first, second, expected) in [
        (true, true, "A"),
        (true, false, "A"),
        (false, true, "B"),
        (false, false, "C"),
    ] {
        let (result, mail) = run(&chain(first, second));
        result.unwrap();
        assert_eq!(mail.actions(), [Action::FileInto { mailbox: expected.into() }]);
    }
}

#[test]
fn test_nested_chains_do_not_interfere() {
    let script = Script::new(vec![
        Command::new("if").with_test(Test::new("false")).with_block(vec![fileinto("outer-if")]),
        Command::new("elsif").with_test(Test::new("true")).with_block(vec![
            Command::new("if").with_test(Test::new("true")).with_block(vec![fileinto("inner-if")]),
            Command::new("else").with_block(vec![fileinto("inner-else")]),
        ]),
        Command::new("else").with_block(vec![fileinto("outer-else")]),
    ]);
    let (result, mail) = run(&script);
    result.unwrap();
    assert_eq!(mail.actions(), [Action::FileInto { mailbox: "inner-if".into() }]);
}

#[test]
fn test_else_after_other_command_is_error() {
    let script = Script::new(vec![
        Command::new("if").with_test(Test::new("false")).with_block(vec![]),
        Command::new("keep"),
        Command::new("else").with_block(vec![fileinto("C")]).at(3, 1),
    ]);
    let (result, _) = run(&script);
    let err = result.err().unwrap();
    assert!(matches!(err, SieveError::Command { .. }));
    assert_eq!(err.coordinate().line, 3);
}

#[test]
fn test_require_after_other_command_is_error() {
    let script = Script::new(vec![
        Command::new("keep"),
        Command::new("require").with_args(vec![Argument::string("fileinto")]),
    ]);
    let (result, mail) = run(&script);
    assert!(matches!(result, Err(SieveError::Command { .. })));
    assert_eq!(mail.actions(), [Action::Keep]);
}

#[test]
fn test_require_unknown_feature() {
    let script = Script::new(vec![Command::new("require").with_args(vec![Argument::string("vacation")])]);
    let (result, _) = run(&script);
    assert!(matches!(result, Err(SieveError::Feature { .. })));
}

#[test]
fn test_reject_is_exclusive() {
    let reject = Command::new("reject").with_args(vec![Argument::string("Not wanted.\r\nGo away.")]);

    let (result, mail) = run(&Script::new(vec![reject.clone()]));
    result.unwrap();
    assert_eq!(mail.actions(), [Action::Reject { message: "Not wanted.\r\nGo away.".into() }]);

    let (result, _) = run(&Script::new(vec![reject.clone(), Command::new("keep")]));
    assert!(matches!(result, Err(SieveError::Command { .. })));

    let (result, _) = run(&Script::new(vec![Command::new("discard"), reject]));
    assert!(matches!(result, Err(SieveError::Command { .. })));
}

#[test]
fn test_stop_only_script_has_no_actions() {
    let (result, mail) = run(&Script::new(vec![Command::new("stop")]));
    assert_eq!(result.unwrap(), Flow::Stop);
    assert!(mail.actions().is_empty());
}

#[test]
fn test_empty_script_has_no_actions() {
    let (result, mail) = run(&Script::default());
    assert_eq!(result.unwrap(), Flow::Continue);
    assert!(mail.actions().is_empty());
}

#[test]
fn test_address_and_size_tests() {
    let script = Script::new(vec![
        Command::new("if")
            .with_test(Test::new("allof").with_tests(vec![
                Test::new("address").with_args(vec![
                    Argument::tag("domain"),
                    Argument::tag("matches"),
                    Argument::string("from"),
                    Argument::string("*.example.org"),
                ]),
                Test::new("size").with_args(vec![Argument::tag("under"), Argument::number(100 * 1024)]),
                Test::new("not").with_tests(vec![header_test("contains", "Subject", "urgent")]),
            ]))
            .with_block(vec![fileinto("Lists")]),
    ]);
    let (result, mail) = run(&script);
    result.unwrap();
    assert_eq!(mail.actions(), [Action::FileInto { mailbox: "Lists".into() }]);
}

#[test]
fn test_disabled_command_is_lookup_error() {
    let config = InterpreterConfig {
        disabled_commands: vec!["Redirect".into()],
        ..InterpreterConfig::default()
    };
    let factory = SieveFactory::from_config(&config);
    let script = Script::new(vec![
        Command::new("redirect").with_args(vec![Argument::string("a@example.com")]),
    ]);
    let mut mail = message();
    assert!(matches!(factory.evaluate(&script, &mut mail), Err(SieveError::Lookup { .. })));
    assert!(!factory.registries().commands().is_supported("redirect"));
}

#[test]
fn test_configured_default_comparator() {
    let config = InterpreterConfig {
        default_comparator: comparator::ASCII_CASEMAP.into(),
        ..InterpreterConfig::default()
    };
    let factory = SieveFactory::from_config(&config);
    let script = Script::new(vec![
        Command::new("if")
            .with_test(header_test("contains", "subject", "RELEASE"))
            .with_block(vec![Command::new("discard")]),
    ]);
    let mut mail = message();
    factory.evaluate(&script, &mut mail).unwrap();
    assert_eq!(mail.actions(), [Action::Discard]);
}

#[test]
fn test_comparator_laws() {
    let registries = Registries::builtin();
    let here = Default::default();
    let octet = registries.comparators().new_instance(comparator::OCTET, here).unwrap();
    let casemap = registries.comparators().new_instance(comparator::ASCII_CASEMAP, here).unwrap();
    let numeric = registries.comparators().new_instance(comparator::ASCII_NUMERIC, here).unwrap();

    for s in ["", "abc", "Mixed Case", "a*b?c"] {
        for c in [&octet, &casemap, &numeric] {
            assert!(c.equals(s, s));
            assert!(c.contains(s, ""));
            assert!(c.matches(s, s).unwrap());
        }
        assert!(octet.matches(s, "*").unwrap());
        assert!(casemap.matches(s, "*").unwrap());
    }
    // The numeric key rewrites the glob too, so `*` is just another non-digit.
    assert!(!numeric.matches("abc", "*").unwrap());
    assert!(casemap.equals("HELLO", "hello"));
    assert!(!octet.equals("HELLO", "hello"));
    assert!(numeric.equals("123", "123"));
    assert!(numeric.equals("12a", "12b"));
    assert!(!numeric.equals("12a", "13a"));
}

#[test]
fn test_glob_properties() {
    assert!(glob_match(b"", b""));
    assert!(glob_match(b"", b"*"));
    assert!(!glob_match(b"", b"?"));
    assert!(glob_match(b"anything", b"*"));
    assert!(glob_match(b"abc", b"a?c"));
    assert!(!glob_match(b"abc", b"a?"));
    assert!(glob_match(b"foo.bar.baz", b"*.*.baz"));
}

#[test]
fn test_factory_is_shared_across_threads() {
    let factory = Arc::new(SieveFactory::builtin());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let mailbox = format!("box-{i}");
                let script = Script::new(vec![fileinto(&mailbox)]);
                let mut mail = CheckMailAdapter::new();
                factory.evaluate(&script, &mut mail).unwrap();
                (mailbox, mail.actions().to_vec())
            })
        })
        .collect();
    for handle in handles {
        let (mailbox, actions) = handle.join().unwrap();
        assert_eq!(actions, vec![Action::FileInto { mailbox }]);
    }
}

#[test]
fn test_upper_case_tags_from_json() {
    let script: Script = serde_json::from_str(
        r#"{"commands": [{
            "name": "if",
            "arguments": {"tests": {"tests": [{
                "name": "header",
                "arguments": {"args": [
                    {"tag": ":COMPARATOR"}, {"string_list": ["i;ascii-casemap"]},
                    {"tag": ":CONTAINS"},
                    {"string_list": ["Subject"]},
                    {"string_list": ["RELEASE"]}
                ]}
            }]}},
            "block": {"commands": [{"name": "keep"}]}
        }]}"#,
    )
    .unwrap();
    let (result, mail) = run(&script);
    result.unwrap();
    assert_eq!(mail.actions(), [Action::Keep]);
}
