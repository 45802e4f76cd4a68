// Integration tests for the debug tag adapter and its sinks

mod common;

use common::{Flaky, Node};
use pretty_assertions::assert_eq;
use serde_json::json;
use vardump::config::DumpConfig;
use vardump::debug::{
    CompileDecision, ConsoleScriptSink, DebugArguments, DebugError, DebugTag, Phase,
    RecordingBreakpoint, SourcePointers, TagMode, TextSink,
};
use vardump::{Inspector, Representation, Value};

fn pointers() -> SourcePointers {
    SourcePointers::new(12, 5, "  <f:debug>{post}</f:debug>\n")
}

#[test]
fn test_render_passes_value_through() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let args = DebugArguments::default().with_value("hello");

    let passed = tag.render(args, || Value::Null).unwrap();
    assert!(matches!(passed, Some(Value::String(s)) if s == "hello"));
    assert_eq!(tag.sink().blocks().len(), 1);
    assert_eq!(tag.sink().blocks()[0].code, "console.log(\"hello\");");
}

#[test]
fn test_render_children_when_no_value() {
    let mut tag = DebugTag::new(TextSink::new(Vec::new()));
    let args = DebugArguments {
        pass: false,
        ..DebugArguments::default()
    };

    let passed = tag
        .render(args, || Value::from(json!({"rendered": true})))
        .unwrap();
    assert!(passed.is_none());

    let text = String::from_utf8(tag.sink().get_ref().clone()).unwrap();
    assert_eq!(text, "[log]\nmapping(1) {\n  rendered => true\n}\n");
}

#[test]
fn test_silent_emits_nothing() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let args = DebugArguments {
        silent: true,
        ..DebugArguments::default()
    }
    .with_value(1);

    let passed = tag.render(args, || Value::Null).unwrap();
    assert!(matches!(passed, Some(Value::Int(1))));
    assert!(tag.sink().blocks().is_empty());
    assert_eq!(tag.sink().script(), "");
}

#[test]
fn test_title_from_pointers() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    tag.on_parse(pointers(), false);
    // later positions do not replace the first one
    tag.on_parse(SourcePointers::new(99, 1, "other"), false);

    tag.render(DebugArguments::default().with_value(true), || Value::Null)
        .unwrap();

    assert_eq!(
        tag.sink().blocks()[0].code,
        "console.info('Line 12, character 5: <f:debug>{post}<\\/f:debug>');\nconsole.log(true);"
    );
}

#[test]
fn test_explicit_title_wins() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    tag.on_parse(pointers(), false);

    let args = DebugArguments {
        level: "warn".to_string(),
        ..DebugArguments::default()
    }
    .with_title("Post \"draft\"")
    .with_value(json!({"q": "a \"quoted\" word"}));
    tag.render(args, || Value::Null).unwrap();

    assert_eq!(
        tag.sink().blocks()[0].code,
        "console.info('Post \\\"draft\\\"');\nconsole.warn({\"q\":\"a \\u0022quoted\\u0022 word\"});"
    );
}

#[test]
fn test_empty_title_falls_back() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    tag.render(DebugArguments::default().with_title("").with_value(0), || Value::Null)
        .unwrap();
    assert_eq!(tag.sink().blocks()[0].code, "console.log(0);");
}

#[test]
fn test_max_depth_argument() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let args = DebugArguments {
        max_depth: 1,
        ..DebugArguments::default()
    }
    .with_value(json!({"a": 1, "b": {"c": 2}}));
    tag.render(args, || Value::Null).unwrap();

    assert_eq!(
        tag.sink().blocks()[0].code,
        "console.log({\"a\":1,\"b\":{\"MAX DEPTH REACHED\":\"Maximum depth reached\"}});"
    );
}

#[test]
fn test_recursion_in_console_output() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let node = Node::self_referencing("loop");
    let identity = format!("{:032x}", node.address());
    tag.render(DebugArguments::default().with_value(node), || Value::Null)
        .unwrap();

    let expected = format!(
        "console.log({{\"name\":\"loop\",\"self\":{{\"RECURSION\":\"Recursion to object {} which was already dumped above\"}}}});",
        identity
    );
    assert_eq!(tag.sink().blocks()[0].code, expected);
}

#[test]
fn test_invalid_level_is_rejected() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let args = DebugArguments {
        level: "log);alert(1".to_string(),
        ..DebugArguments::default()
    }
    .with_value(1);

    let err = tag.render(args, || Value::Null).unwrap_err();
    assert!(matches!(err, DebugError::InvalidLevel(level) if level == "log);alert(1"));
}

#[test]
fn test_accessor_failure_surfaces_as_debug_error() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let err = tag
        .render(DebugArguments::default().with_value(Value::object(Flaky)), || Value::Null)
        .unwrap_err();
    assert!(matches!(err, DebugError::Inspect(_)));

    let mut tag = DebugTag::new(ConsoleScriptSink::new()).with_inspector(
        Inspector::new().with_accessor_errors(vardump::AccessorErrorMode::Placeholder),
    );
    tag.render(DebugArguments::default().with_value(Value::object(Flaky)), || Value::Null)
        .unwrap();
    assert_eq!(tag.sink().blocks().len(), 1);
}

#[test]
fn test_breakpoint_phases() {
    let mut tag = DebugTag::with_breakpoint(ConsoleScriptSink::new(), RecordingBreakpoint::new());
    let args = DebugArguments::break_alias().with_value(json!([1, 2]));

    tag.on_parse(pointers(), args.break_on);
    assert_eq!(tag.on_compile(&args), CompileDecision::Compiled);
    tag.render(args, || Value::Null).unwrap();

    let (sink, breakpoint) = tag.into_parts();
    // the break alias is silent
    assert!(sink.blocks().is_empty());
    assert_eq!(
        breakpoint.breaks(),
        vec![Phase::Parse, Phase::Compile, Phase::Render]
    );
    assert_eq!(breakpoint.hits[0].pointers, Some(pointers()));
    assert_eq!(breakpoint.hits[1].value_kind, None);
    assert_eq!(breakpoint.hits[2].value_kind, Some("sequence"));
}

#[test]
fn test_breakpoint_disabled_still_reported() {
    let mut tag = DebugTag::with_breakpoint(ConsoleScriptSink::new(), RecordingBreakpoint::new());
    tag.render(DebugArguments::default().with_value(1), || Value::Null)
        .unwrap();

    let breakpoint = tag.breakpoint();
    assert_eq!(breakpoint.hits.len(), 1);
    assert!(!breakpoint.hits[0].enabled);
    assert!(breakpoint.breaks().is_empty());
}

#[test]
fn test_compile_disabled() {
    let mut tag = DebugTag::new(ConsoleScriptSink::new());
    let args = DebugArguments {
        compile: false,
        ..DebugArguments::default()
    };
    assert_eq!(tag.on_compile(&args), CompileDecision::Disabled);
}

#[test]
fn test_transparent_mode() {
    let mut tag = DebugTag::with_breakpoint(ConsoleScriptSink::new(), RecordingBreakpoint::new())
        .with_mode(TagMode::Transparent);
    let args = DebugArguments::break_alias();

    tag.on_parse(pointers(), true);
    assert_eq!(tag.on_compile(&args), CompileDecision::Compiled);
    let passed = tag
        .render(
            DebugArguments {
                silent: false,
                ..args
            },
            || Value::Int(42),
        )
        .unwrap();

    assert!(matches!(passed, Some(Value::Int(42))));
    assert!(tag.pointers().is_none());
    assert!(tag.sink().blocks().is_empty());
    assert!(tag.breakpoint().hits.is_empty());
}

#[test]
fn test_config_seeds_arguments() {
    let config = DumpConfig::from_toml_str(
        r#"
        max_depth = 1
        level = "info"
        "#,
    )
    .unwrap();

    let mut tag = DebugTag::new(ConsoleScriptSink::new()).with_inspector(config.inspector());
    let args = config.arguments().with_value(json!({"a": {"b": 1}}));
    tag.render(args, || Value::Null).unwrap();

    assert_eq!(
        tag.sink().blocks()[0].code,
        "console.info({\"a\":{\"MAX DEPTH REACHED\":\"Maximum depth reached\"}});"
    );
}

#[test]
fn test_text_sink_sentinels() {
    let mut tag = DebugTag::new(TextSink::new(Vec::new()));
    let args = DebugArguments::default()
        .with_title("Sentinels")
        .with_value(Value::sequence([Value::callable(|| Value::Null)]));
    tag.render(args, || Value::Null).unwrap();

    let (sink, _) = tag.into_parts();
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text, "[log] Sentinels\nsequence(1) {\n  0 => (closure)\n}\n");
    assert_eq!(
        Representation::Opaque("(closure)".to_string()).to_json(),
        json!("(closure)")
    );
}
