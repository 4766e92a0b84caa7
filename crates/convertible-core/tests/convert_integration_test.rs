//! Integration tests for wrapped callables
//!
//! Tests exercise the public surface end to end:
//! - Binding files loaded from disk
//! - Positional, keyword-only, and variadic parameters
//! - Greedy and optional converters sharing one call
//! - Failure handling and propagation
//! - Method receivers

use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use convertible_core::converters::{FromFn, Greedy, Ignore, Optional, Pattern, ToInt, ToStr};
use convertible_core::{
    Argument, Arguments, BindingConfig, Convert, ConvertError, Conversion, Error, FailureKind,
    Signature,
};

fn no_kwargs() -> Vec<(String, Value)> {
    Vec::new()
}

fn kw(name: &str, value: Value) -> (String, Value) {
    (name.to_string(), value)
}

// =============================================================================
// Binding Files
// =============================================================================

#[test]
fn test_binding_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binding.yaml");
    std::fs::write(
        &path,
        r#"
signature:
  positional: [ids]
  varargs: rest
  keyword_only: [ref]
  varkw: options
converters:
  args:
    - greedy: uuid
  kwargs:
    ref:
      pattern: '^#(?P<num>\d+)$'
      group: num
    rest: int
    limit: int
on_failure:
  unconvertible: skip
"#,
    )
    .unwrap();

    let binding = BindingConfig::load(&path).unwrap();
    let f = binding
        .to_convert()
        .unwrap()
        .function(&binding.signature, |arguments: Arguments| arguments);

    let out = f
        .call(
            vec![
                json!("67E55044-10B1-426F-9247-BB680E5FE0C8"),
                json!("3"),
                json!("4"),
            ],
            vec![
                kw("ref", json!("#12")),
                kw("limit", json!("10")),
                kw("mode", json!("fast")),
            ],
        )
        .unwrap()
        .unwrap();

    // "3" is not a UUID, so it and "4" are extra positionals converted by `rest`
    assert_eq!(
        out.args,
        vec![
            json!(["67e55044-10b1-426f-9247-bb680e5fe0c8"]),
            json!(3),
            json!(4)
        ]
    );
    assert_eq!(out.kwargs["ref"], json!("12"));
    assert_eq!(out.kwargs["limit"], json!(10));
    assert_eq!(out.kwargs["mode"], json!("fast"));

    let skipped = f
        .call(Vec::new(), vec![kw("ref", json!("12"))])
        .unwrap();
    assert!(skipped.is_none());
}

#[test]
fn test_missing_binding_file() {
    let dir = TempDir::new().unwrap();
    let err = BindingConfig::load(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }));
}

#[test]
fn test_duplicate_parameter_rejected() {
    let err = BindingConfig::from_yaml("signature: {positional: [a, a]}").unwrap_err();
    assert!(err.to_string().contains("duplicate parameter 'a'"));
}

// =============================================================================
// Call Semantics
// =============================================================================

#[test]
fn test_keyword_and_positional_calls_are_equivalent() {
    let signature = Signature::builder()
        .positional(["a", "b", "c"])
        .build()
        .unwrap();
    let f = Convert::new()
        .args([ToInt, ToInt, ToInt])
        .function(&signature, |arguments: Arguments| arguments);

    let positional = f
        .call(vec![json!("1"), json!("2"), json!("3")], no_kwargs())
        .unwrap();
    let mixed = f
        .call(
            vec![json!("1")],
            vec![kw("c", json!("3")), kw("b", json!("2"))],
        )
        .unwrap();
    assert_eq!(positional, mixed);
}

#[test]
fn test_wrapped_function_is_reusable() {
    let signature = Signature::builder()
        .positional(["values"])
        .build()
        .unwrap();
    let f = Convert::new()
        .arg(Greedy::new(ToInt))
        .function(&signature, |arguments: Arguments| arguments.args);

    for _ in 0..3 {
        assert_eq!(
            f.call(vec![json!("1"), json!("2")], no_kwargs()).unwrap(),
            Some(vec![json!([1, 2])])
        );
    }
}

#[test]
fn test_greedy_then_optional_share_values() {
    let signature = Signature::builder()
        .positional(["numbers", "name"])
        .build()
        .unwrap();
    let f = Convert::new()
        .arg(Greedy::new(ToInt))
        .arg(Optional::new(ToStr).with_fallback(json!("anon")))
        .function(&signature, |arguments: Arguments| arguments.args);

    assert_eq!(
        f.call(vec![json!(1), json!("2"), json!("bob")], no_kwargs())
            .unwrap(),
        Some(vec![json!([1, 2]), json!("bob")])
    );
    assert_eq!(
        f.call(vec![json!(1)], no_kwargs()).unwrap(),
        Some(vec![json!([1]), json!("anon")])
    );
}

#[test]
fn test_greedy_varargs_collects_every_positional() {
    let signature = Signature::builder().varargs("args").build().unwrap();
    let f = Convert::new()
        .arg(Greedy::new(ToInt))
        .function(&signature, |arguments: Arguments| arguments.args);

    assert_eq!(
        f.call(vec![json!(1), json!(2)], no_kwargs()).unwrap(),
        Some(vec![json!([1, 2])])
    );
}

#[test]
fn test_greedy_keyword_arguments_stay_keywords() {
    let signature = Signature::builder()
        .positional(["nums"])
        .keyword_only(["tags"])
        .varkw("opts")
        .build()
        .unwrap();
    let f = Convert::new()
        .arg(Greedy::new(ToInt))
        .kwarg("tags", Greedy::new(ToInt))
        .kwarg("n", Greedy::new(ToInt))
        .function(&signature, |arguments: Arguments| arguments);

    let out = f
        .call(
            Vec::new(),
            vec![
                kw("nums", json!("x")),
                kw("tags", json!("y")),
                kw("n", json!("z")),
            ],
        )
        .unwrap()
        .unwrap();
    assert_eq!(out.args, vec![json!([])]);
    assert_eq!(out.kwargs["tags"], json!([]));
    assert_eq!(out.kwargs["n"], json!([]));
    assert_eq!(out.kwargs.len(), 2);
}

#[test]
fn test_ignore_keeps_raw_value() {
    let signature = Signature::builder()
        .positional(["raw", "n"])
        .build()
        .unwrap();
    let f = Convert::new()
        .arg(Ignore)
        .arg(ToInt)
        .function(&signature, |arguments: Arguments| arguments.args);

    assert_eq!(
        f.call(vec![json!([1, 2]), json!("3")], no_kwargs()).unwrap(),
        Some(vec![json!([1, 2]), json!(3)])
    );
}

// =============================================================================
// Failure Handling
// =============================================================================

#[test]
fn test_custom_failure_kind_routes_to_handler() {
    let even = FromFn::new("Even", |argument: Argument| match argument {
        Argument::Value(value) if value.as_i64().is_some_and(|n| n % 2 == 0) => {
            Conversion::Converted(value)
        }
        other => Conversion::Failed(ConvertError::new(
            &"Even",
            other,
            FailureKind::Custom("odd".into()),
        )),
    });

    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let signature = Signature::builder().positional(["n"]).build().unwrap();
    let f = Convert::new()
        .arg(even)
        .on_failure(FailureKind::Custom("odd".into()), move |_, argument| {
            sink.lock().unwrap().push(argument.clone());
        })
        .function(&signature, |arguments: Arguments| arguments.args[0].clone());

    assert_eq!(f.call(vec![json!(4)], no_kwargs()).unwrap(), Some(json!(4)));
    assert_eq!(f.call(vec![json!(5)], no_kwargs()).unwrap(), None);
    assert_eq!(*log.lock().unwrap(), vec![Argument::Value(json!(5))]);
}

#[test]
fn test_unhandled_kind_still_propagates() {
    let signature = Signature::builder().positional(["p"]).build().unwrap();
    let f = Convert::new()
        .arg(Pattern::new(r"^\d+$").unwrap())
        .on_failure(FailureKind::Exhausted, |_, _| {})
        .function(&signature, |arguments: Arguments| arguments);

    let err = f.call(vec![json!("abc")], no_kwargs()).unwrap_err();
    match err {
        Error::Conversion(e) => {
            assert_eq!(e.kind, FailureKind::Unconvertible);
            assert_eq!(e.message.as_deref(), Some("no match"));
        }
        other => panic!("Expected conversion error, got {other:?}"),
    }
}

// =============================================================================
// Methods
// =============================================================================

struct Ledger {
    entries: Mutex<Vec<Value>>,
}

#[test]
fn test_method_receives_receiver_and_converted_arguments() {
    let signature = Signature::builder()
        .positional(["self", "amounts"])
        .keyword_only(["memo"])
        .build()
        .unwrap();
    let record = Convert::new()
        .arg(Greedy::new(ToInt))
        .kwarg("memo", Optional::new(ToStr))
        .method(&signature, |ledger: &Ledger, arguments: Arguments| {
            let mut entries = ledger.entries.lock().unwrap();
            entries.push(json!({
                "amounts": arguments.args[0],
                "memo": arguments.kwargs["memo"],
            }));
            entries.len()
        });

    let ledger = Ledger {
        entries: Mutex::new(Vec::new()),
    };
    let bound = record.bind(&ledger);
    assert_eq!(
        bound
            .call(vec![json!("5"), json!("7")], vec![kw("memo", json!("rent"))])
            .unwrap(),
        Some(1)
    );
    assert_eq!(bound.call(vec![json!("1")], no_kwargs()).unwrap(), Some(2));

    let entries = ledger.entries.lock().unwrap();
    assert_eq!(entries[0], json!({"amounts": [5, 7], "memo": "rent"}));
    assert_eq!(entries[1], json!({"amounts": [1], "memo": null}));
}
