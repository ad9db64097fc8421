// ABOUTME: End-to-end scenarios and quantified invariants, exercised at the public Interpreter/Program API

use sandrule::{error::ErrorKind, HostBindings, Interpreter, Value};

fn run(source: &str) -> Value {
    Interpreter::new()
        .run(source, HostBindings::new(), None)
        .unwrap_or_else(|e| panic!("expected {source:?} to succeed, got {e}"))
}

#[test]
fn scenario_1_arithmetic() {
    match run("(+ (* 2 2) (% 5 4))") {
        Value::Int(n) => assert_eq!(n, 5),
        other => panic!("expected Int(5), got {other:?}"),
    }
}

#[test]
fn scenario_2_if_tail() {
    let interp = Interpreter::new();
    let bindings = HostBindings::new().bind("false", Value::Bool(false));
    match interp
        .run("(if false (+ 4 -3) (- 10 (+ 2 (+ 1 1))))", bindings, None)
        .unwrap()
    {
        Value::Int(n) => assert_eq!(n, 6),
        other => panic!("expected Int(6), got {other:?}"),
    }
}

#[test]
fn scenario_3_cond() {
    match run("(cond (> 1 2) (* 2 2) (< 5 10) 'ohai')") {
        Value::Str(s) => assert_eq!(s, "ohai"),
        other => panic!("expected Str(\"ohai\"), got {other:?}"),
    }

    let interp = Interpreter::new();
    let bindings = HostBindings::new().bind("false", Value::Bool(false));
    match interp
        .run("(cond (> 1 2) (* 2 2) false 'ohai')", bindings, None)
        .unwrap()
    {
        Value::Nil => (),
        other => panic!("expected Nil, got {other:?}"),
    }
}

#[test]
fn scenario_4_host_binding() {
    let interp = Interpreter::new();
    let bindings = HostBindings::new().bind("custom_var", Value::Int(10));
    match interp.run("(> 51 custom_var)", bindings, None).unwrap() {
        Value::Bool(b) => assert!(b),
        other => panic!("expected Bool(true), got {other:?}"),
    }
}

#[test]
fn scenario_5_let() {
    match run("(let (x 2 y 4) (* x y))") {
        Value::Int(n) => assert_eq!(n, 8),
        other => panic!("expected Int(8), got {other:?}"),
    }

    let err = Interpreter::new()
        .run("(let (x 1 y) 1 2)", HostBindings::new(), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentError);
}

#[test]
fn scenario_6_apply() {
    match run("(apply (lambda (x) (* x 2) (* x 3)) 2)") {
        Value::Int(n) => assert_eq!(n, 6),
        other => panic!("expected Int(6), got {other:?}"),
    }
}

#[test]
fn apply_still_splats_an_array_of_multiple_arguments() {
    match run("(apply (lambda (x y) (* x y)) (array 3 4))") {
        Value::Int(n) => assert_eq!(n, 12),
        other => panic!("expected Int(12), got {other:?}"),
    }
}

#[test]
fn scenario_7_defn_and_string_concat() {
    let source = "(defn say_hi (name) (str 'hi there, ' name '!')) (say_hi 'Justin')";
    match run(source) {
        Value::Str(s) => assert_eq!(s, "hi there, Justin!"),
        other => panic!("expected greeting string, got {other:?}"),
    }
}

#[test]
fn scenario_8_ops_threshold() {
    let source = "(str (+ 1 2) (+ 3 4) (+ 5 7))";
    let interp = Interpreter::new();

    match interp
        .run(source, HostBindings::new(), Some(5))
        .unwrap()
    {
        Value::Str(s) => assert_eq!(s, "3712"),
        other => panic!("expected Str(\"3712\"), got {other:?}"),
    }

    let err = interp
        .run(source, HostBindings::new(), Some(3))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OpsThresholdExceeded);
}

#[test]
fn scenario_9_empty_source() {
    match run("") {
        Value::Nil => (),
        other => panic!("expected Nil, got {other:?}"),
    }
}

#[test]
fn scenario_10_non_callable_head() {
    let err = Interpreter::new()
        .run("(1)", HostBindings::new(), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentError);
}

#[test]
fn invariant_determinism_without_nondeterministic_builtins() {
    let interp = Interpreter::new();
    let a = interp.run("(+ (* 2 2) (% 5 4))", HostBindings::new(), None).unwrap();
    let b = interp.run("(+ (* 2 2) (% 5 4))", HostBindings::new(), None).unwrap();
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => assert_eq!(x, y),
        other => panic!("expected matching Int values, got {other:?}"),
    }
}

#[test]
fn invariant_compile_call_equivalence_including_failure() {
    let interp = Interpreter::new();
    let source = "(str (+ 1 2) (+ 3 4) (+ 5 7))";

    let direct = interp.run(source, HostBindings::new(), Some(3));
    let staged = interp
        .compile(source)
        .unwrap()
        .run(HostBindings::new(), Some(3));
    assert_eq!(direct.is_err(), staged.is_err());

    let direct_ok = interp.run(source, HostBindings::new(), Some(5)).unwrap();
    let staged_ok = interp
        .compile(source)
        .unwrap()
        .run(HostBindings::new(), Some(5))
        .unwrap();
    match (direct_ok, staged_ok) {
        (Value::Str(a), Value::Str(b)) => assert_eq!(a, b),
        other => panic!("expected matching Str values, got {other:?}"),
    }
}

#[test]
fn invariant_scope_isolation() {
    let interp = Interpreter::new();
    let program = interp
        .compile("(setglobal g 1) (let (x 1) (setglobal g2 x)) g2")
        .unwrap();
    match program.run(HostBindings::new(), None).unwrap() {
        Value::Int(n) => assert_eq!(n, 1),
        other => panic!("expected Int(1), got {other:?}"),
    }

    let err = interp
        .compile("(let (x 1) x) x")
        .unwrap()
        .run(HostBindings::new(), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndefinedVar);
}

#[test]
fn invariant_op_monotonicity() {
    let interp = Interpreter::new();
    let program = interp.compile("(+ 1 2)").unwrap();
    assert!(program.run(HostBindings::new(), Some(0)).is_err());
    assert!(program.run(HostBindings::new(), Some(1)).is_ok());
}

#[test]
fn invariant_arithmetic_identities() {
    match run("(+ 5)") {
        Value::Int(n) => assert_eq!(n, 5),
        other => panic!("expected Int(5), got {other:?}"),
    }
    match run("(+)") {
        Value::Int(n) => assert_eq!(n, 0),
        other => panic!("expected Int(0), got {other:?}"),
    }
    match run("(*)") {
        Value::Int(n) => assert_eq!(n, 1),
        other => panic!("expected Int(1), got {other:?}"),
    }
}

#[test]
fn invariant_short_circuit_is_observable() {
    let interp = Interpreter::new();
    let bindings = HostBindings::new().bind("false", Value::Bool(false));
    // `boom` is never bound, so evaluating it would fail undefined-var.
    match interp.run("(and false (boom))", bindings, None).unwrap() {
        Value::Bool(b) => assert!(!b),
        other => panic!("expected Bool(false), got {other:?}"),
    }
}
