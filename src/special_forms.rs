// ABOUTME: Registers the fixed set of special forms (macros) into a root frame

use crate::ast::{Ast, Token, TokenKind};
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{MacroFnImpl, MacroOutcome, Value};
use std::rc::Rc;

fn var_name(node: &Ast) -> Result<&str, EvalError> {
    match node {
        Ast::Atom(Token {
            kind: TokenKind::Var(name),
            ..
        }) => Ok(name),
        _ => Err(EvalError::argument_error(
            "special-form",
            "expected a symbol",
        )),
    }
}

fn binding_list(node: &Ast) -> Result<&Rc<Vec<Ast>>, EvalError> {
    match node {
        Ast::Form(items) => Ok(items),
        _ => Err(EvalError::argument_error(
            "special-form",
            "expected a parenthesized list",
        )),
    }
}

fn make_macro(f: impl Fn(&Evaluator, &Rc<Environment>, &[Ast]) -> Result<MacroOutcome, EvalError> + 'static) -> Value {
    Value::Macro(Rc::new(f) as Rc<MacroFnImpl>)
}

/// `(if p t e)` — requires exactly three arguments.
fn if_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("if", 3, args.len()));
    }
    let cond = evaluator.eval(&args[0], env)?;
    let branch = if cond.is_truthy() { &args[1] } else { &args[2] };
    Ok(MacroOutcome::Reevaluate(branch.clone(), Rc::clone(env)))
}

/// `(cond p1 e1 p2 e2 ...)` — an even, non-empty number of arguments.
fn cond_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(EvalError::argument_error(
            "cond",
            "expected an even, non-empty number of predicate/expression pairs",
        ));
    }
    for pair in args.chunks(2) {
        let predicate = evaluator.eval(&pair[0], env)?;
        if predicate.is_truthy() {
            return Ok(MacroOutcome::Reevaluate(pair[1].clone(), Rc::clone(env)));
        }
    }
    Ok(MacroOutcome::Value(Value::Nil))
}

/// `(and x1 ... xn)` — short-circuits on the first falsy value.
fn and_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.is_empty() {
        return Ok(MacroOutcome::Value(Value::Bool(true)));
    }
    let mut last = Value::Bool(true);
    for arg in args {
        last = evaluator.eval(arg, env)?;
        if !last.is_truthy() {
            return Ok(MacroOutcome::Value(Value::Bool(false)));
        }
    }
    Ok(MacroOutcome::Value(last))
}

/// `(or x1 ... xn)` — returns the first truthy value, or `false`.
fn or_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    for arg in args {
        let value = evaluator.eval(arg, env)?;
        if value.is_truthy() {
            return Ok(MacroOutcome::Value(value));
        }
    }
    Ok(MacroOutcome::Value(Value::Bool(false)))
}

/// `(let (n1 v1 n2 v2 ...) body...)`.
fn let_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::argument_error(
            "let",
            "expected a binding list and at least one body expression",
        ));
    }
    let bindings = binding_list(&args[0])?;
    if bindings.len() % 2 != 0 {
        return Err(EvalError::argument_error(
            "let",
            "binding list must have an even number of elements",
        ));
    }

    let child = Environment::new_child(env);
    for pair in bindings.chunks(2) {
        let name = var_name(&pair[0])?.to_string();
        let value = evaluator.eval(&pair[1], &child)?;
        child.set_local(name, value);
    }

    eval_body_tail(evaluator, &child, &args[1..])
}

/// Evaluates all but the last of `body` for effect, then hands the last
/// expression back for re-evaluation in `frame`.
fn eval_body_tail(
    evaluator: &Evaluator,
    frame: &Rc<Environment>,
    body: &[Ast],
) -> Result<MacroOutcome, EvalError> {
    if body.is_empty() {
        return Ok(MacroOutcome::Value(Value::Nil));
    }
    for expr in &body[..body.len() - 1] {
        evaluator.eval(expr, frame)?;
    }
    Ok(MacroOutcome::Reevaluate(
        body[body.len() - 1].clone(),
        Rc::clone(frame),
    ))
}

fn parse_params(node: &Ast) -> Result<Vec<String>, EvalError> {
    binding_list(node)?
        .iter()
        .map(|p| var_name(p).map(|s| s.to_string()))
        .collect()
}

/// Builds the closure behind a `lambda` value: captures the defining frame,
/// evaluates arguments in the *caller's* frame, and runs the body in a fresh
/// child of the frame captured at definition time.
fn make_lambda(params: Vec<String>, body: Rc<Vec<Ast>>, captured_env: Rc<Environment>) -> Value {
    make_macro(move |evaluator, caller_env, arg_nodes| {
        if arg_nodes.len() != params.len() {
            return Err(EvalError::arity("lambda", params.len(), arg_nodes.len()));
        }
        let call_frame = Environment::new_child(&captured_env);
        for (name, node) in params.iter().zip(arg_nodes.iter()) {
            let value = evaluator.eval(node, caller_env)?;
            call_frame.set_local(name.clone(), value);
        }
        eval_body_tail(evaluator, &call_frame, &body)
    })
}

/// `(lambda (p1 ... pk) body...)`.
fn lambda_form(_evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::argument_error(
            "lambda",
            "expected a parameter list and at least one body expression",
        ));
    }
    let params = parse_params(&args[0])?;
    let body: Rc<Vec<Ast>> = Rc::new(args[1..].to_vec());
    Ok(MacroOutcome::Value(make_lambda(params, body, Rc::clone(env))))
}

/// `(defn name (p...) body...)`, equivalent to `(setglobal name (lambda (p...) body...))`.
fn defn_form(_evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::argument_error(
            "defn",
            "expected a name and a parameter list",
        ));
    }
    let name = var_name(&args[0])?.to_string();
    let params = parse_params(&args[1])?;
    let body: Rc<Vec<Ast>> = Rc::new(args[2..].to_vec());
    let lambda = make_lambda(params, body, Rc::clone(env));
    env.set_root(name, lambda.clone());
    Ok(MacroOutcome::Value(lambda))
}

/// `(setglobal name value)`.
fn setglobal_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("setglobal", 2, args.len()));
    }
    let name = var_name(&args[0])?.to_string();
    let value = evaluator.eval(&args[1], env)?;
    env.set_root(name, value.clone());
    Ok(MacroOutcome::Value(value))
}

/// `(expr e1 ... en)` — sequential evaluation with no new frame.
fn expr_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    eval_body_tail(evaluator, env, args)
}

/// `(apply fn operand)` — splats an already-built array as a call's
/// arguments; a bare non-array operand is treated as a one-element array
/// (`(apply f 2)` calls `f` with the single argument `2`, matching `(apply f
/// (array 2))`).
fn apply_form(evaluator: &Evaluator, env: &Rc<Environment>, args: &[Ast]) -> Result<MacroOutcome, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("apply", 2, args.len()));
    }
    let callee = evaluator.eval(&args[0], env)?;
    let operand = evaluator.eval(&args[1], env)?;
    let items: Vec<Value> = match operand.as_array() {
        Some(items) => items.as_ref().clone(),
        None => vec![operand],
    };

    match callee {
        Value::HostFn(f) => Ok(MacroOutcome::Value(f(&items)?)),
        Value::Macro(f) => {
            let literal_args: Vec<Ast> = items.into_iter().map(Ast::Literal).collect();
            f(evaluator, env, &literal_args)
        }
        other => Err(EvalError::type_error(
            "apply",
            "callable",
            other.type_name(),
            1,
        )),
    }
}

/// Registers `if`, `cond`, `and`, `or`, `let`, `lambda`, `defn`, `setglobal`,
/// `expr`, and `apply` into `env`.
pub fn register(env: &Rc<Environment>) {
    env.set_local("if".to_string(), make_macro(if_form));
    env.set_local("cond".to_string(), make_macro(cond_form));
    env.set_local("and".to_string(), make_macro(and_form));
    env.set_local("or".to_string(), make_macro(or_form));
    env.set_local("let".to_string(), make_macro(let_form));
    env.set_local("lambda".to_string(), make_macro(lambda_form));
    env.set_local("defn".to_string(), make_macro(defn_form));
    env.set_local("setglobal".to_string(), make_macro(setglobal_form));
    env.set_local("expr".to_string(), make_macro(expr_form));
    env.set_local("apply".to_string(), make_macro(apply_form));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;
    use crate::eval::eval_program;
    use crate::parser;

    fn root_env() -> Rc<Environment> {
        let env = Environment::new();
        register(&env);
        builtins::register_all(&env);
        env
    }

    fn eval_str(source: &str) -> Value {
        let forms = parser::parse(source).unwrap();
        eval_program(&forms, &root_env(), None).unwrap()
    }

    #[test]
    fn and_zero_args_is_true() {
        assert!(matches!(eval_str("(and)"), Value::Bool(true)));
    }

    #[test]
    fn or_zero_args_is_false() {
        assert!(matches!(eval_str("(or)"), Value::Bool(false)));
    }

    #[test]
    fn lambda_closes_over_defining_frame() {
        let env = root_env();
        let forms = parser::parse(
            "(setglobal make_adder (lambda (n) (lambda (x) (+ x n)))) \
             (setglobal add5 (apply make_adder (array 5))) \
             (add5 10)",
        )
        .unwrap();
        match eval_program(&forms, &env, None).unwrap() {
            Value::Int(n) => assert_eq!(n, 15),
            other => panic!("expected Int(15), got {other:?}"),
        }
    }

    #[test]
    fn defn_persists_across_top_level_forms() {
        let env = root_env();
        let forms = parser::parse("(defn sq (x) (* x x)) (sq 6)").unwrap();
        match eval_program(&forms, &env, None).unwrap() {
            Value::Int(n) => assert_eq!(n, 36),
            other => panic!("expected Int(36), got {other:?}"),
        }
    }

    #[test]
    fn let_rejects_odd_binding_list() {
        let forms = parser::parse("(let (x 1 y) 1 2)").unwrap();
        let err = eval_program(&forms, &root_env(), None).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ArgumentError);
    }
}
