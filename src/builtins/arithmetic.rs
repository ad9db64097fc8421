//! Arithmetic operations: `+ - * / %`.
//!
//! `+ - *` are variadic reductions; `/` and `%` are strictly binary.
//! Adding any `Float` operand promotes the whole operation to `Float`;
//! otherwise `Int` arithmetic stays integral, and `/` on two `Int`s
//! truncates like Rust's own integer division.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn from_value(context: &str, v: &Value, position: usize) -> Result<Num, EvalError> {
        match v {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(n) => Ok(Num::Float(*n)),
            other => Err(EvalError::type_error(context, "number", other.type_name(), position)),
        }
    }

    fn as_float(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Int(n),
            Num::Float(n) => Value::Float(n),
        }
    }
}

fn reduce(
    context: &str,
    args: &[Value],
    identity: Num,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    let mut acc = identity;
    for (i, arg) in args.iter().enumerate() {
        let n = Num::from_value(context, arg, i + 1)?;
        acc = match (acc, n) {
            (Num::Int(a), Num::Int(b)) => Num::Int(int_op(a, b)),
            (a, b) => Num::Float(float_op(a.as_float(), b.as_float())),
        };
    }
    Ok(acc.into_value())
}

pub fn add(args: &[Value]) -> Result<Value, EvalError> {
    reduce("+", args, Num::Int(0), |a, b| a + b, |a, b| a + b)
}

pub fn sub(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("-", "at least 1", 0));
    }
    let first = Num::from_value("-", &args[0], 1)?;
    if args.len() == 1 {
        return Ok(match first {
            Num::Int(n) => Value::Int(-n),
            Num::Float(n) => Value::Float(-n),
        });
    }
    reduce("-", &args[1..], first, |a, b| a - b, |a, b| a - b)
}

pub fn mul(args: &[Value]) -> Result<Value, EvalError> {
    reduce("*", args, Num::Int(1), |a, b| a * b, |a, b| a * b)
}

fn is_zero(n: Num) -> bool {
    match n {
        Num::Int(0) => true,
        Num::Float(f) => f == 0.0,
        _ => false,
    }
}

pub fn div(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("/", 2, args.len()));
    }
    let a = Num::from_value("/", &args[0], 1)?;
    let b = Num::from_value("/", &args[1], 2)?;
    if is_zero(b) {
        return Err(EvalError::argument_error("/", "division by zero"));
    }
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Ok(Value::Int(x / y)),
        (a, b) => Ok(Value::Float(a.as_float() / b.as_float())),
    }
}

pub fn rem(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("%", 2, args.len()));
    }
    let a = Num::from_value("%", &args[0], 1)?;
    let b = Num::from_value("%", &args[1], 2)?;
    if is_zero(b) {
        return Err(EvalError::argument_error("%", "division by zero"));
    }
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Ok(Value::Int(x % y)),
        (a, b) => Ok(Value::Float(a.as_float() % b.as_float())),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("+".to_string(), Value::HostFn(Rc::new(add)));
    env.set_local("-".to_string(), Value::HostFn(Rc::new(sub)));
    env.set_local("*".to_string(), Value::HostFn(Rc::new(mul)));
    env.set_local("/".to_string(), Value::HostFn(Rc::new(div)));
    env.set_local("%".to_string(), Value::HostFn(Rc::new(rem)));
}
