//! String operations: `str`, `upcase`, `downcase`, `strip`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Concatenates the `Display` form of every argument, no separator.
pub fn str_concat(args: &[Value]) -> Result<Value, EvalError> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.to_string());
    }
    Ok(Value::Str(out))
}

fn unary_str(context: &str, args: &[Value], f: impl Fn(&str) -> String) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity(context, 1, args.len()));
    }
    let s = args[0]
        .as_str()
        .ok_or_else(|| EvalError::type_error(context, "string", args[0].type_name(), 1))?;
    Ok(Value::Str(f(s)))
}

pub fn upcase(args: &[Value]) -> Result<Value, EvalError> {
    unary_str("upcase", args, |s| s.to_uppercase())
}

pub fn downcase(args: &[Value]) -> Result<Value, EvalError> {
    unary_str("downcase", args, |s| s.to_lowercase())
}

pub fn strip(args: &[Value]) -> Result<Value, EvalError> {
    unary_str("strip", args, |s| s.trim().to_string())
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("str".to_string(), Value::HostFn(Rc::new(str_concat)));
    env.set_local("upcase".to_string(), Value::HostFn(Rc::new(upcase)));
    env.set_local("downcase".to_string(), Value::HostFn(Rc::new(downcase)));
    env.set_local("strip".to_string(), Value::HostFn(Rc::new(strip)));
}
