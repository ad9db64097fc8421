//! Logic operations: `not` / `!`.
//!
//! `and`/`or` live in `special_forms` instead, since they must short-circuit
//! without evaluating their remaining arguments — a host function always
//! receives pre-evaluated arguments, so it can't express that.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Negates truthiness: `false`/`nil` become `true`, everything else `false`.
pub fn not(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("not", 1, args.len()));
    }
    Ok(Value::Bool(!args[0].is_truthy()))
}

pub fn register(env: &Rc<Environment>) {
    let not_fn = Value::HostFn(Rc::new(not));
    env.set_local("not".to_string(), not_fn.clone());
    env.set_local("!".to_string(), not_fn);
}
