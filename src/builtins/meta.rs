//! Meta operations: `identity`.
//!
//! `apply` lives in `special_forms` since it needs an evaluator handle to
//! invoke both `HostFn` and `Macro` callees.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

pub fn identity(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("identity", 1, args.len()));
    }
    Ok(args[0].clone())
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("identity".to_string(), Value::HostFn(Rc::new(identity)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_argument_unchanged() {
        assert!(matches!(identity(&[Value::Int(7)]), Ok(Value::Int(7))));
    }
}
