//! Randomness: `(rand)` and `(rand n)`.
//!
//! Never covered by the determinism invariant — hosts that need
//! reproducible runs simply avoid calling it.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use rand::Rng;
use std::rc::Rc;

pub fn rand(args: &[Value]) -> Result<Value, EvalError> {
    match args.len() {
        0 => Ok(Value::Float(rand::thread_rng().gen_range(0.0..1.0))),
        1 => match &args[0] {
            Value::Int(n) if *n > 0 => Ok(Value::Int(rand::thread_rng().gen_range(0..*n))),
            Value::Int(_) => Err(EvalError::argument_error("rand", "n must be positive")),
            Value::Float(f) if *f > 0.0 => Ok(Value::Float(rand::thread_rng().gen_range(0.0..*f))),
            Value::Float(_) => Err(EvalError::argument_error("rand", "n must be positive")),
            other => Err(EvalError::type_error("rand", "number", other.type_name(), 1)),
        },
        n => Err(EvalError::arity("rand", "0 or 1", n)),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("rand".to_string(), Value::HostFn(Rc::new(rand)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arg_rand_is_unit_float() {
        match rand(&[]).unwrap() {
            Value::Float(f) => assert!((0.0..1.0).contains(&f)),
            other => panic!("expected Float, got {other:?}"),
        }
    }

    #[test]
    fn int_rand_is_bounded_int() {
        match rand(&[Value::Int(10)]).unwrap() {
            Value::Int(n) => assert!((0..10).contains(&n)),
            other => panic!("expected Int, got {other:?}"),
        }
    }

    #[test]
    fn float_rand_is_bounded_float() {
        match rand(&[Value::Float(5.0)]).unwrap() {
            Value::Float(f) => assert!((0.0..5.0).contains(&f)),
            other => panic!("expected Float, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_bound_errors() {
        assert!(rand(&[Value::Int(0)]).is_err());
    }
}
