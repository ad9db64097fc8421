//! Comparison operations: `< <= > >= = !=`.
//!
//! All are strictly binary. Numeric kinds compare by value (promoting
//! `Int`/`Float` pairs the same way arithmetic does); strings compare
//! lexicographically. Comparing across incompatible kinds falls back to
//! a fixed, deterministic rank order rather than failing — the source
//! material leaves this unspecified, so we pick a total order and stick
//! to it: `Nil < Bool < Int/Float < Str < Time < Array < HostFn < Macro`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::cmp::Ordering;
use std::rc::Rc;

fn rank(v: &Value) -> u8 {
    match v {
        Value::Nil => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Str(_) => 3,
        Value::Time(_) => 4,
        Value::Array(_) => 5,
        Value::HostFn(_) => 6,
        Value::Macro(_) => 7,
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Nil, Value::Nil) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (Value::Time(a), Value::Time(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                let ord = compare(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

pub(super) fn values_equal(a: &Value, b: &Value) -> bool {
    compare(a, b) == Ordering::Equal && rank(a) == rank(b)
}

fn binary_bool(
    context: &'static str,
    args: &[Value],
    f: impl Fn(Ordering) -> bool,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity(context, 2, args.len()));
    }
    Ok(Value::Bool(f(compare(&args[0], &args[1]))))
}

pub fn eq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("=", 2, args.len()));
    }
    Ok(Value::Bool(values_equal(&args[0], &args[1])))
}

pub fn neq(args: &[Value]) -> Result<Value, EvalError> {
    match eq(args)? {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        _ => unreachable!("eq always returns Bool"),
    }
}

pub fn lt(args: &[Value]) -> Result<Value, EvalError> {
    binary_bool("<", args, |o| o == Ordering::Less)
}

pub fn gt(args: &[Value]) -> Result<Value, EvalError> {
    binary_bool(">", args, |o| o == Ordering::Greater)
}

pub fn le(args: &[Value]) -> Result<Value, EvalError> {
    binary_bool("<=", args, |o| o != Ordering::Greater)
}

pub fn ge(args: &[Value]) -> Result<Value, EvalError> {
    binary_bool(">=", args, |o| o != Ordering::Less)
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("=".to_string(), Value::HostFn(Rc::new(eq)));
    env.set_local("!=".to_string(), Value::HostFn(Rc::new(neq)));
    env.set_local("<".to_string(), Value::HostFn(Rc::new(lt)));
    env.set_local(">".to_string(), Value::HostFn(Rc::new(gt)));
    env.set_local("<=".to_string(), Value::HostFn(Rc::new(le)));
    env.set_local(">=".to_string(), Value::HostFn(Rc::new(ge)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ordering() {
        assert!(matches!(lt(&[Value::Int(1), Value::Int(2)]), Ok(Value::Bool(true))));
        assert!(matches!(gt(&[Value::Int(51), Value::Int(10)]), Ok(Value::Bool(true))));
    }

    #[test]
    fn int_float_cross_comparison() {
        assert!(matches!(
            eq(&[Value::Int(2), Value::Float(2.0)]),
            Ok(Value::Bool(true))
        ));
    }

    #[test]
    fn string_lexicographic() {
        assert!(matches!(
            lt(&[Value::Str("a".into()), Value::Str("b".into())]),
            Ok(Value::Bool(true))
        ));
    }

    #[test]
    fn cross_kind_is_deterministic_not_an_error() {
        let a = lt(&[Value::Nil, Value::Int(1)]).unwrap();
        let b = lt(&[Value::Nil, Value::Int(1)]).unwrap();
        assert!(matches!(a, Value::Bool(true)));
        assert!(matches!(b, Value::Bool(true)));
    }

    #[test]
    fn neq_is_negation_of_eq() {
        assert!(matches!(
            neq(&[Value::Int(1), Value::Int(2)]),
            Ok(Value::Bool(true))
        ));
    }
}
