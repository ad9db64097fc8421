//! Type conversions: `int`, `float`, `time`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub fn to_int(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("int", 1, args.len()));
    }
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(f) => Ok(Value::Int(*f as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| EvalError::argument_error("int", format!("cannot parse {s:?} as int"))),
        other => Err(EvalError::type_error("int", "number or string", other.type_name(), 1)),
    }
}

pub fn to_float(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("float", 1, args.len()));
    }
    match &args[0] {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| EvalError::argument_error("float", format!("cannot parse {s:?} as float"))),
        other => Err(EvalError::type_error("float", "number or string", other.type_name(), 1)),
    }
}

/// Parses an absolute instant from an RFC 3339 string.
pub fn to_time(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("time", 1, args.len()));
    }
    let s = args[0]
        .as_str()
        .ok_or_else(|| EvalError::type_error("time", "string", args[0].type_name(), 1))?;
    let parsed = OffsetDateTime::parse(s, &Rfc3339)
        .map_err(|e| EvalError::argument_error("time", format!("cannot parse {s:?} as a time: {e}")))?;
    Ok(Value::Time(parsed))
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("int".to_string(), Value::HostFn(Rc::new(to_int)));
    env.set_local("float".to_string(), Value::HostFn(Rc::new(to_float)));
    env.set_local("time".to_string(), Value::HostFn(Rc::new(to_time)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_truncates_float() {
        assert!(matches!(to_int(&[Value::Float(3.9)]), Ok(Value::Int(3))));
    }

    #[test]
    fn float_widens_int() {
        assert!(matches!(to_float(&[Value::Int(3)]), Ok(Value::Float(f)) if f == 3.0));
    }

    #[test]
    fn int_parses_strings() {
        assert!(matches!(to_int(&[Value::Str("42".into())]), Ok(Value::Int(42))));
    }

    #[test]
    fn time_parses_rfc3339() {
        let v = to_time(&[Value::Str("2024-01-01T00:00:00Z".into())]).unwrap();
        assert!(matches!(v, Value::Time(_)));
    }

    #[test]
    fn time_rejects_malformed_input() {
        assert!(to_time(&[Value::Str("not-a-time".into())]).is_err());
    }
}
