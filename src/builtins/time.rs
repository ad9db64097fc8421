//! Time operations: `now`, the `seconds`/`minutes`/`hours`/`days`/`months`
//! multipliers, `ago`, `from-now`.
//!
//! The multipliers just return integer second counts; `months` uses a
//! 30-day approximation since the language has no calendar arithmetic.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;
use time::Duration;

const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;

pub fn now(args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("now", 0, args.len()));
    }
    Ok(Value::Time(time::OffsetDateTime::now_utc()))
}

fn multiplier(context: &'static str, unit_seconds: i64) -> impl Fn(&[Value]) -> Result<Value, EvalError> {
    move |args: &[Value]| {
        if args.len() != 1 {
            return Err(EvalError::arity(context, 1, args.len()));
        }
        match &args[0] {
            Value::Int(n) => Ok(Value::Int(n * unit_seconds)),
            Value::Float(f) => Ok(Value::Int((f * unit_seconds as f64) as i64)),
            other => Err(EvalError::type_error(context, "number", other.type_name(), 1)),
        }
    }
}

fn seconds_as_i64(context: &str, v: &Value) -> Result<i64, EvalError> {
    match v {
        Value::Int(n) => Ok(*n),
        Value::Float(f) => Ok(*f as i64),
        other => Err(EvalError::type_error(context, "number", other.type_name(), 1)),
    }
}

/// `(ago d)` — `now - d` seconds.
pub fn ago(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("ago", 1, args.len()));
    }
    let delta = seconds_as_i64("ago", &args[0])?;
    Ok(Value::Time(
        time::OffsetDateTime::now_utc() - Duration::seconds(delta),
    ))
}

/// `(from-now d)` — `now + d` seconds.
pub fn from_now(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("from-now", 1, args.len()));
    }
    let delta = seconds_as_i64("from-now", &args[0])?;
    Ok(Value::Time(
        time::OffsetDateTime::now_utc() + Duration::seconds(delta),
    ))
}

pub fn register(env: &Rc<Environment>) {
    env.set_local("now".to_string(), Value::HostFn(Rc::new(now)));
    env.set_local(
        "seconds".to_string(),
        Value::HostFn(Rc::new(multiplier("seconds", SECOND))),
    );
    env.set_local(
        "minutes".to_string(),
        Value::HostFn(Rc::new(multiplier("minutes", MINUTE))),
    );
    env.set_local(
        "hours".to_string(),
        Value::HostFn(Rc::new(multiplier("hours", HOUR))),
    );
    env.set_local(
        "days".to_string(),
        Value::HostFn(Rc::new(multiplier("days", DAY))),
    );
    env.set_local(
        "months".to_string(),
        Value::HostFn(Rc::new(multiplier("months", MONTH))),
    );
    env.set_local("ago".to_string(), Value::HostFn(Rc::new(ago)));
    env.set_local("from-now".to_string(), Value::HostFn(Rc::new(from_now)));
}
