// ABOUTME: Runtime value types flowing through the evaluator

use crate::ast::Ast;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use std::fmt;
use std::rc::Rc;

/// Outcome of invoking a `Macro` value: either a finished result, or a
/// further AST node the evaluator should re-enter exactly once.
#[derive(Clone)]
pub enum MacroOutcome {
    Value(Value),
    /// Re-enter the evaluator on this AST node, in this frame, exactly once.
    /// The frame is almost always the one the macro itself received, except
    /// for `let`/`lambda`/`defn`, whose tail expression must run in the new
    /// child frame they just built.
    Reevaluate(Ast, Rc<Environment>),
}

/// A callable that receives its arguments already evaluated.
pub type HostFnImpl = dyn Fn(&[Value]) -> Result<Value, EvalError>;

/// A callable that receives its arguments as raw, un-evaluated AST plus a
/// handle back into the evaluator — used for special forms, user-defined
/// lambdas, and the `apply` built-in, all of which need to control whether
/// and where their operands get evaluated.
pub type MacroFnImpl = dyn Fn(&Evaluator, &Rc<Environment>, &[Ast]) -> Result<MacroOutcome, EvalError>;

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Time(time::OffsetDateTime),
    /// Immutable handle semantics: cloning a `Value::Array` clones the `Rc`,
    /// not the backing vector.
    Array(Rc<Vec<Value>>),
    HostFn(Rc<HostFnImpl>),
    Macro(Rc<MacroFnImpl>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Time(_) => "time",
            Value::Array(_) => "array",
            Value::HostFn(_) => "host-fn",
            Value::Macro(_) => "macro",
        }
    }

    /// `false` and `nil` are falsy; everything else is truthy, including
    /// `0`, `0.0` and `""`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Nil)
    }

    pub fn as_array(&self) -> Option<&Rc<Vec<Value>>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Time(t) => write!(f, "{}", t),
            Value::Array(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::HostFn(_) => write!(f, "#<host-fn>"),
            Value::Macro(_) => write!(f, "#<macro>"),
        }
    }
}
