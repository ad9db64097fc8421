// ABOUTME: Tree-walking evaluator: operation-counted dispatch between macros and host callables

use crate::ast::{Ast, NumLit, Token, TokenKind};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{MacroOutcome, Value};
use std::cell::Cell;
use std::rc::Rc;

/// Per-call evaluation state: the operation counter and its configured cap.
/// Holds no references to any particular frame chain, so a single compiled
/// program can be invoked from many threads as long as each call builds its
/// own `Evaluator`.
pub struct Evaluator {
    op_count: Cell<u64>,
    max_ops: Option<u64>,
}

impl Evaluator {
    pub fn new(max_ops: Option<u64>) -> Self {
        Evaluator {
            op_count: Cell::new(0),
            max_ops,
        }
    }

    pub fn op_count(&self) -> u64 {
        self.op_count.get()
    }

    /// Evaluates a single AST node against `env`.
    pub fn eval(&self, node: &Ast, env: &Rc<Environment>) -> Result<Value, EvalError> {
        match node {
            Ast::Literal(value) => Ok(value.clone()),
            Ast::Atom(token) => self.eval_atom(token, env),
            Ast::Form(items) => {
                if items.is_empty() {
                    return Ok(Value::Nil);
                }
                self.bump_op()?;
                self.eval_form_body(items, env)
            }
        }
    }

    fn eval_atom(&self, token: &Token, env: &Rc<Environment>) -> Result<Value, EvalError> {
        match &token.kind {
            TokenKind::Num(NumLit::Int(n)) => Ok(Value::Int(*n)),
            TokenKind::Num(NumLit::Float(f)) => Ok(Value::Float(*f)),
            TokenKind::Str(s) => Ok(Value::Str(s.clone())),
            TokenKind::Time(t) => Ok(Value::Time(*t)),
            TokenKind::Var(name) => env
                .get(name)
                .ok_or_else(|| EvalError::UndefinedVar(name.clone())),
            TokenKind::FnKeyword => Err(EvalError::argument_error(
                "eval",
                "'fn' is reserved and cannot appear in value position",
            )),
            TokenKind::LPar | TokenKind::RPar => {
                unreachable!("parens never survive parsing as atoms")
            }
        }
    }

    /// Evaluates the body of a non-empty form, given its operation count has
    /// already been charged by the caller (either the top-level `eval` entry
    /// for a fresh form, or a macro re-entry step that already charged once).
    fn eval_form_body(&self, items: &Rc<Vec<Ast>>, env: &Rc<Environment>) -> Result<Value, EvalError> {
        if items.is_empty() {
            return Ok(Value::Nil);
        }

        let head = self.eval(&items[0], env)?;
        match head {
            Value::Macro(f) => match f(self, env, &items[1..])? {
                MacroOutcome::Value(v) => Ok(v),
                MacroOutcome::Reevaluate(node, target_env) => {
                    self.bump_op()?;
                    match &node {
                        Ast::Form(inner) => self.eval_form_body(inner, &target_env),
                        _ => self.eval(&node, &target_env),
                    }
                }
            },
            Value::HostFn(f) => {
                let args = items[1..]
                    .iter()
                    .map(|a| self.eval(a, env))
                    .collect::<Result<Vec<_>, _>>()?;
                f(&args)
            }
            _ => Err(EvalError::not_callable()),
        }
    }

    fn bump_op(&self) -> Result<(), EvalError> {
        let next = self.op_count.get() + 1;
        self.op_count.set(next);
        if let Some(max) = self.max_ops {
            if next > max {
                return Err(EvalError::OpsThresholdExceeded { max });
            }
        }
        Ok(())
    }
}

/// Evaluates a whole program (a sequence of top-level forms), returning the
/// value of the last form. Earlier forms run for effect; bindings created
/// by `setglobal`/`defn` persist across sibling forms because they all share
/// `env`.
pub fn eval_program(
    forms: &[Ast],
    env: &Rc<Environment>,
    max_ops: Option<u64>,
) -> Result<Value, EvalError> {
    let evaluator = Evaluator::new(max_ops);
    let mut result = Value::Nil;
    for form in forms {
        result = evaluator.eval(form, env)?;
    }
    Ok(result)
}
