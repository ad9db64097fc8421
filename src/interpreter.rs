// ABOUTME: Embedding surface: Interpreter/Program handles and the host binding map

use crate::builtins;
use crate::env::Environment;
use crate::error::{CompileError, EvalError, RunError};
use crate::eval;
use crate::parser;
use crate::special_forms;
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// A symbol → value map a host registers before running a program. Values
/// may be plain data or `Fn(&[Value]) -> Result<Value, EvalError>` closures
/// bound via [`HostBindings::bind_fn`], mirroring the teacher's
/// `tools::Tool`/`SimpleTool` adapter shape but as closures rather than bare
/// function pointers, so a host can close over its own state.
#[derive(Clone, Default)]
pub struct HostBindings(HashMap<String, Value>);

impl HostBindings {
    pub fn new() -> Self {
        HostBindings(HashMap::new())
    }

    /// Binds a plain value, consuming and returning `self` for chaining.
    pub fn bind(mut self, name: impl Into<String>, value: Value) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Binds a host-supplied callable.
    pub fn bind_fn(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        self.0.insert(name.into(), Value::HostFn(Rc::new(f)));
        self
    }

    fn install(&self, env: &Rc<Environment>) {
        for (name, value) in &self.0 {
            env.set_local(name.clone(), value.clone());
        }
    }
}

/// Builder for the language's fixed special forms and built-in library, plus
/// whatever default host bindings and operation cap the embedder configures.
/// Cheap to clone: the prelude frame is reference-counted and shared.
#[derive(Clone)]
pub struct Interpreter {
    prelude: Rc<Environment>,
    default_bindings: HostBindings,
    max_ops: Option<u64>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let prelude = Environment::new();
        special_forms::register(&prelude);
        builtins::register_all(&prelude);
        Interpreter {
            prelude,
            default_bindings: HostBindings::new(),
            max_ops: None,
        }
    }

    pub fn with_bindings(bindings: HostBindings) -> Self {
        let mut interpreter = Self::new();
        interpreter.default_bindings = bindings;
        interpreter
    }

    pub fn with_max_ops(mut self, max_ops: u64) -> Self {
        self.max_ops = Some(max_ops);
        self
    }

    /// Lexes and parses `source` eagerly; only compile-time failures
    /// (*invalid-token*, *syntax-error*) surface here.
    pub fn compile(&self, source: &str) -> Result<Program, CompileError> {
        let span = tracing::info_span!("compile", source_len = source.len());
        let _enter = span.enter();
        match parser::parse(source) {
            Ok(forms) => {
                tracing::debug!(forms = forms.len(), "compiled");
                Ok(Program {
                    forms: Rc::new(forms),
                    prelude: Rc::clone(&self.prelude),
                    default_bindings: self.default_bindings.clone(),
                    max_ops: self.max_ops,
                })
            }
            Err(err) => {
                tracing::error!(error = %err, "compile failed");
                Err(err)
            }
        }
    }

    /// Convenience one-shot: compiles then runs immediately.
    pub fn run(
        &self,
        source: &str,
        bindings: HostBindings,
        max_ops: Option<u64>,
    ) -> Result<Value, RunError> {
        Ok(self.compile(source)?.run(bindings, max_ops)?)
    }
}

/// A compiled program: parsed AST plus the prelude frame and default
/// bindings it was compiled against. `Program` is `!Send`/`!Sync` (it
/// carries `Rc`), so sharing one instance across OS threads requires
/// cloning it per worker — `Program::run` itself never mutates `prelude`
/// (or any other state shared across calls): every call flattens `prelude`
/// into a brand-new, parentless frame of its own before evaluating, so
/// `setglobal`/`defn` — which always write to `root()` — land in that
/// call's own frame and can never leak into `prelude` or into any other
/// call. The `Rc` handles inside `Program` are not atomically reference
/// counted, which is the only obstacle to sharing across OS threads.
#[derive(Clone)]
pub struct Program {
    forms: Rc<Vec<crate::ast::Ast>>,
    prelude: Rc<Environment>,
    default_bindings: HostBindings,
    max_ops: Option<u64>,
}

impl Program {
    /// Evaluates the compiled program against a fresh, call-local root
    /// frame, seeded from the interpreter's default bindings and then
    /// `bindings` (which shadow any default of the same name). `max_ops`
    /// overrides the interpreter's configured cap for this call only.
    pub fn run(&self, bindings: HostBindings, max_ops: Option<u64>) -> Result<Value, EvalError> {
        let span = tracing::info_span!("run", forms = self.forms.len());
        let _enter = span.enter();

        // `flatten` gives this call its own root frame instead of chaining
        // off `self.prelude` directly — otherwise `setglobal`/`defn` would
        // resolve `root()` to the shared prelude and leak bindings across
        // every other call and clone of this `Program`.
        let call_frame = self.prelude.flatten();
        self.default_bindings.install(&call_frame);
        bindings.install(&call_frame);

        let effective_max = max_ops.or(self.max_ops);
        eval::eval_program(&self.forms, &call_frame, effective_max).map_err(|err| {
            tracing::error!(error = %err, "evaluation failed");
            err
        })
    }
}
