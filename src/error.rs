// ABOUTME: Error types for the lex/parse and evaluation stages

use thiserror::Error;

/// The symbolic failure category a host distinguishes on, independent of
/// the human-readable message carried alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidToken,
    SyntaxError,
    UndefinedVar,
    ArgumentError,
    OpsThresholdExceeded,
}

#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("invalid token at byte {pos}: {remaining:?}")]
    InvalidToken { pos: usize, remaining: String },

    #[error("syntax error: {message}")]
    SyntaxError { message: String },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::InvalidToken { .. } => ErrorKind::InvalidToken,
            CompileError::SyntaxError { .. } => ErrorKind::SyntaxError,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("undefined variable: {0}")]
    UndefinedVar(String),

    #[error("{context}: {message}")]
    ArgumentError { context: String, message: String },

    #[error("operation count exceeded maximum of {max}")]
    OpsThresholdExceeded { max: u64 },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UndefinedVar(_) => ErrorKind::UndefinedVar,
            EvalError::ArgumentError { .. } => ErrorKind::ArgumentError,
            EvalError::OpsThresholdExceeded { .. } => ErrorKind::OpsThresholdExceeded,
        }
    }

    pub fn argument_error(context: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::ArgumentError {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn arity(context: &str, expected: impl std::fmt::Display, actual: usize) -> Self {
        EvalError::argument_error(
            context,
            format!("expected {} argument(s), got {}", expected, actual),
        )
    }

    pub fn type_error(context: &str, expected: &str, actual: &str, position: usize) -> Self {
        EvalError::argument_error(
            context,
            format!(
                "expected {} at argument {}, got {}",
                expected, position, actual
            ),
        )
    }

    pub fn not_callable() -> Self {
        EvalError::argument_error("eval", "non-callable in head position")
    }
}

/// Unifies `CompileError` and `EvalError` for the one-shot `Interpreter::run`
/// entry point, which can fail at either stage.
#[derive(Error, Debug, Clone)]
pub enum RunError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Compile(e) => e.kind(),
            RunError::Eval(e) => e.kind(),
        }
    }
}
