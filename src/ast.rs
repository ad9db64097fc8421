// ABOUTME: Token and AST node types shared by the lexer, parser, and evaluator

use crate::value::Value;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum NumLit {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LPar,
    RPar,
    Var(String),
    Num(NumLit),
    Str(String),
    Time(time::OffsetDateTime),
    /// Reserved for future use; the lexer recognizes it but nothing in the
    /// evaluator currently treats it as meaningful in value position.
    FnKeyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the source where this token starts, for error messages.
    pub pos: usize,
}

/// A node in the parsed tree: either a leaf token, or an ordered form
/// (parenthesized sequence of sub-nodes).
///
/// `Literal` never comes out of the parser — it exists only so that
/// `apply` can hand already-evaluated `Value`s to the same macro-invocation
/// path used for ordinary, un-evaluated call arguments.
#[derive(Debug, Clone)]
pub enum Ast {
    Atom(Token),
    Form(Rc<Vec<Ast>>),
    Literal(Value),
}

impl Ast {
    pub fn form(nodes: Vec<Ast>) -> Ast {
        Ast::Form(Rc::new(nodes))
    }
}
