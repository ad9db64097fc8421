// ABOUTME: Recursive-descent parser turning a token stream into a forest of AST forms

use crate::ast::{Ast, Token, TokenKind};
use crate::error::CompileError;
use crate::lexer;

/// `Program := Form*`, `Form := Atom | List`, `List := '(' Form* ')'`.
pub fn parse(source: &str) -> Result<Vec<Ast>, CompileError> {
    let tokens = lexer::tokenize(source)?;
    parse_tokens(&tokens)
}

fn parse_tokens(tokens: &[Token]) -> Result<Vec<Ast>, CompileError> {
    let mut pos = 0;
    let mut forms = Vec::new();

    while pos < tokens.len() {
        let (form, next) = parse_form(tokens, pos)?;
        forms.push(form);
        pos = next;
    }

    Ok(forms)
}

fn parse_form(tokens: &[Token], pos: usize) -> Result<(Ast, usize), CompileError> {
    match tokens.get(pos) {
        None => Err(CompileError::SyntaxError {
            message: "unexpected end of input".to_string(),
        }),
        Some(tok) if tok.kind == TokenKind::RPar => Err(CompileError::SyntaxError {
            message: format!("unexpected ')' at byte {}", tok.pos),
        }),
        Some(tok) if tok.kind == TokenKind::LPar => parse_list(tokens, pos + 1),
        Some(tok) => Ok((Ast::Atom(tok.clone()), pos + 1)),
    }
}

fn parse_list(tokens: &[Token], mut pos: usize) -> Result<(Ast, usize), CompileError> {
    let mut items = Vec::new();

    loop {
        match tokens.get(pos) {
            None => {
                return Err(CompileError::SyntaxError {
                    message: "unclosed '('".to_string(),
                })
            }
            Some(tok) if tok.kind == TokenKind::RPar => {
                return Ok((Ast::form(items), pos + 1));
            }
            _ => {
                let (form, next) = parse_form(tokens, pos)?;
                items.push(form);
                pos = next;
            }
        }
    }
}
