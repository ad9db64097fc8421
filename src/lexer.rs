// ABOUTME: Longest-prefix-match scanner turning source text into a flat token stream

use crate::ast::{NumLit, Token, TokenKind};
use crate::error::CompileError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace1},
    combinator::{opt, recognize, value},
    sequence::delimited,
    IResult, Parser,
};

const VAR_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_><+!=*/%?-";

fn lpar(input: &str) -> IResult<&str, TokenKind> {
    value(TokenKind::LPar, char('(')).parse(input)
}

fn rpar(input: &str) -> IResult<&str, TokenKind> {
    value(TokenKind::RPar, char(')')).parse(input)
}

fn num(input: &str) -> IResult<&str, TokenKind> {
    let (rest, text) = recognize((
        opt(char('-')),
        digit1,
        opt((char('.'), digit1)),
    ))
    .parse(input)?;

    let kind = if text.contains('.') {
        text.parse().map(NumLit::Float)
    } else {
        text.parse().map(NumLit::Int)
    };
    // The grammar bounds shape, not range: a literal with enough digits to
    // overflow i64/f64 still matches `digit1` but fails here.
    let kind = kind.map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge)))?;
    Ok((rest, TokenKind::Num(kind)))
}

fn var(input: &str) -> IResult<&str, TokenKind> {
    take_while1(|c: char| VAR_CHARS.contains(c))
        .map(|text: &str| TokenKind::Var(text.to_string()))
        .parse(input)
}

/// Parses a single- or double-quoted string literal with backslash escapes,
/// consuming characters by hand rather than via a combinator: the body may
/// be empty and contain either quote character, which don't compose cleanly
/// through `escaped`/`escaped_transform`.
fn quoted_string(input: &str) -> IResult<&str, String> {
    let quote = match input.chars().next() {
        Some(c @ ('"' | '\'')) => c,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    };
    let mut chars = input.char_indices().skip(1);
    let mut result = String::new();

    loop {
        match chars.next() {
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, c)) => result.push(c),
                None => {
                    return Err(nom::Err::Error(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::Escaped,
                    )))
                }
            },
            Some((i, c)) if c == quote => {
                let end = i + c.len_utf8();
                return Ok((&input[end..], result));
            }
            Some((_, c)) => result.push(c),
            None => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Eof,
                )))
            }
        }
    }
}

fn string(input: &str) -> IResult<&str, TokenKind> {
    quoted_string.map(TokenKind::Str).parse(input)
}

fn time_literal(input: &str) -> IResult<&str, TokenKind> {
    let (rest, inner) = delimited(
        tag("#t{"),
        nom::bytes::complete::take_while(|c: char| c != '{' && c != '}'),
        char('}'),
    )
    .parse(input)?;

    let parsed = time::OffsetDateTime::parse(inner, &time::format_description::well_known::Rfc3339)
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;

    Ok((rest, TokenKind::Time(parsed)))
}

fn fn_keyword(input: &str) -> IResult<&str, TokenKind> {
    let (rest, _) = tag("fn")(input)?;
    // Only a keyword when not actually the prefix of a longer VAR name.
    if rest.chars().next().is_some_and(|c| VAR_CHARS.contains(c)) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((rest, TokenKind::FnKeyword))
}

fn token_kind(input: &str) -> IResult<&str, TokenKind> {
    alt((
        lpar,
        rpar,
        time_literal,
        string,
        num,
        fn_keyword,
        var,
    ))
    .parse(input)
}

fn skip_space(input: &str) -> &str {
    match multispace1::<_, nom::error::Error<&str>>(input) {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

/// Tokenizes `source`, discarding whitespace (`SPC`) tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut remaining = source;

    loop {
        let before_space = remaining;
        remaining = skip_space(remaining);
        let pos = source.len() - remaining.len();
        let _ = before_space;

        if remaining.is_empty() {
            break;
        }

        match token_kind(remaining) {
            Ok((rest, kind)) => {
                tokens.push(Token { kind, pos });
                remaining = rest;
            }
            Err(_) => {
                return Err(CompileError::InvalidToken {
                    pos,
                    remaining: remaining.chars().take(32).collect(),
                });
            }
        }
    }

    Ok(tokens)
}
