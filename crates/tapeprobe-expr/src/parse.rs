//! Combinator-style parsers over a borrowed input string.
//!
//! Every parser has the same shape: take the input, a byte position, and
//! the token list built so far; on a match, push tokens and return the
//! position after the match, with surrounding ASCII whitespace consumed.
//! [`sequence`] chains two parsers by feeding the first one's end position
//! into the second.

use crate::error::{ExprError, Result};
use crate::token::Token;

const OPERATORS: &[char] = &['-', '+', '&', '|', '^'];

/// Match an unsigned decimal number literal.
pub fn number(input: &str, pos: usize, tokens: &mut Vec<Token>) -> Result<usize> {
    let bytes = input.as_bytes();
    let start = skip_ws(input, pos);

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return Err(ExprError::ExpectedNumber { at: start });
    }

    tokens.push(Token::number(&input[start..end]));
    Ok(skip_ws(input, end))
}

/// Match one binary operator.
pub fn operator(input: &str, pos: usize, tokens: &mut Vec<Token>) -> Result<usize> {
    let start = skip_ws(input, pos);

    match input[start..].chars().next() {
        Some(op) if OPERATORS.contains(&op) => {
            tokens.push(Token::operator(op));
            Ok(skip_ws(input, start + op.len_utf8()))
        }
        _ => Err(ExprError::ExpectedOperator { at: start }),
    }
}

/// Chain two parsers: run `first`, then `second` from where it stopped.
pub fn sequence<P1, P2>(
    first: P1,
    second: P2,
) -> impl Fn(&str, usize, &mut Vec<Token>) -> Result<usize>
where
    P1: Fn(&str, usize, &mut Vec<Token>) -> Result<usize>,
    P2: Fn(&str, usize, &mut Vec<Token>) -> Result<usize>,
{
    move |input, pos, tokens| {
        let pos = first(input, pos, tokens)?;
        second(input, pos, tokens)
    }
}

/// Tokenize one `number op number` expression.
///
/// Trailing input past the expression is left unread; the grammar has
/// exactly three tokens and the caller sees exactly three.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let expression = sequence(number, sequence(operator, number));

    let mut tokens = Vec::new();
    expression(input, 0, &mut tokens)?;
    Ok(tokens)
}

fn skip_ws(input: &str, mut pos: usize) -> usize {
    let bytes = input.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
