//! Tokenizer for the prompt expression syntax.
//!
//! Lexes `number op number` expressions, where `op` is one of `-`, `+`,
//! `&`, `|`, `^`, into typed tokens. This is input validation only: the
//! probe exchange never consumes the tokens, and nothing here touches the
//! wire. The `expr` subcommand of the CLI is the one consumer.

pub mod error;
pub mod parse;
pub mod token;

pub use error::{ExprError, Result};
pub use parse::{number, operator, sequence, tokenize};
pub use token::{Token, TokenKind};
