use thiserror::Error;

use crate::tokenize::TokenKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("unexpected end of input{0}")]
    UnexpectedEof(&'static str),

    #[error("expected token {0}, found {1:?}")]
    ExpectedToken(TokenKind, Option<TokenKind>),

    #[error("expected a variable A-Z, found {0:?}")]
    ExpectedVariable(Option<TokenKind>),

    #[error("expected a number after unary '-', found {0:?}")]
    ExpectedNumber(Option<TokenKind>),

    #[error("expected a statement, found {0}")]
    ExpectedStatement(TokenKind),

    #[error("expected a comparison operator (=, <, >), found {0:?}")]
    ExpectedComparison(Option<TokenKind>),

    #[error("expected a number, variable or '(', found {0:?}")]
    ExpectedPrimary(Option<TokenKind>),

    #[error("number literal {0} does not fit in a 64-bit signed integer")]
    LiteralOutOfRange(String),
}

pub(crate) type PResult<T> = Result<T, ParserError>;
