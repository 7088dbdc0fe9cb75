pub mod error;

use std::fmt;

use logos::Logos;

use crate::tokenize::error::TokenizerError;

#[derive(Debug, Clone, PartialEq, Logos)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")]
pub enum TokenKind {
    #[token("PRINT")]
    Print,

    #[token("LET")]
    Let,

    #[token("IF")]
    If,

    #[token("THEN")]
    Then,

    #[token("ELSE")]
    Else,

    #[token("END")]
    End,

    #[token("WHILE")]
    While,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("=")]
    Equal,

    #[token("<")]
    LessThan,

    #[token(">")]
    GreaterThan,

    // Magnitude only; the sign is applied by the parser so that i64::MIN is reachable.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Number(u64),

    #[regex(r"[A-Z]", |lex| lex.slice().chars().next())]
    Variable(char),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Print => f.write_str("PRINT"),
            TokenKind::Let => f.write_str("LET"),
            TokenKind::If => f.write_str("IF"),
            TokenKind::Then => f.write_str("THEN"),
            TokenKind::Else => f.write_str("ELSE"),
            TokenKind::End => f.write_str("END"),
            TokenKind::While => f.write_str("WHILE"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Equal => f.write_str("="),
            TokenKind::LessThan => f.write_str("<"),
            TokenKind::GreaterThan => f.write_str(">"),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Variable(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizerError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = vec![];

    while let Some(t) = lexer.next() {
        let (start, end) = (lexer.span().start, lexer.span().end);
        let kind = t.map_err(|()| classify_error(lexer.slice(), start))?;
        tokens.push(Token { kind, start, end });
    }

    Ok(tokens)
}

fn classify_error(slice: &str, at: usize) -> TokenizerError {
    if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        return TokenizerError::NumberTooLarge(slice.to_string(), at);
    }
    let ch = slice.chars().next().unwrap_or('\0');
    TokenizerError::InvalidCharacter(ch, at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keywords_win_over_single_letters() {
        assert_eq!(
            kinds("IF I < 10 THEN PRINT I END IF"),
            vec![
                TokenKind::If,
                TokenKind::Variable('I'),
                TokenKind::LessThan,
                TokenKind::Number(10),
                TokenKind::Then,
                TokenKind::Print,
                TokenKind::Variable('I'),
                TokenKind::End,
                TokenKind::If,
            ]
        );
    }

    #[test]
    fn comments_and_newlines_are_skipped() {
        assert_eq!(
            kinds("# setup\nLET A = 1 # trailing\n"),
            vec![
                TokenKind::Let,
                TokenKind::Variable('A'),
                TokenKind::Equal,
                TokenKind::Number(1),
            ]
        );
    }

    #[test]
    fn min_magnitude_is_lexed() {
        assert_eq!(
            kinds("9223372036854775808"),
            vec![TokenKind::Number(9_223_372_036_854_775_808)]
        );
    }

    #[test]
    fn lowercase_is_rejected() {
        assert_eq!(
            tokenize("LET a = 1"),
            Err(TokenizerError::InvalidCharacter('a', 4))
        );
    }

    #[test]
    fn oversized_number_is_rejected() {
        assert!(matches!(
            tokenize("PRINT 99999999999999999999"),
            Err(TokenizerError::NumberTooLarge(_, 6))
        ));
    }
}
