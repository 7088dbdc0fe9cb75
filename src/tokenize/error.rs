use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("invalid character `{0}` at byte {1}")]
    InvalidCharacter(char, usize),

    #[error("number literal `{0}` at byte {1} is too large")]
    NumberTooLarge(String, usize),
}
