use std::io;

use thiserror::Error;

/// Faults of 64-bit signed division, shared by constant folding and the interpreter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("signed overflow: {min} / -1", min = i64::MIN)]
    Overflow,
}

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("arithmetic fault: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("cannot fold non-constant {0}")]
    NotConstant(&'static str),

    #[error("condition of {construct} must be a comparison (=, <, >), found {found}")]
    ConditionNotComparison {
        construct: &'static str,
        found: &'static str,
    },

    #[error("variable `{0}` has no frame slot; only A-Z are supported")]
    InvalidVariable(char),
}

pub type Result<T = ()> = std::result::Result<T, CodegenError>;
