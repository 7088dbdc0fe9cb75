use std::io;

use thiserror::Error;

use crate::codegen::error::ArithmeticError;
use crate::parse::BinaryOp;

#[derive(Debug, Error)]
pub enum InterpError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("arithmetic fault: {0}")]
    Arithmetic(#[from] ArithmeticError),
    #[error("comparison `{0}` has no value")]
    ComparisonAsValue(BinaryOp),
    #[error("condition of {0} must be a comparison")]
    ConditionNotComparison(&'static str),
    #[error("{0} does not produce a value")]
    NotAnExpression(&'static str),
    #[error("variable `{0}` is not a letter A-Z")]
    InvalidVariable(char),
}
