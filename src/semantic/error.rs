use thiserror::Error;

use crate::parse::BinaryOp;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    #[error("condition of {construct} must be a comparison (=, <, >), found {found}")]
    ConditionNotComparison {
        construct: &'static str,
        found: &'static str,
    },
    #[error("comparison `{0}` used as a value; comparisons are only allowed as IF/WHILE conditions")]
    ComparisonAsValue(BinaryOp),
    #[error("variable `{0}` is not a letter A-Z")]
    InvalidVariable(char),
}
