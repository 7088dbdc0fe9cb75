pub mod error;

use crate::parse::Node;
use crate::semantic::error::SemanticError;

/// Checks the invariants code generation relies on but does not enforce:
/// conditions are comparisons, comparisons appear nowhere else, and every
/// variable names one of the 26 frame slots.
pub fn validate(node: &Node) -> Result<(), SemanticError> {
    match node {
        Node::Num(_) => Ok(()),
        Node::Var(name) => check_variable(*name),
        Node::Binary { op, left, right } => {
            if op.is_comparison() {
                return Err(SemanticError::ComparisonAsValue(*op));
            }
            validate(left)?;
            validate(right)
        }
        Node::Print(expr) => validate(expr),
        Node::Sequence(stmts) => stmts.iter().try_for_each(validate),
        Node::Let { var, value } => {
            check_variable(*var)?;
            validate(value)
        }
        Node::If {
            condition,
            then_branch,
            else_branch,
        } => {
            validate_condition("IF", condition)?;
            validate(then_branch)?;
            match else_branch {
                Some(branch) => validate(branch),
                None => Ok(()),
            }
        }
        Node::While { condition, body } => {
            validate_condition("WHILE", condition)?;
            validate(body)
        }
    }
}

fn validate_condition(construct: &'static str, condition: &Node) -> Result<(), SemanticError> {
    match condition {
        Node::Binary { op, left, right } if op.is_comparison() => {
            validate(left)?;
            validate(right)
        }
        other => Err(SemanticError::ConditionNotComparison {
            construct,
            found: other.kind_name(),
        }),
    }
}

fn check_variable(name: char) -> Result<(), SemanticError> {
    if name.is_ascii_uppercase() {
        Ok(())
    } else {
        Err(SemanticError::InvalidVariable(name))
    }
}
