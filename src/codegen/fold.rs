use crate::codegen::error::{ArithmeticError, CodegenError, Result};
use crate::parse::{BinaryOp, Node};

/// Whether `node` is a number literal or a binary operation over such.
pub fn is_constant(node: &Node) -> bool {
    match node {
        Node::Num(_) => true,
        Node::Binary { left, right, .. } => is_constant(left) && is_constant(right),
        _ => false,
    }
}

/// Evaluates a constant subtree. Right operands are evaluated before left ones,
/// matching the order in which the generated code computes them.
pub fn fold(node: &Node) -> Result<i64> {
    match node {
        Node::Num(value) => Ok(*value),
        Node::Binary { op, left, right } => {
            let right = fold(right)?;
            let left = fold(left)?;
            Ok(apply(*op, left, right)?)
        }
        other => Err(CodegenError::NotConstant(other.kind_name())),
    }
}

/// 64-bit signed arithmetic with wrapping `+ - *` and `/` truncating toward
/// zero. Comparison operators have no value and yield 0.
pub fn apply(op: BinaryOp, left: i64, right: i64) -> std::result::Result<i64, ArithmeticError> {
    match op {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Sub => Ok(left.wrapping_sub(right)),
        BinaryOp::Mul => Ok(left.wrapping_mul(right)),
        BinaryOp::Div => match right {
            0 => Err(ArithmeticError::DivisionByZero),
            -1 if left == i64::MIN => Err(ArithmeticError::Overflow),
            _ => Ok(left / right),
        },
        BinaryOp::Equal | BinaryOp::Greater | BinaryOp::Less => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(op: BinaryOp, l: Node, r: Node) -> Node {
        Node::binary(op, l, r)
    }

    #[test]
    fn literals_and_nested_arithmetic_are_constant() {
        let tree = bin(
            BinaryOp::Mul,
            bin(BinaryOp::Add, Node::Num(2), Node::Num(3)),
            Node::Num(4),
        );
        assert!(is_constant(&tree));
        assert_eq!(fold(&tree).unwrap(), 20);
    }

    #[test]
    fn variables_are_not_constant() {
        let tree = bin(BinaryOp::Add, Node::Num(2), Node::Var('A'));
        assert!(!is_constant(&tree));
        assert!(!is_constant(&Node::print(Node::Num(1))));
        assert!(matches!(
            fold(&tree),
            Err(CodegenError::NotConstant("variable"))
        ));
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(apply(BinaryOp::Div, 7, 2), Ok(3));
        assert_eq!(apply(BinaryOp::Div, -7, 2), Ok(-3));
        assert_eq!(apply(BinaryOp::Div, 7, -2), Ok(-3));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(apply(BinaryOp::Add, i64::MAX, 1), Ok(i64::MIN));
        assert_eq!(apply(BinaryOp::Mul, i64::MIN, -1), Ok(i64::MIN));
    }

    #[test]
    fn division_faults() {
        assert_eq!(
            apply(BinaryOp::Div, 1, 0),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            apply(BinaryOp::Div, i64::MIN, -1),
            Err(ArithmeticError::Overflow)
        );
        let tree = bin(
            BinaryOp::Div,
            Node::Num(5),
            bin(BinaryOp::Sub, Node::Num(3), Node::Num(3)),
        );
        assert!(matches!(
            fold(&tree),
            Err(CodegenError::Arithmetic(ArithmeticError::DivisionByZero))
        ));
    }

    #[test]
    fn comparisons_fold_to_zero() {
        assert_eq!(
            fold(&bin(BinaryOp::Less, Node::Num(1), Node::Num(2))).unwrap(),
            0
        );
    }
}
