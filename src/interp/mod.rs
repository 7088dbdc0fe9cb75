pub mod error;

use std::io::Write;

use crate::codegen::asm::FRAME_SLOTS;
use crate::codegen::fold;
use crate::interp::error::InterpError;
use crate::parse::{BinaryOp, Node};

type Result<T = ()> = std::result::Result<T, InterpError>;

/// Runs a program directly, with the same 64-bit semantics as the generated
/// code. `PRINT` writes one decimal number per line to `out`.
pub struct Interpreter<W: Write> {
    vars: [i64; FRAME_SLOTS as usize],
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            vars: [0; FRAME_SLOTS as usize],
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn run(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Print(expr) => {
                let value = self.eval(expr)?;
                writeln!(self.out, "{value}")?;
            }
            Node::Sequence(stmts) => {
                for stmt in stmts {
                    self.run(stmt)?;
                }
            }
            Node::Let { var, value } => {
                let value = self.eval(value)?;
                self.vars[slot(*var)?] = value;
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.condition("IF", condition)? {
                    self.run(then_branch)?;
                } else if let Some(branch) = else_branch {
                    self.run(branch)?;
                }
            }
            Node::While { condition, body } => {
                while self.condition("WHILE", condition)? {
                    self.run(body)?;
                }
            }
            Node::Num(_) | Node::Var(_) | Node::Binary { .. } => {
                self.eval(node)?;
            }
        }
        Ok(())
    }

    fn eval(&self, node: &Node) -> Result<i64> {
        match node {
            Node::Num(value) => Ok(*value),
            Node::Var(name) => Ok(self.vars[slot(*name)?]),
            Node::Binary { op, .. } if op.is_comparison() => {
                Err(InterpError::ComparisonAsValue(*op))
            }
            Node::Binary { op, left, right } => {
                let right = self.eval(right)?;
                let left = self.eval(left)?;
                Ok(fold::apply(*op, left, right)?)
            }
            other => Err(InterpError::NotAnExpression(other.kind_name())),
        }
    }

    fn condition(&self, construct: &'static str, node: &Node) -> Result<bool> {
        let Node::Binary { op, left, right } = node else {
            return Err(InterpError::ConditionNotComparison(construct));
        };
        let right = self.eval(right)?;
        let left = self.eval(left)?;
        match op {
            BinaryOp::Equal => Ok(left == right),
            BinaryOp::Greater => Ok(left > right),
            BinaryOp::Less => Ok(left < right),
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                Err(InterpError::ConditionNotComparison(construct))
            }
        }
    }
}

fn slot(name: char) -> Result<usize> {
    if name.is_ascii_uppercase() {
        Ok((name as u8 - b'A') as usize)
    } else {
        Err(InterpError::InvalidVariable(name))
    }
}
