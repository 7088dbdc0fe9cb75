pub mod asm;
pub mod error;
pub mod fold;
pub mod label;
pub mod reg;
pub mod strength;

use tracing::trace;

use crate::codegen::asm::{CondCode, Instr, Label, Operand, SLOT_SIZE};
use crate::codegen::error::{ArithmeticError, CodegenError, Result};
use crate::codegen::label::LabelAllocator;
use crate::codegen::reg::Reg;
use crate::parse::{BinaryOp, Node};

pub const DEFAULT_PRINT_SYMBOL: &str = "print_int";

/// Lowers a tree straight to instructions. Every expression leaves its value
/// in [`Reg::VALUE`]; binary operations park their right operand on the
/// machine stack and pop it into [`Reg::SCRATCH`].
pub struct Codegen<'a> {
    labels: &'a mut LabelAllocator,
    print_symbol: String,
    instructions: Vec<Instr>,
}

impl<'a> Codegen<'a> {
    pub fn new(labels: &'a mut LabelAllocator) -> Self {
        Self {
            labels,
            print_symbol: DEFAULT_PRINT_SYMBOL.to_string(),
            instructions: vec![],
        }
    }

    pub fn with_print_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.print_symbol = symbol.into();
        self
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.instructions
    }

    pub fn finish(self) -> Vec<Instr> {
        self.instructions
    }

    pub fn compile(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Num(value) => self.emit(Instr::load_imm(*value)),
            Node::Print(expr) => {
                self.compile(expr)?;
                self.emit(Instr::Call(self.print_symbol.clone()));
            }
            Node::Sequence(stmts) => {
                for stmt in stmts {
                    self.compile(stmt)?;
                }
            }
            Node::Binary { op, left, right } => self.compile_binary(node, *op, left, right)?,
            Node::Var(name) => {
                let slot = frame_slot(*name)?;
                self.emit(Instr::mov(slot, Operand::Reg(Reg::VALUE)));
            }
            Node::Let { var, value } => {
                let slot = frame_slot(*var)?;
                self.compile(value)?;
                self.emit(Instr::mov(Operand::Reg(Reg::VALUE), slot));
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let id = self.labels.next_if();
                self.branch_unless("IF", condition, Label::IfElse(id))?;
                self.emit(Instr::Label(Label::IfThen(id)));
                self.compile(then_branch)?;
                self.emit(Instr::Jmp(Label::IfEnd(id)));
                self.emit(Instr::Label(Label::IfElse(id)));
                if let Some(branch) = else_branch {
                    self.compile(branch)?;
                }
                self.emit(Instr::Label(Label::IfEnd(id)));
            }
            Node::While { condition, body } => {
                let id = self.labels.next_while();
                self.emit(Instr::Label(Label::WhileTop(id)));
                self.branch_unless("WHILE", condition, Label::WhileEnd(id))?;
                self.compile(body)?;
                self.emit(Instr::Jmp(Label::WhileTop(id)));
                self.emit(Instr::Label(Label::WhileEnd(id)));
            }
        }
        Ok(())
    }

    fn compile_binary(&mut self, node: &Node, op: BinaryOp, left: &Node, right: &Node) -> Result<()> {
        if fold::is_constant(node) {
            let value = fold::fold(node)?;
            trace!(%op, value, "folded constant expression");
            self.emit(Instr::load_imm(value));
            return Ok(());
        }

        if fold::is_constant(right) {
            let constant = fold::fold(right)?;
            match op {
                BinaryOp::Mul => {
                    let shift = strength::exponent_if_power_of_two(constant);
                    if shift != 0 {
                        trace!(factor = constant, shift, "multiplication reduced to shift");
                        self.compile(left)?;
                        self.emit(Instr::Sal {
                            shift,
                            dst: Reg::VALUE,
                        });
                        return Ok(());
                    }
                }
                BinaryOp::Div if constant == 0 => {
                    return Err(ArithmeticError::DivisionByZero.into());
                }
                _ => {}
            }
        }

        self.compile_operands(op, left, right)
    }

    /// General case: right operand first, saved across the left operand.
    fn compile_operands(&mut self, op: BinaryOp, left: &Node, right: &Node) -> Result<()> {
        self.compile(right)?;
        self.emit(Instr::Push(Reg::VALUE));
        self.compile(left)?;
        self.emit(Instr::Pop(Reg::SCRATCH));

        let (src, dst) = (Reg::SCRATCH, Reg::VALUE);
        match op {
            BinaryOp::Add => self.emit(Instr::Add { src, dst }),
            BinaryOp::Sub => self.emit(Instr::Sub { src, dst }),
            BinaryOp::Mul => self.emit(Instr::Imul { src, dst }),
            BinaryOp::Div => {
                self.emit(Instr::mov(Operand::Reg(Reg::VALUE), Operand::Reg(Reg::AX)));
                self.emit(Instr::Cqto);
                self.emit(Instr::Idiv(Reg::SCRATCH));
                self.emit(Instr::mov(Operand::Reg(Reg::AX), Operand::Reg(Reg::VALUE)));
            }
            // Only the flags matter; the value register keeps the left operand.
            BinaryOp::Equal | BinaryOp::Greater | BinaryOp::Less => {
                self.emit(Instr::Cmp { src, dst })
            }
        }
        Ok(())
    }

    /// Sets the flags for `condition` and jumps to `target` when it is false.
    /// The comparison itself is never folded so the flags are always live.
    fn branch_unless(&mut self, construct: &'static str, condition: &Node, target: Label) -> Result<()> {
        let not_comparison = || CodegenError::ConditionNotComparison {
            construct,
            found: condition.kind_name(),
        };
        let Node::Binary { op, left, right } = condition else {
            return Err(not_comparison());
        };
        let cc = CondCode::unless(*op).ok_or_else(not_comparison)?;

        self.compile_operands(*op, left, right)?;
        self.emit(Instr::JmpCC(cc, target));
        Ok(())
    }

    fn emit(&mut self, instr: Instr) {
        self.instructions.push(instr);
    }
}

/// Compiles `node` with a fresh generator drawing labels from `labels`.
pub fn compile(node: &Node, labels: &mut LabelAllocator) -> Result<Vec<Instr>> {
    let mut codegen = Codegen::new(labels);
    codegen.compile(node)?;
    Ok(codegen.finish())
}

/// The frame operand of variable `name`: `A` is 8 bytes below the frame base, `Z` 208.
pub fn frame_slot(name: char) -> Result<Operand> {
    if !name.is_ascii_uppercase() {
        return Err(CodegenError::InvalidVariable(name));
    }
    let index = (name as u8 - b'A') as i64;
    Ok(Operand::Frame(SLOT_SIZE * (index + 1)))
}
