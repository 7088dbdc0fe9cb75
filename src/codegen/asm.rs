use std::fmt;
use std::io::Write;

use crate::codegen::error::Result;
use crate::codegen::reg::Reg;
use crate::parse::BinaryOp;

/// One stack slot per letter `A`..=`Z`.
pub const FRAME_SLOTS: i64 = 26;
pub const SLOT_SIZE: i64 = 8;
/// Bytes reserved below `%rbp`; a multiple of 16 so calls stay aligned.
pub const FRAME_SIZE: i64 = FRAME_SLOTS * SLOT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Imm(i64),
    Reg(Reg),
    /// `offset` bytes below the frame base.
    Frame(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(value) => write!(f, "${value}"),
            Operand::Reg(reg) => write!(f, "{reg}"),
            Operand::Frame(offset) => write!(f, "-{:#04x}({})", offset, Reg::BP),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    IfThen(usize),
    IfElse(usize),
    IfEnd(usize),
    WhileTop(usize),
    WhileEnd(usize),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::IfThen(id) => write!(f, "IF_label{id}"),
            Label::IfElse(id) => write!(f, "IF_ELSE_label{id}"),
            Label::IfEnd(id) => write!(f, "ENDIF{id}"),
            Label::WhileTop(id) => write!(f, "WHILE_label{id}"),
            Label::WhileEnd(id) => write!(f, "ENDWHILE_label{id}"),
        }
    }
}

/// Branch conditions, each the negation of a source comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondCode {
    NotEqual,
    NotGreater,
    NotLess,
}

impl CondCode {
    /// The condition under which a comparison `op` is false.
    pub fn unless(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Equal => Some(CondCode::NotEqual),
            BinaryOp::Greater => Some(CondCode::NotGreater),
            BinaryOp::Less => Some(CondCode::NotLess),
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            CondCode::NotEqual => "jne",
            CondCode::NotGreater => "jng",
            CondCode::NotLess => "jnl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    Mov { src: Operand, dst: Operand },
    Push(Reg),
    Pop(Reg),
    Add { src: Reg, dst: Reg },
    Sub { src: Reg, dst: Reg },
    Imul { src: Reg, dst: Reg },
    Sal { shift: u32, dst: Reg },
    /// Sign-extends `%rax` into `%rdx:%rax`.
    Cqto,
    Idiv(Reg),
    Cmp { src: Reg, dst: Reg },
    Jmp(Label),
    JmpCC(CondCode, Label),
    Label(Label),
    Call(String),
}

impl Instr {
    pub fn mov(src: Operand, dst: Operand) -> Self {
        Instr::Mov { src, dst }
    }

    pub fn load_imm(value: i64) -> Self {
        Instr::mov(Operand::Imm(value), Operand::Reg(Reg::VALUE))
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Label(label) => return write!(f, "{label}:"),
            _ => f.write_str("  ")?,
        }
        match self {
            Instr::Mov { src, dst } => write!(f, "mov {src}, {dst}"),
            Instr::Push(reg) => write!(f, "push {reg}"),
            Instr::Pop(reg) => write!(f, "pop {reg}"),
            Instr::Add { src, dst } => write!(f, "add {src}, {dst}"),
            Instr::Sub { src, dst } => write!(f, "sub {src}, {dst}"),
            Instr::Imul { src, dst } => write!(f, "imul {src}, {dst}"),
            Instr::Sal { shift, dst } => write!(f, "sal ${shift}, {dst}"),
            Instr::Cqto => f.write_str("cqto"),
            Instr::Idiv(reg) => write!(f, "idiv {reg}"),
            Instr::Cmp { src, dst } => write!(f, "cmp {src}, {dst}"),
            Instr::Jmp(label) => write!(f, "jmp {label}"),
            Instr::JmpCC(cc, label) => write!(f, "{} {label}", cc.mnemonic()),
            Instr::Call(symbol) => write!(f, "call {symbol}"),
            Instr::Label(_) => Ok(()),
        }
    }
}

/// Renders instruction records as text, optionally wrapped in a function
/// that owns the variable frame.
pub struct AsmWriter<W: Write> {
    pub buf: W,
}

impl<W: Write> AsmWriter<W> {
    pub fn new(buf: W) -> Self {
        Self { buf }
    }

    pub fn emit_listing(&mut self, instructions: &[Instr]) -> Result<()> {
        for instr in instructions {
            writeln!(self.buf, "{instr}")?;
        }
        Ok(())
    }

    pub fn emit_program(&mut self, entry: &str, instructions: &[Instr]) -> Result<()> {
        self.emit_prologue(entry)?;
        self.emit_listing(instructions)?;
        self.emit_epilogue()
    }

    fn emit_prologue(&mut self, entry: &str) -> Result<()> {
        writeln!(self.buf, ".text")?;
        writeln!(self.buf, ".globl {entry}")?;
        writeln!(self.buf, "{entry}:")?;
        writeln!(self.buf, "  push {}", Reg::BP)?;
        writeln!(self.buf, "  mov {}, {}", Reg::SP, Reg::BP)?;
        writeln!(self.buf, "  sub ${}, {}", FRAME_SIZE, Reg::SP)?;
        Ok(())
    }

    fn emit_epilogue(&mut self) -> Result<()> {
        writeln!(self.buf, "  mov {}, {}", Reg::BP, Reg::SP)?;
        writeln!(self.buf, "  pop {}", Reg::BP)?;
        writeln!(self.buf, "  ret")?;
        writeln!(self.buf, ".section .note.GNU-stack,\"\",@progbits")?;
        Ok(())
    }
}
