use std::fmt;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Reg {
    AX,
    DX,
    DI,
    R8,
    BP,
    SP,
}

impl Reg {
    /// Every expression leaves its result here.
    pub const VALUE: Reg = Reg::DI;
    /// Holds the saved right operand of a binary operation.
    pub const SCRATCH: Reg = Reg::R8;

    pub fn reg_name64(&self) -> &'static str {
        match self {
            Reg::AX => "%rax",
            Reg::DX => "%rdx",
            Reg::DI => "%rdi",
            Reg::R8 => "%r8",
            Reg::BP => "%rbp",
            Reg::SP => "%rsp",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reg_name64())
    }
}
