use std::fmt::{Display, Formatter, Result};

use serde::{Serialize, Serializer};

use super::Opcode;

/// Any value which can sit in the operation field of an [`Instruction`].
pub trait Operation: Display {
    /// The opcode this operation denotes, or `None` if it is not part of the
    /// instruction set.
    fn opcode(&self) -> Option<Opcode>;
}

impl Operation for Opcode {
    fn opcode(&self) -> Option<Opcode> {
        Some(*self)
    }
}

/// The operation named by a line of source text.  The reader does not reject
/// unknown words, it hands them to the lowering pass which reports and skips
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Known(Opcode),
    Unrecognized(String),
}

impl Operation for Mnemonic {
    fn opcode(&self) -> Option<Opcode> {
        match self {
            Mnemonic::Known(op) => Some(*op),
            Mnemonic::Unrecognized(_) => None,
        }
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mnemonic::Known(op) => op.fmt(f),
            Mnemonic::Unrecognized(word) => f.write_str(word),
        }
    }
}

impl From<Opcode> for Mnemonic {
    fn from(op: Opcode) -> Self {
        Mnemonic::Known(op)
    }
}

/// An operation with its three operand fields.  Unused trailing fields are
/// zero.  Source programs use `Instruction<Mnemonic>`, lowered programs use
/// `Instruction<Opcode>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction<M = Opcode> {
    op: M,
    operands: [i64; 3],
}

pub type SourceInstruction = Instruction<Mnemonic>;

impl<M> Instruction<M> {
    pub fn new(op: M, a: i64, b: i64, c: i64) -> Instruction<M> {
        Instruction {
            op,
            operands: [a, b, c],
        }
    }

    pub fn op(&self) -> &M {
        &self.op
    }

    pub fn operands(&self) -> [i64; 3] {
        self.operands
    }

    pub fn a(&self) -> i64 {
        self.operands[0]
    }

    pub fn b(&self) -> i64 {
        self.operands[1]
    }

    pub fn c(&self) -> i64 {
        self.operands[2]
    }
}

impl Instruction<Opcode> {
    pub fn opcode(&self) -> Opcode {
        self.op
    }

    pub fn load(reg: usize, addr: i64) -> Instruction {
        Instruction::new(Opcode::Load, reg as i64, addr, 0)
    }

    pub fn store(addr: i64, reg: usize) -> Instruction {
        Instruction::new(Opcode::Store, addr, reg as i64, 0)
    }
}

impl From<Instruction<Opcode>> for SourceInstruction {
    fn from(i: Instruction<Opcode>) -> Self {
        Instruction {
            op: Mnemonic::Known(i.op),
            operands: i.operands,
        }
    }
}

impl<M: Display> Display for Instruction<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} {} {} {}",
            self.op, self.operands[0], self.operands[1], self.operands[2]
        )
    }
}

impl<M: Display> Serialize for Instruction<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
