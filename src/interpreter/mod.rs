//! The reference interpreter: a fetch, decode, execute loop over a flat data
//! memory and a register file.  It gives both source programs and lowered
//! programs an executable meaning, so that a lowering can be checked by
//! running the program before and after and comparing the final memory.
use std::fmt::{Display, Formatter};

mod machine;

pub use machine::{execute, Execution, Machine};

/// How the memory-operand instructions of a program address their operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    /// Source programs: arithmetic, NOT, AFC, COP and JMF name memory cells.
    Memory,
    /// Lowered programs: the same instructions name registers.
    Register,
}

/// Why a program stopped without a fault.
#[derive(Clone, Debug, PartialEq)]
pub enum Halt {
    /// The instruction pointer left the program.
    End,
    /// NOP stops the machine.
    Nop { ip: usize },
    /// An instruction outside the instruction set stops the machine.
    UnknownInstruction { ip: usize, mnemonic: String },
}

/// Runtime faults.  A fault ends that execution; it says nothing about the
/// lowering unless the source program ran cleanly.
#[derive(Clone, Debug, PartialEq)]
pub enum Fault {
    MemoryOutOfBounds { ip: usize, address: i64 },
    RegisterOutOfBounds { ip: usize, reg: i64 },
    DivisionByZero { ip: usize },
    InvalidJump { ip: usize, target: i64 },
    IterationLimit { limit: u64 },
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Fault::*;
        match self {
            MemoryOutOfBounds { ip, address } => {
                write!(f, "ip {}: memory address {} is out of bounds", ip, address)
            }
            RegisterOutOfBounds { ip, reg } => {
                write!(f, "ip {}: register {} does not exist", ip, reg)
            }
            DivisionByZero { ip } => write!(f, "ip {}: division by zero", ip),
            InvalidJump { ip, target } => write!(f, "ip {}: cannot jump to {}", ip, target),
            IterationLimit { limit } => {
                write!(f, "program did not finish within {} instructions", limit)
            }
        }
    }
}

impl std::error::Error for Fault {}
