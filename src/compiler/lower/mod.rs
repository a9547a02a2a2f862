use std::fmt::{Display, Formatter};

use serde::Serialize;

mod builder;
mod lower;
mod origin;
mod program;

pub use builder::ProgramBuilder;
pub use lower::{lower, Lowered, LoweringEngine};
pub use origin::AddressOriginMap;
pub use program::LoweredProgram;

/// Errors which prevent a lowering pass from starting.
#[derive(Clone, Debug, PartialEq)]
pub enum LoweringError {
    RegisterCount(usize),
}

impl Display for LoweringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoweringError::RegisterCount(n) => write!(
                f,
                "Cannot lower onto {} registers: the register file needs between {} and {} registers",
                n,
                crate::compiler::memory::MIN_REGISTERS,
                crate::compiler::memory::MAX_REGISTERS
            ),
        }
    }
}

impl std::error::Error for LoweringError {}

/// Problems found while lowering which do not stop the pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LoweringDiagnostic {
    /// The instruction was skipped and produced no output.
    Unrecognized { index: usize, mnemonic: String },
    /// A LOAD named a register outside the allocatable set, so its effect on
    /// residency was not recorded.
    UntrackedRegister { index: usize, reg: i64 },
}

impl Display for LoweringDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoweringDiagnostic::Unrecognized { index, mnemonic } => {
                write!(f, "[{}] Unrecognized command: {}", index, mnemonic)
            }
            LoweringDiagnostic::UntrackedRegister { index, reg } => {
                write!(f, "[{}] LOAD into register {} is not tracked", index, reg)
            }
        }
    }
}
