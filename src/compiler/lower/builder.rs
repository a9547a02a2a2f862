use log::trace;

use crate::compiler::isa::Instruction;
use crate::compiler::memory::{Address, Reg};

use super::{AddressOriginMap, LoweredProgram};

/// Provides a Builder interface for constructing a [`LoweredProgram`]. The
/// builder keeps track of which source instruction is currently being lowered
/// and attributes every instruction appended to the program to it, so the
/// program and its [`AddressOriginMap`] always grow together.
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
    origins: Vec<usize>,
    origin: usize,
}

impl ProgramBuilder {
    pub fn new() -> ProgramBuilder {
        ProgramBuilder {
            instructions: vec![],
            origins: vec![],
            origin: 0,
        }
    }

    /// Change the active source instruction.  After this call, every emitted
    /// instruction is attributed to source instruction `origin`.
    pub fn set_origin(&mut self, origin: usize) {
        self.origin = origin
    }

    /// Append an instruction to the program.
    pub fn emit(&mut self, instr: Instruction) {
        trace!("[{}] {}: {}", self.origin, self.instructions.len(), instr);
        self.instructions.push(instr);
        self.origins.push(self.origin);
    }

    /// Append a load of memory cell `addr` into `reg`.
    pub fn load(&mut self, reg: Reg, addr: Address) {
        self.emit(Instruction::load(reg, addr))
    }

    /// Append a store of `reg` into memory cell `addr`.
    pub fn store(&mut self, addr: Address, reg: Reg) {
        self.emit(Instruction::store(addr, reg))
    }

    /// Finalizes the construction of the program.
    pub fn complete(self) -> (LoweredProgram, AddressOriginMap) {
        (
            LoweredProgram::new(self.instructions),
            AddressOriginMap::new(self.origins),
        )
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        ProgramBuilder::new()
    }
}
