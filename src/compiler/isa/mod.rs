//! The instruction model shared by the memory-addressed source language and
//! the register-addressed ROM target.

mod instruction;
mod opcode;

pub use instruction::{Instruction, Mnemonic, Operation, SourceInstruction};
pub use opcode::{Opcode, OPCODES};
