/**
 * Register residency tracking for the lowering pass.
 *
 * The source language addresses an unbounded memory; the ROM CPU computes
 * only on registers.  This submodule records which memory address each
 * register currently holds a copy of, so that the lowering pass can reuse
 * loaded values and pick a least recently used register to evict.
 */
pub(super) mod residency;

pub use residency::{RegisterSlot, ResidencyTable};

/// Index of a register in the target register file.
pub type Reg = usize;

/// A location in the flat data memory of the source language.
pub type Address = i64;

/// Register 0 belongs to the hardware and is never allocated.
pub const RESERVED_REGISTER: Reg = 0;

/// Register that conditional jumps load their condition into.
pub const SCRATCH_REGISTER: Reg = 1;

/// Smallest register file which leaves one usable register.
pub const MIN_REGISTERS: usize = 2;

/// Register numbers must fit in one byte of a ROM word.
pub const MAX_REGISTERS: usize = 256;
