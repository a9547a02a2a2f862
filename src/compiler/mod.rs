/**
 * The Compiler takes a program written in the memory addressed assembly
 * language and retargets it onto the register file of the ROM CPU.
 *
 * The pipeline has three stages:
 * 1. The `reader` splits source text into instruction records.  This is the
 * last stage where a User error can stop compilation: a malformed line is
 * reported with its line number and nothing is lowered.
 * 2. The `lower` pass walks the instructions once, front to back.  Using the
 * residency table from `memory` it decides which memory operands already sit
 * in a register, inserts LOADs for those that do not, evicts the least
 * recently used register when it runs out, and writes every result straight
 * back to memory.  Each generated instruction remembers which source
 * instruction it came from.  An unknown opcode is reported and skipped; it
 * never stops the pass.
 * 3. `rom` packs the lowered program into 32-bit words and renders them as the
 * VHDL constant that initializes the CPU's instruction memory.
 *
 * Jumps are not relocated: the lowered program keeps the source instruction
 * indices as jump targets.
 */
mod error;

pub mod isa;
pub mod lower;
pub mod memory;
pub mod reader;
pub mod rom;

pub use error::CompilerError;
