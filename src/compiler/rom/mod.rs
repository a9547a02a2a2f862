/*!
Packs a lowered program into 32-bit ROM words and renders them as the VHDL
constant array which initializes the CPU's instruction memory.

Each word is `opcode, operand 1, operand 2, operand 3`, one byte each.
Operands outside a byte wrap modulo 256; every wrapped field is reported as a
[`ByteOverflow`] so the truncation is never silent.
*/
use std::fmt::{Display, Formatter};
use std::io::Write;

use log::warn;
use serde::Serialize;

use super::isa::Instruction;
use super::lower::LoweredProgram;

const ROM_HEADER: &str = "constant ROM : memory := (";
const ROM_FOOTER: &str = "others => (x\"00000000\"));";

/// An operand which did not fit in its byte of the ROM word.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ByteOverflow {
    /// Index of the instruction in the ROM
    pub address: usize,
    /// Operand position, 1 to 3
    pub field: usize,
    pub value: i64,
    /// What was actually written
    pub written: u8,
}

impl Display for ByteOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ROM word {}: operand {} value {} does not fit in a byte, written as {}",
            self.address, self.field, self.value, self.written
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RomImage {
    words: Vec<u32>,
    overflows: Vec<ByteOverflow>,
}

impl RomImage {
    /// Packs every instruction of `program` into a ROM word.
    pub fn assemble(program: &LoweredProgram) -> RomImage {
        let mut overflows = vec![];
        let words = program
            .iter()
            .enumerate()
            .map(|(address, instr)| pack(address, instr, &mut overflows))
            .collect();

        for o in &overflows {
            warn!("{}", o);
        }

        RomImage { words, overflows }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn overflows(&self) -> &[ByteOverflow] {
        &self.overflows
    }

    /// Writes the image as a VHDL `memory` constant.  Addresses past the end
    /// of the program are filled with zero words.
    pub fn write_vhdl<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", ROM_HEADER)?;
        for w in &self.words {
            writeln!(out, "(x\"{:08x}\"),", w)?;
        }
        writeln!(out, "{}", ROM_FOOTER)
    }

    pub fn to_vhdl(&self) -> String {
        let mut buf = vec![];
        // writing into a Vec cannot fail
        let _ = self.write_vhdl(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn pack(address: usize, instr: &Instruction, overflows: &mut Vec<ByteOverflow>) -> u32 {
    let mut word = instr.opcode().encoding() as u32;
    for (idx, value) in instr.operands().iter().enumerate() {
        let written = *value as u8;
        if written as i64 != *value {
            overflows.push(ByteOverflow {
                address,
                field: idx + 1,
                value: *value,
                written,
            });
        }
        word = (word << 8) | written as u32;
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lower::lower;
    use crate::compiler::reader::read_source;

    fn lowered(text: &str) -> LoweredProgram {
        let source = read_source(text).unwrap();
        lower(&source, 8).unwrap().into_parts().0
    }

    #[test]
    fn vhdl_layout() {
        let image = RomImage::assemble(&lowered("AFC 0 5\nAFC 1 3\nADD 2 0 1\nPRI 2"));
        let expected = "constant ROM : memory := (
(x\"15010500\"),
(x\"17000100\"),
(x\"15020300\"),
(x\"17010200\"),
(x\"01030201\"),
(x\"17020300\"),
(x\"10020000\"),
others => (x\"00000000\"));
";
        assert_eq!(image.to_vhdl(), expected);
        assert!(image.overflows().is_empty());
    }

    #[test]
    fn empty_program_is_all_default() {
        let image = RomImage::assemble(&lowered(""));
        assert_eq!(
            image.to_vhdl(),
            "constant ROM : memory := (\nothers => (x\"00000000\"));\n"
        );
    }

    #[test]
    fn words_pack_opcode_first() {
        let image = RomImage::assemble(&lowered("JMP 200"));
        assert_eq!(image.words(), &[0x0ec8_0000]);
    }

    #[test]
    fn out_of_range_operands_wrap_and_are_reported() {
        let image = RomImage::assemble(&lowered("NOP\nAFC 300 -1"));
        // AFC 1 -1 0, STORE 300 1 0
        assert_eq!(image.words()[1], 0x1501_ff00);
        assert_eq!(image.words()[2], 0x172c_0100);
        assert_eq!(
            image.overflows(),
            &[
                ByteOverflow {
                    address: 1,
                    field: 2,
                    value: -1,
                    written: 0xff
                },
                ByteOverflow {
                    address: 2,
                    field: 1,
                    value: 300,
                    written: 44
                },
            ]
        );
    }
}
