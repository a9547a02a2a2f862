use std::ops::Index;

use crate::compiler::isa::Instruction;

/// The register-addressed instructions produced by one lowering pass, in ROM
/// order.  Immutable once the pass completes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoweredProgram {
    instructions: Vec<Instruction>,
}

impl LoweredProgram {
    pub(super) fn new(instructions: Vec<Instruction>) -> LoweredProgram {
        LoweredProgram { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Instruction> {
        self.instructions.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<Instruction> {
        self.instructions.iter()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl Index<usize> for LoweredProgram {
    type Output = Instruction;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.instructions[idx]
    }
}

impl<'a> IntoIterator for &'a LoweredProgram {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
