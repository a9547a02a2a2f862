// Reader - splits assembly source into instruction records.  Comments (`#`),
// labels and directives (`.`) and blank lines never reach the lowering pass.
use log::trace;
use stdext::function_name;

use crate::compiler::isa::{Instruction, Mnemonic, Opcode, SourceInstruction};
use crate::compiler::CompilerError;

use super::{ReaderError, ReaderResult};

pub struct Reader<'a> {
    text: &'a str,
}

impl<'a> Reader<'a> {
    pub fn new(text: &'a str) -> Reader<'a> {
        Reader { text }
    }

    /// Reads every instruction line of the source.  Each element is either the
    /// instruction read from a line or the error which that line caused.
    pub fn read(&self) -> Vec<ReaderResult<SourceInstruction>> {
        self.text
            .lines()
            .enumerate()
            .filter_map(|(idx, text)| {
                let line = idx as u32 + 1;
                Self::read_line(text).map(|r| r.map_err(|e| CompilerError::new(line, e)))
            })
            .collect()
    }

    /// Returns `None` if the line carries no instruction.
    fn read_line(text: &str) -> Option<Result<SourceInstruction, ReaderError>> {
        let mut tokens = text.split_whitespace();
        let first = tokens.next()?;
        if first.starts_with('#') || first.starts_with('.') {
            return None;
        }
        trace!("{} <- {}", function_name!(), text.trim());

        let operands = match tokens
            .map(|t| {
                t.parse::<i64>()
                    .map_err(|_| ReaderError::InvalidInteger(t.into()))
            })
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(operands) => operands,
            Err(e) => return Some(Err(e)),
        };

        Some(Self::assemble(first, &operands))
    }

    fn assemble(word: &str, operands: &[i64]) -> Result<SourceInstruction, ReaderError> {
        if operands.len() > 3 {
            return Err(ReaderError::TooManyOperands(operands.len()));
        }

        let mnemonic = match word.parse::<Opcode>() {
            Ok(op) => {
                if operands.len() < op.arity() {
                    return Err(ReaderError::MissingOperands {
                        op,
                        expected: op.arity(),
                        found: operands.len(),
                    });
                }
                Mnemonic::Known(op)
            }
            Err(()) => Mnemonic::Unrecognized(word.into()),
        };

        let field = |i: usize| operands.get(i).copied().unwrap_or(0);
        Ok(Instruction::new(mnemonic, field(0), field(1), field(2)))
    }
}

/// Reads a complete source program, stopping at the first malformed line.
pub fn read_source(text: &str) -> ReaderResult<Vec<SourceInstruction>> {
    Reader::new(text).read().into_iter().collect()
}
