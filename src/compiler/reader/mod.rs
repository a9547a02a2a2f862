use std::fmt::{Display, Formatter};

use super::isa::Opcode;
use super::CompilerError;

mod tests;

pub(crate) mod reader;

pub use reader::{read_source, Reader};

pub type ReaderResult<T> = std::result::Result<T, CompilerError<ReaderError>>;

/// Errors which can be encountered while reading a line of assembly source
#[derive(Clone, Debug, PartialEq)]
pub enum ReaderError {
    InvalidInteger(String),
    MissingOperands {
        op: Opcode,
        expected: usize,
        found: usize,
    },
    TooManyOperands(usize),
}

impl Display for ReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ReaderError::*;
        match self {
            InvalidInteger(token) => write!(f, "Invalid integer operand: {}", token),
            MissingOperands {
                op,
                expected,
                found,
            } => write!(
                f,
                "{} expects {} operands but found {}",
                op, expected, found
            ),
            TooManyOperands(found) => {
                write!(f, "An instruction takes at most 3 operands but found {}", found)
            }
        }
    }
}

impl std::error::Error for ReaderError {}
