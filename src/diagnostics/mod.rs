//! Renders the result of a lowering pass for the people reading it: every
//! lowered instruction next to the source instruction it came from, plus the
//! problems found along the way.
use serde::Serialize;

use crate::compiler::isa::Instruction;
use crate::compiler::lower::{Lowered, LoweringDiagnostic};

mod consolewriter;
mod jsonwriter;

pub use consolewriter::ConsoleWriter;
pub use jsonwriter::JsonWriter;

/// One lowered instruction and where it came from.
#[derive(Debug, Serialize)]
pub struct ListingEntry<'a> {
    pub address: usize,
    pub origin: usize,
    pub instruction: &'a Instruction,
}

#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub instructions: Vec<ListingEntry<'a>>,
    pub diagnostics: &'a [LoweringDiagnostic],
}

impl<'a> Listing<'a> {
    pub fn new(lowered: &'a Lowered) -> Listing<'a> {
        let instructions = lowered
            .program
            .iter()
            .zip(lowered.origins.iter())
            .enumerate()
            .map(|(address, (instruction, origin))| ListingEntry {
                address,
                origin,
                instruction,
            })
            .collect();

        Listing {
            instructions,
            diagnostics: &lowered.diagnostics,
        }
    }
}

/// Defines a way to write a [`Listing`] to an output target.
pub trait Writer {
    fn write_listing(&mut self, listing: &Listing) -> std::io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lower::lower;
    use crate::compiler::reader::read_source;

    fn lowered(text: &str) -> Lowered {
        lower(&read_source(text).unwrap(), 8).unwrap()
    }

    #[test]
    fn console_listing() {
        let lowered = lowered("AFC 0 5\nBAD\nPRI 0");
        let mut out = vec![];
        ConsoleWriter::new(&mut out)
            .write_listing(&Listing::new(&lowered))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "[0] : AFC 1 5 0\n[0] : STORE 0 1 0\n[2] : PRI 0 0 0\n[1] Unrecognized command: BAD\n"
        );
    }

    #[test]
    fn json_listing() {
        let lowered = lowered("AFC 0 5");
        let mut out = vec![];
        JsonWriter::new(&mut out)
            .write_listing(&Listing::new(&lowered))
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "instructions": [
                    {"address": 0, "origin": 0, "instruction": "AFC 1 5 0"},
                    {"address": 1, "origin": 0, "instruction": "STORE 0 1 0"},
                ],
                "diagnostics": [],
            })
        );
    }
}
