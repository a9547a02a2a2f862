use std::fs::File;
use std::path::Path;

use crate::compiler::isa::SourceInstruction;
use crate::compiler::lower::Lowered;
use crate::compiler::reader::Reader;
use crate::compiler::rom::RomImage;
use crate::diagnostics::{JsonWriter, Listing, Writer};
use crate::result::{NResult, Result};

/// Reads and parses an assembly source file.  Every malformed line is
/// reported, prefixed with the file name.
pub fn read_program(path: &Path) -> NResult<Vec<SourceInstruction>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| vec![format!("{}: {}", path.display(), e)])?;

    let (program, errs): (Vec<_>, Vec<_>) = Reader::new(&text)
        .read()
        .into_iter()
        .partition(|r| r.is_ok());

    if errs.is_empty() {
        Ok(program.into_iter().filter_map(|r| r.ok()).collect())
    } else {
        Err(errs
            .into_iter()
            .filter_map(|r| r.err())
            .map(|e| format!("{}:{}", path.display(), e))
            .collect())
    }
}

pub fn write_rom(path: &Path, image: &RomImage) -> Result<()> {
    let mut file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    image
        .write_vhdl(&mut file)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn write_listing_json(path: &Path, lowered: &Lowered) -> Result<()> {
    let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    JsonWriter::new(file)
        .write_listing(&Listing::new(lowered))
        .map_err(|e| format!("{}: {}", path.display(), e))
}
