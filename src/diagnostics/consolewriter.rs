use std::io::Write;

use super::{Listing, Writer};

/// Writes a listing as text: one `[origin] : instruction` line per lowered
/// instruction followed by one line per diagnostic.
pub struct ConsoleWriter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W) -> ConsoleWriter<W> {
        ConsoleWriter { out }
    }
}

impl<W: Write> Writer for ConsoleWriter<W> {
    fn write_listing(&mut self, listing: &Listing) -> std::io::Result<()> {
        for entry in &listing.instructions {
            writeln!(self.out, "[{}] : {}", entry.origin, entry.instruction)?;
        }
        for d in listing.diagnostics {
            writeln!(self.out, "{}", d)?;
        }
        self.out.flush()
    }
}
