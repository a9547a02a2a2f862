use std::io::{BufWriter, Write};

use super::{Listing, Writer};

/// Writes a listing to a JSON file.
pub struct JsonWriter<W: Write> {
    /// Output target for the JSON Writer
    writer: BufWriter<W>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(file: W) -> JsonWriter<W> {
        JsonWriter {
            writer: BufWriter::new(file),
        }
    }
}

impl<W: Write> Writer for JsonWriter<W> {
    fn write_listing(&mut self, listing: &Listing) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, listing)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
