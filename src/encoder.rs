//! TRA encoder

use crate::table::{StringTable, QUOTE};
use crate::tag;
use anyhow::{Context, Result};
use std::path::Path;

/// Serializes a [`StringTable`] into TRA text
pub struct Encoder {
    // Currently stateless, but reserved for future options
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Encode a table to TRA text.
    ///
    /// Records come out in table iteration order, one per entry. A value's
    /// embedded newlines stay inside its tilde quotes; no re-wrapping is
    /// applied.
    pub fn encode(&self, table: &StringTable) -> String {
        let mut output = String::new();
        for (key, text) in table.iter() {
            self.encode_entry(&mut output, key, text);
        }
        output
    }

    /// Encode a single record line: `@<key> = ~<value>~ <tag-if-present>`
    fn encode_entry(&self, output: &mut String, key: &str, text: &str) {
        // Literal tildes must be doubled before the value is quoted.
        let escaped = text.replace(QUOTE, "~~");
        // A trailing [TAG] moves back out behind the closing tilde.
        let (body, tag) = tag::split_trailing_tag(&escaped);

        output.push('@');
        output.push_str(key);
        output.push_str(" = ");
        output.push(QUOTE);
        output.push_str(body.trim());
        output.push(QUOTE);
        if let Some(tag) = tag {
            output.push(' ');
            output.push_str(tag);
        }
        output.push('\n');
    }

    /// Encode a table directly to a writer
    pub fn encode_to_writer<W: std::io::Write>(
        &self,
        table: &StringTable,
        mut writer: W,
    ) -> Result<()> {
        writer
            .write_all(self.encode(table).as_bytes())
            .context("failed to write TRA output")
    }

    /// Encode a table to a file
    pub fn encode_to_file(&self, table: &StringTable, path: &Path) -> Result<()> {
        std::fs::write(path, self.encode(table))
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
