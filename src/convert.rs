//! File-level conversion pipelines
//!
//! Wires the pieces together in both directions:
//! file bytes → transcode → decode → table → JSON, and
//! JSON → table → encode → transcode → file bytes.
//!
//! No temp-file-and-rename step: an I/O failure mid-write aborts the
//! conversion and may leave a partial output file.

use crate::codepage::Transcoder;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::table::StringTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Convert a TRA file to a flat JSON string table.
///
/// `encoding` names the codepage of the input file; unrecognized names mean
/// the file is already UTF-8. With `strict`, a record left open at end of
/// input is an error instead of being dropped.
pub fn tra_file_to_json(input: &Path, output: &Path, encoding: &str, strict: bool) -> Result<()> {
    let transcoder = Transcoder::for_name(encoding);

    let bytes =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let text = transcoder
        .decode(&bytes)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    let table = Decoder::new().with_strict(strict).decode(&text)?;
    let json = table.to_json_pretty()?;

    write_creating_dirs(output, json.as_bytes())
}

/// Convert a flat JSON string table back to a TRA file.
///
/// The JSON input is always UTF-8; `encoding` names the codepage of the
/// produced TRA file. A JSON parse failure aborts before any output is
/// written.
pub fn json_file_to_tra(input: &Path, output: &Path, encoding: &str) -> Result<()> {
    let transcoder = Transcoder::for_name(encoding);

    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let table = StringTable::from_json(&raw)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    let text = Encoder::new().encode(&table);
    let bytes = transcoder
        .encode(&text)
        .with_context(|| format!("failed to encode {}", output.display()))?;

    write_creating_dirs(output, &bytes)
}

/// Write a file, creating missing parent directories first.
fn write_creating_dirs(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}
