//! # tra-convert
//!
//! Bidirectional converter between the legacy TRA string-table format and a
//! flat key-value JSON representation.
//!
//! ## TRA Format
//!
//! A TRA file is a line-oriented table of tilde-quoted strings:
//!
//! ```text
//! // comment line
//! @100 = ~Hello World~
//! @101 = ~Line one
//! continues here~
//! @102 = ~Echo~~ chamber~ [REF1]
//! ```
//!
//! - A record opens with `@<id> = ~` and closes at the final `~` of a line.
//! - `~~` inside a value is the escape for a literal `~`.
//! - An optional bracketed tag after the closing `~` is carried into the
//!   value verbatim.
//! - `//` comment lines and blank lines are ignored, even inside a value.
//!
//! ## JSON Representation
//!
//! A single flat object mapping record ids to their unescaped text, in file
//! appearance order:
//!
//! ```json
//! {
//!   "100": "Hello World",
//!   "101": "Line one\ncontinues here",
//!   "102": "Echo~ chamber[REF1]"
//! }
//! ```
//!
//! ## Legacy Codepages
//!
//! Conversions accept an encoding name. The Windows-1251 aliases `win1251`,
//! `windows-1251` and `cp1251` (case-insensitive) enable Cyrillic codepage
//! transcoding on both read and write; any other name means the file is
//! already UTF-8 and bytes pass through unchanged.

pub mod codepage;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod table;
pub mod tag;

pub use codepage::Transcoder;
pub use convert::{json_file_to_tra, tra_file_to_json};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use table::StringTable;
pub use tag::{closing_tag, split_marked, split_trailing_tag, MarkedText};
