//! Legacy codepage transcoding
//!
//! TRA files from localized game data predate Unicode and ship in 8-bit
//! codepages; the Russian tables use Windows-1251. The converter works on
//! UTF-8 internally, so file bytes pass through a [`Transcoder`] on the way
//! in and out.

use anyhow::{bail, Context, Result};
use encoding_rs::{Encoding, WINDOWS_1251};

/// Encoding names recognized as the Windows-1251 Cyrillic codepage.
///
/// Matched case-insensitively; any name outside this set means the data is
/// already UTF-8.
pub const CYRILLIC_ALIASES: [&str; 3] = ["win1251", "windows-1251", "cp1251"];

/// Byte-level transcoder between one legacy codepage and UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder {
    encoding: Option<&'static Encoding>,
}

impl Transcoder {
    /// Resolve an encoding name. Unrecognized names (including `utf-8`)
    /// produce a pass-through transcoder.
    pub fn for_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let encoding = if CYRILLIC_ALIASES.contains(&lower.as_str()) {
            Some(WINDOWS_1251)
        } else {
            None
        };
        Self { encoding }
    }

    /// Whether a legacy codepage was recognized
    pub fn is_transcoding(&self) -> bool {
        self.encoding.is_some()
    }

    /// Decode raw file bytes into UTF-8 text.
    ///
    /// Byte sequences invalid for the declared codepage are a fatal error;
    /// the conversion is aborted, not retried.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self.encoding {
            Some(enc) => {
                let (text, had_errors) = enc.decode_without_bom_handling(bytes);
                if had_errors {
                    bail!("input contains byte sequences invalid for {}", enc.name());
                }
                Ok(text.into_owned())
            }
            None => Ok(std::str::from_utf8(bytes)
                .context("input is not valid UTF-8")?
                .to_string()),
        }
    }

    /// Encode UTF-8 text into raw file bytes.
    ///
    /// Characters with no representation in the target codepage are a fatal
    /// error.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self.encoding {
            Some(enc) => {
                let (bytes, _, had_errors) = enc.encode(text);
                if had_errors {
                    bail!(
                        "text contains characters not representable in {}",
                        enc.name()
                    );
                }
                Ok(bytes.into_owned())
            }
            None => Ok(text.as_bytes().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_recognition_is_case_insensitive() {
        assert!(Transcoder::for_name("win1251").is_transcoding());
        assert!(Transcoder::for_name("WINDOWS-1251").is_transcoding());
        assert!(Transcoder::for_name("Cp1251").is_transcoding());
    }

    #[test]
    fn test_unrecognized_names_pass_through() {
        assert!(!Transcoder::for_name("utf-8").is_transcoding());
        assert!(!Transcoder::for_name("utf8").is_transcoding());
        assert!(!Transcoder::for_name("").is_transcoding());
        assert!(!Transcoder::for_name("latin1").is_transcoding());
    }

    #[test]
    fn test_cyrillic_encode_produces_win1251_bytes() {
        let transcoder = Transcoder::for_name("win1251");
        let bytes = transcoder.encode("Привет").unwrap();
        assert_eq!(bytes, vec![0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]);
    }

    #[test]
    fn test_cyrillic_round_trip() {
        let transcoder = Transcoder::for_name("cp1251");
        let bytes = transcoder.encode("Привет, мир").unwrap();
        assert_eq!(transcoder.decode(&bytes).unwrap(), "Привет, мир");
    }

    #[test]
    fn test_pass_through_keeps_bytes() {
        let transcoder = Transcoder::for_name("utf-8");
        let text = "Hello ~ World";
        let bytes = transcoder.encode(text).unwrap();
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(transcoder.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn test_unmappable_character_is_an_error() {
        let transcoder = Transcoder::for_name("win1251");
        assert!(transcoder.encode("漢字").is_err());
    }

    #[test]
    fn test_invalid_codepage_byte_is_an_error() {
        // 0x98 is unassigned in Windows-1251
        let transcoder = Transcoder::for_name("win1251");
        assert!(transcoder.decode(&[0xCF, 0x98]).is_err());
    }

    #[test]
    fn test_pass_through_rejects_invalid_utf8() {
        let transcoder = Transcoder::for_name("utf-8");
        assert!(transcoder.decode(&[0xFF, 0xFE, 0x00]).is_err());
    }
}
