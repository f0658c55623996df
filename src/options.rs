//! Encoder configuration.

use crate::error::{Error, Result};
use crate::layout::validate_parameters;

/// Character encoding used by [encode_text](crate::encode_text) to turn text
/// into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO/IEC 8859-1, the default PDF417 code page. Characters above
    /// U+00FF are rejected.
    Latin1,
}

impl TextEncoding {
    /// Canonical name of the encoding.
    pub const fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "iso-8859-1",
        }
    }

    /// Converts `text` to the bytes fed to the compactor.
    pub fn to_bytes(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text.chars()
                .enumerate()
                .map(|(position, character)| u8::try_from(character).map_err(|_| Error::UnencodableCharacter {
                    character,
                    position,
                    encoding: self.name(),
                }))
                .collect(),
        }
    }
}

/// Parameters of an encoding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    columns: usize,
    security_level: u8,
    numeric_compaction: bool,
    truncate: bool,
    encoding: TextEncoding,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    /// Default options: 6 columns, security level 2, numeric compaction
    /// enabled, full (not truncated) rows and UTF-8 text.
    pub const fn new() -> Self {
        Self {
            columns: 6,
            security_level: 2,
            numeric_compaction: true,
            truncate: false,
            encoding: TextEncoding::Utf8,
        }
    }

    /// Number of data columns (1 to 30).
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Error correction level (0 to 8).
    pub const fn security_level(&self) -> u8 {
        self.security_level
    }

    pub const fn numeric_compaction(&self) -> bool {
        self.numeric_compaction
    }

    /// Returns true if rows end with the truncated stop marker.
    pub const fn truncate(&self) -> bool {
        self.truncate
    }

    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub const fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub const fn with_security_level(mut self, level: u8) -> Self {
        self.security_level = level;
        self
    }

    /// Enables or disables numeric compaction of long digit runs. When
    /// disabled, digits are encoded in the MIXED text submode.
    pub const fn with_numeric_compaction(mut self, enabled: bool) -> Self {
        self.numeric_compaction = enabled;
        self
    }

    /// Marks whether rows should be closed by the truncated stop marker.
    pub const fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub const fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Checks the column count and the security level.
    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.columns, self.security_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.columns(), 6);
        assert_eq!(options.security_level(), 2);
        assert!(options.numeric_compaction());
        assert!(!options.truncate());
        assert_eq!(options.encoding(), TextEncoding::Utf8);
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_columns() {
        for columns in [0, 31] {
            assert_eq!(Options::new().with_columns(columns).validate(), Err(Error::InvalidParameter {
                name: "columns", value: columns, min: 1, max: 30
            }));
        }
        assert!(Options::new().with_columns(30).validate().is_ok());
        assert!(Options::new().with_columns(1).validate().is_ok());
    }

    #[test]
    fn test_invalid_security_level() {
        assert_eq!(Options::new().with_security_level(9).validate(), Err(Error::InvalidParameter {
            name: "security_level", value: 9, min: 0, max: 8
        }));
        assert!(Options::new().with_security_level(8).validate().is_ok());
    }

    #[test]
    fn test_text_encodings() {
        assert_eq!(TextEncoding::Utf8.to_bytes("é").unwrap(), [0xC3, 0xA9]);
        assert_eq!(TextEncoding::Latin1.to_bytes("é").unwrap(), [0xE9]);
        assert_eq!(TextEncoding::Latin1.to_bytes("ab€").unwrap_err(), Error::UnencodableCharacter {
            character: '€', position: 2, encoding: "iso-8859-1"
        });
    }
}
