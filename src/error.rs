//! Error types returned by the encoder.

/// Result type for encoding operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Reasons an encoding request is rejected. Every variant carries the
/// measured value and the limit it violated, so callers can adjust the
/// configuration and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A configuration value is outside its allowed range.
    #[error("'{name}' must be between {min} and {max}. Given: {value}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// The symbol would need more codewords than PDF417 can hold.
    #[error("Data too long. Generated bar code contains {count} code words. Maximum is {limit}. Try decreasing security level.")]
    CapacityExceeded { count: usize, limit: usize },

    /// The symbol would have fewer rows than allowed.
    #[error("Data too short. Generated bar code has {rows} rows. Minimum is {min} rows. Try decreasing column count.")]
    SymbolTooShort { rows: usize, min: usize },

    /// The symbol would have more rows than allowed.
    #[error("Data too long. Generated bar code has {rows} rows. Maximum is {max} rows. Try increasing column count.")]
    SymbolTooTall { rows: usize, max: usize },

    /// A character of the input text has no representation in the
    /// requested text encoding.
    #[error("character {character:?} at position {position} can not be encoded as {encoding}")]
    UnencodableCharacter {
        character: char,
        position: usize,
        encoding: &'static str,
    },
}
