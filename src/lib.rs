//! # PDF417 Encoder
//!
//! Converts arbitrary bytes into the codeword grid of a PDF417 symbol
//! (ISO/IEC 15438): text, byte and numeric compaction, Reed-Solomon error
//! correction over GF(929), row indicators and cluster based low level
//! codewords, framed by the start and stop patterns.
//!
//! #### Basic Example
//! ```
//! # use pdf417_encoder::*;
//! let symbol = encode(b"HELLO WORLD", &Options::default()).unwrap();
//! assert_eq!(symbol.rows(), 3);
//!
//! for row in symbol.iter_rows() {
//!     assert_eq!(row.first(), Some(&START));
//!     assert_eq!(row.last(), Some(&STOP));
//! }
//! ```
//!
//! ### Data Segments
//!
//! The input is split into segments compacted with the cheapest mode:
//! - **text**: printable ASCII, tab, carriage return and line feed, packed
//!     two characters per codeword using the UPPER, LOWER, MIXED and PUNCT
//!     submodes,
//! - **numeric**: runs of 13 digits or more (can be disabled with
//!     [Options::with_numeric_compaction]),
//! - **bytes**: everything else, 6 bytes per 5 codewords.
//!
//! ### Rendering
//!
//! [Symbol::render] expands the grid into pixels with a configurable module
//! scale, row ratio and quiet zone. With the `embedded-graphics` feature
//! (enabled by default) the returned [Render] is also a `Drawable`.
//!
//! ```
//! # use pdf417_encoder::*;
//! let options = Options::new().with_columns(4).with_security_level(1);
//! let symbol = encode_text("Hello, world!", &options).unwrap();
//!
//! let render = symbol.render().set_scale(1).set_ratio(2).set_padding(2);
//! let mut pixels = vec![false; (render.width() * render.height()) as usize];
//! render.fill_bits(&mut pixels);
//! ```

use tracing::debug;

mod tables;
mod submode;
pub mod ecc;
pub mod error;
pub mod high_level;
pub mod layout;
pub mod options;
pub mod render;

pub use ecc::{ecc_count, generate_ecc, MAX_SECURITY_LEVEL};
pub use error::{Error, Result};
pub use high_level::{compact, CW_PADDING as PADDING};
pub use layout::{Symbol, MAX_CODEWORDS, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
pub use options::{Options, TextEncoding};
pub use render::Render;
pub use submode::Submode;
pub use tables::{START, STOP, TRUNCATED_STOP};

/// Encodes `data` into a PDF417 symbol.
///
/// The options are validated before any compaction work. The call either
/// returns the complete symbol or an [Error] describing the violated limit.
pub fn encode(data: &[u8], options: &Options) -> Result<Symbol> {
    options.validate()?;

    let (cols, level) = (options.columns(), options.security_level());
    debug!(len = data.len(), cols, level, "encoding PDF417 symbol");

    let codewords = high_level::compact(data, options.numeric_compaction());
    layout::layout(codewords, cols, level, options.truncate())
}

/// Encodes `text` after converting it to bytes with the encoding selected in
/// `options` (UTF-8 by default).
pub fn encode_text(text: &str, options: &Options) -> Result<Symbol> {
    options.validate()?;

    let bytes = options.encoding().to_bytes(text)?;
    encode(&bytes, options)
}
