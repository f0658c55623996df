//! Row and column layout of the high level codewords.

use core::slice::ChunksExact;

use tracing::debug;

use crate::ecc::{ecc_count, generate_ecc, MAX_SECURITY_LEVEL};
use crate::error::{Error, Result};
use crate::high_level::CW_PADDING;
use crate::tables::{CLUSTERS, START, STOP, TRUNCATED_STOP};

/// Minimum number of rows in a PDF417 barcode.
pub const MIN_ROWS: usize = 3;
/// Maximum number of rows in a PDF417 barcode.
pub const MAX_ROWS: usize = 90;
/// Minimum number of data columns in a PDF417 barcode.
pub const MIN_COLS: usize = 1;
/// Maximum number of data columns in a PDF417 barcode.
pub const MAX_COLS: usize = 30;
/// Maximum number of codewords in a barcode: length descriptor, data,
/// padding and error correction.
pub const MAX_CODEWORDS: usize = 928;

/// A finished PDF417 symbol: the high level codewords and the row-major grid
/// of low level codewords, framed by the start, row indicator and stop
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    codewords: Vec<u16>,
    grid: Vec<u32>,
    rows: usize,
    cols: usize,
    level: u8,
    truncated: bool,
}

impl Symbol {
    /// Get the number of rows of the PDF417.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of data columns of the PDF417 (row indicators and
    /// start/stop patterns excluded).
    #[inline]
    pub const fn columns(&self) -> usize {
        self.cols
    }

    #[inline]
    pub const fn security_level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// High level codewords: length descriptor, data, padding and error
    /// correction, in symbol order.
    pub fn codewords(&self) -> &[u16] {
        &self.codewords
    }

    /// Number of low level codewords in a row: start, left indicator, data
    /// columns, right indicator and stop.
    #[inline]
    pub const fn row_len(&self) -> usize {
        self.cols + 4
    }

    /// Low level codewords of the row `row`.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        let start = row.checked_mul(self.row_len())?;
        self.grid.get(start..start + self.row_len())
    }

    pub fn iter_rows(&self) -> ChunksExact<'_, u32> {
        self.grid.chunks_exact(self.row_len())
    }

    /// Copies the grid into one vector per row.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.iter_rows().map(<[u32]>::to_vec).collect()
    }
}

/// Checks the column count and the security level.
pub fn validate_parameters(cols: usize, level: u8) -> Result<()> {
    if !(MIN_COLS..=MAX_COLS).contains(&cols) {
        return Err(Error::InvalidParameter {
            name: "columns",
            value: cols,
            min: MIN_COLS,
            max: MAX_COLS,
        });
    }

    if level > MAX_SECURITY_LEVEL {
        return Err(Error::InvalidParameter {
            name: "security_level",
            value: level as usize,
            min: 0,
            max: MAX_SECURITY_LEVEL as usize,
        });
    }

    Ok(())
}

/// Number of padding codewords aligning the symbol on `cols`.
pub const fn padding_count(data_count: usize, ecc_count: usize, cols: usize) -> usize {
    // reserve 1 codeword for the length descriptor
    match (data_count + ecc_count + 1) % cols {
        0 => 0,
        r => cols - r,
    }
}

/// Checks the total number of codewords and the resulting row count.
/// Returns the number of rows.
pub fn validate_size(total: usize, cols: usize) -> Result<usize> {
    if total > MAX_CODEWORDS {
        return Err(Error::CapacityExceeded { count: total, limit: MAX_CODEWORDS });
    }

    let rows = total.div_ceil(cols);
    if rows < MIN_ROWS {
        return Err(Error::SymbolTooShort { rows, min: MIN_ROWS });
    }
    if rows > MAX_ROWS {
        return Err(Error::SymbolTooTall { rows, max: MAX_ROWS });
    }

    Ok(rows)
}

/// Values shared by the row indicators of every row, `(rows_val, cols_val,
/// level_val)`.
const fn prepare(rows: usize, cols: usize, level: u8) -> (u16, u16, u16) {
    let rows_val = (rows - 1) / 3;
    let cols_val = cols - 1;
    let level_val = level as usize * 3 + (rows - 1) % 3;
    (rows_val as u16, cols_val as u16, level_val as u16)
}

/// High level (left, right) row indicators of row `row`.
pub const fn row_indicators(row: usize, rows: usize, cols: usize, level: u8) -> (u16, u16) {
    let (rows_val, cols_val, level_val) = prepare(rows, cols, level);
    let row_id = (row / 3) as u16 * 30;

    let (left, right) = match row % 3 {
        0 => (rows_val, cols_val),
        1 => (level_val, rows_val),
        _ => (cols_val, level_val),
    };
    (row_id + left, row_id + right)
}

/// Low level glyph of the high level codeword `cw` in the cluster of `table`
/// (`row % 3`).
#[inline]
pub fn low_level(table: usize, cw: u16) -> u32 {
    (1 << 16) | CLUSTERS[table][cw as usize] as u32
}

/// Lays out `data` (compacted data codewords) into a symbol of `cols`
/// columns protected with the security level `level`.
///
/// The codewords are padded, prefixed with the length descriptor and
/// followed by the error correction codewords; the size limits are checked
/// before any row is produced.
pub fn layout(mut data: Vec<u16>, cols: usize, level: u8, truncate: bool) -> Result<Symbol> {
    validate_parameters(cols, level)?;

    let ecc_count = ecc_count(level);
    let data_count = data.len();
    let padding = padding_count(data_count, ecc_count, cols);

    let total = data_count + padding + ecc_count + 1;
    let rows = validate_size(total, cols)?;
    debug!(data_count, padding, ecc_count, total, rows, cols, "codeword layout");

    // length descriptor counts itself, the data and the padding
    let mut codewords = Vec::with_capacity(total);
    codewords.push((data_count + padding + 1) as u16);
    codewords.append(&mut data);
    codewords.resize(data_count + padding + 1, CW_PADDING);

    let ecc = generate_ecc(&codewords, level)?;
    codewords.extend_from_slice(&ecc);
    debug_assert_eq!(codewords.len(), rows * cols);

    let stop = if truncate { TRUNCATED_STOP } else { STOP };
    let mut grid = Vec::with_capacity(rows * (cols + 4));
    for (row, words) in codewords.chunks_exact(cols).enumerate() {
        let table = row % 3;
        let (left, right) = row_indicators(row, rows, cols, level);

        grid.push(START);
        grid.push(low_level(table, left));
        grid.extend(words.iter().map(|&cw| low_level(table, cw)));
        grid.push(low_level(table, right));
        grid.push(stop);
    }

    Ok(Symbol { codewords, grid, rows, cols, level, truncated: truncate })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_count() {
        assert_eq!(padding_count(6, 8, 6), 3);
        assert_eq!(padding_count(9, 8, 6), 0);
        assert_eq!(padding_count(0, 2, 1), 0);
        assert_eq!(padding_count(30, 2, 30), 27);
    }

    #[test]
    fn test_validate_size() {
        assert_eq!(validate_size(928, 29), Ok(32));
        assert_eq!(validate_size(929, 1), Err(Error::CapacityExceeded { count: 929, limit: 928 }));
        assert_eq!(validate_size(60, 30), Err(Error::SymbolTooShort { rows: 2, min: 3 }));
        assert_eq!(validate_size(90, 30), Ok(3));
        assert_eq!(validate_size(90, 1), Ok(90));
        assert_eq!(validate_size(91, 1), Err(Error::SymbolTooTall { rows: 91, max: 90 }));
    }

    #[test]
    fn test_row_indicators() {
        // 10 rows, 4 columns, level 3
        let (rows, cols, level) = (10, 4, 3);
        assert_eq!(row_indicators(0, rows, cols, level), (3, 3));
        assert_eq!(row_indicators(1, rows, cols, level), (9, 3));
        assert_eq!(row_indicators(2, rows, cols, level), (3, 9));
        assert_eq!(row_indicators(3, rows, cols, level), (33, 33));
        assert_eq!(row_indicators(7, rows, cols, level), (69, 63));
        assert_eq!(row_indicators(9, rows, cols, level), (93, 93));
    }

    #[test]
    fn test_low_level_clusters() {
        assert_eq!(low_level(0, 0), 0x1d5c0);
        // same codeword, different pattern per cluster
        assert_ne!(low_level(0, 900), low_level(1, 900));
        assert_ne!(low_level(1, 900), low_level(2, 900));
    }

    #[test]
    fn test_layout_hello_world() {
        let data = vec![214, 341, 446, 674, 521, 119];
        let symbol = layout(data, 6, 2, false).unwrap();

        assert_eq!(symbol.rows(), 3);
        assert_eq!(symbol.codewords(), [
            10, 214, 341, 446, 674, 521, 119, 900, 900, 900,
            422, 165, 909, 493, 706, 648, 699, 291
        ]);
        assert_eq!(symbol.row(0).unwrap(), [130728, 120256, 108592, 93792, 73860, 117936, 105860, 69792, 128318, 260649]);
        assert_eq!(symbol.row(1).unwrap(), [130728, 125456, 85980, 97968, 97968, 97968, 74212, 128038, 128352, 260649]);
        assert_eq!(symbol.row(2).unwrap(), [130728, 86496, 102282, 118430, 72792, 68764, 114380, 90204, 86256, 260649]);
        assert_eq!(symbol.row(3), None);
    }

    #[test]
    fn test_layout_truncated() {
        let symbol = layout(vec![214, 341, 446, 674, 521, 119], 6, 2, true).unwrap();
        assert!(symbol.is_truncated());
        for row in symbol.iter_rows() {
            assert_eq!(row.len(), 10);
            assert_eq!(row[0], START);
            assert_eq!(row[9], TRUNCATED_STOP);
        }
    }

    #[test]
    fn test_layout_invalid_parameters() {
        assert!(matches!(layout(vec![1, 2, 3], 0, 2, false), Err(Error::InvalidParameter { name: "columns", .. })));
        assert!(matches!(layout(vec![1, 2, 3], 3, 9, false), Err(Error::InvalidParameter { name: "security_level", .. })));
    }

    #[test]
    fn test_layout_rejects_before_ecc() {
        assert_eq!(layout(vec![0; 926], 1, 0, false), Err(Error::CapacityExceeded { count: 929, limit: 928 }));
    }
}
