use pdf417_encoder::layout::{low_level, row_indicators};
use pdf417_encoder::{
    ecc_count, encode, generate_ecc, Error, Options, MAX_CODEWORDS, MAX_ROWS, MIN_ROWS, START, STOP,
    TRUNCATED_STOP,
};

use proptest::prelude::*;

fn options(cols: usize, level: u8) -> Options {
    Options::new().with_columns(cols).with_security_level(level)
}

fn text(len: usize) -> Vec<u8> {
    // two 'A' per codeword, no padding value
    vec![b'A'; len]
}

/// Finds the high level codeword rendered as `glyph` in the cluster of `row`.
fn high_level(row: usize, glyph: u32) -> Option<u16> {
    (0..929).find(|&cw| low_level(row % 3, cw) == glyph)
}

#[test]
fn capacity_boundary() {
    let symbol = encode(&text(1838), &options(29, 2)).unwrap();
    assert_eq!(symbol.codewords().len(), 928);
    assert_eq!(symbol.rows(), 32);

    assert_eq!(
        encode(&text(1852), &options(1, 0)),
        Err(Error::CapacityExceeded { count: 929, limit: 928 })
    );
}

#[test]
fn row_boundaries() {
    assert_eq!(encode(&text(60), &options(30, 0)), Err(Error::SymbolTooShort { rows: 2, min: 3 }));
    assert_eq!(encode(&text(120), &options(30, 0)).unwrap().rows(), 3);

    assert_eq!(encode(&text(174), &options(1, 0)).unwrap().rows(), 90);
    assert_eq!(encode(&text(176), &options(1, 0)), Err(Error::SymbolTooTall { rows: 91, max: 90 }));
}

#[test]
fn error_messages_report_limits() {
    let err = encode(&text(1852), &options(1, 0)).unwrap_err();
    assert!(err.to_string().contains("929") && err.to_string().contains("928"));

    let err = encode(&text(60), &options(30, 0)).unwrap_err();
    assert!(err.to_string().contains("Minimum is 3 rows"));
}

#[test]
fn hello_world() {
    let symbol = encode(b"HELLO WORLD", &options(6, 2)).unwrap();
    let total = symbol.codewords().len();

    assert_eq!(symbol.rows(), total.div_ceil(6));
    assert_eq!(symbol.codewords()[0] as usize, total - ecc_count(2));
    for row in symbol.iter_rows() {
        assert_eq!(row.len(), 10);
        assert_eq!(row[0], START);
        assert_eq!(row[9], STOP);
    }

    let truncated = encode(b"HELLO WORLD", &options(6, 2).with_truncate(true)).unwrap();
    assert!(truncated.iter_rows().all(|row| row[9] == TRUNCATED_STOP));
    assert_eq!(truncated.codewords(), symbol.codewords());
}

#[test]
fn byte_compaction_round_trip() {
    let data = [0x80, 0x9F, 0xC4, 0xFF, 0xA5, 0xE0];
    let symbol = encode(&data, &options(6, 2).with_numeric_compaction(false)).unwrap();

    // length descriptor, byte latch, then the 5 packed codewords
    let codewords = symbol.codewords();
    assert_eq!(codewords[1], 924);
    let packed = codewords[2..7].iter().fold(0u64, |n, &cw| n * 900 + cw as u64);
    assert_eq!(packed.to_be_bytes()[2..], data);
    assert_eq!(codewords[0], 7 + (codewords.len() - 7 - 8) as u16);
}

#[test]
fn row_indicators_describe_geometry() {
    let symbol = encode(b"The quick brown fox jumps over the lazy dog 0123456789", &options(4, 3)).unwrap();
    let (rows, cols) = (symbol.rows(), symbol.columns());

    for (i, row) in symbol.iter_rows().enumerate() {
        let left = high_level(i, row[1]).unwrap();
        let right = high_level(i, row[cols + 2]).unwrap();
        assert_eq!((left, right), row_indicators(i, rows, cols, 3));

        // every data glyph belongs to the cluster of its row
        for &glyph in &row[2..cols + 2] {
            assert!(high_level(i, glyph).is_some());
        }
    }
}

proptest! {
    #[test]
    fn geometry_holds(
        data in prop::collection::vec(any::<u8>(), 0..300),
        cols in 1usize..=30,
        level in 0u8..=8,
        truncate in any::<bool>(),
    ) {
        match encode(&data, &options(cols, level).with_truncate(truncate)) {
            Ok(symbol) => {
                let total = symbol.codewords().len();
                prop_assert!(total <= MAX_CODEWORDS);
                prop_assert_eq!(total % cols, 0);
                prop_assert_eq!(symbol.rows(), total.div_ceil(cols));
                prop_assert!((MIN_ROWS..=MAX_ROWS).contains(&symbol.rows()));

                let stop = if truncate { TRUNCATED_STOP } else { STOP };
                for row in symbol.iter_rows() {
                    prop_assert_eq!(row.len(), cols + 4);
                    prop_assert_eq!(row[0], START);
                    prop_assert_eq!(row[cols + 3], stop);
                }
            },
            Err(Error::CapacityExceeded { count, limit }) => prop_assert!(count > limit),
            Err(Error::SymbolTooShort { rows, min }) => prop_assert!(rows < min),
            Err(Error::SymbolTooTall { rows, max }) => prop_assert!(rows > max),
            Err(err) => prop_assert!(false, "unexpected error {}", err),
        }
    }

    #[test]
    fn encode_is_deterministic(
        data in prop::collection::vec(any::<u8>(), 0..200),
        numeric in any::<bool>(),
    ) {
        let options = options(10, 4).with_numeric_compaction(numeric);
        prop_assert_eq!(encode(&data, &options), encode(&data, &options));
    }

    #[test]
    fn ecc_len_matches_level(
        data in prop::collection::vec(0u16..929, 1..100),
        level in 0u8..=8,
    ) {
        let ecc = generate_ecc(&data, level).unwrap();
        prop_assert_eq!(ecc.len(), 2usize << level);
        prop_assert!(ecc.iter().all(|&cw| cw < 929));
        prop_assert_eq!(ecc, generate_ecc(&data, level).unwrap());
    }
}
