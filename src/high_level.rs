//! User data to high level encoding conversion functions

use tracing::trace;

use crate::submode::Submode;

use awint_core::{InlAwi, Bits};
type U160 = InlAwi<160, { Bits::unstable_raw_digits(160) }>;

/// Codeword used to latch to text mode
pub const M_LATCH_TEXT: u16 = 900;
/// Codeword used to latch to byte mode (if length is multiple of 6 use
/// M_LATCH_BYTE_M6).
pub const M_LATCH_BYTE: u16 = 901;
/// Codeword used to latch to numeric mode
pub const M_LATCH_NUMERIC: u16 = 902;
/// Codeword used to latch to byte mode when the number of bytes is a
/// multiple of 6.
pub const M_LATCH_BYTE_M6: u16 = 924;

/// Codeword used as padding at the end of the data section
pub const CW_PADDING: u16 = M_LATCH_TEXT;

/// Shortest run of digits worth a numeric segment. Below this, latching
/// to MIXED and back is cheaper than the numeric latch and base 900 packing.
pub const NUMERIC_MIN_DIGITS: usize = 13;
/// Digits packed per numeric group (with the leading 1, 45 decimal digits
/// fit in 15 codewords).
pub const NUMERIC_GROUP_DIGITS: usize = 44;

/// Text value padding an odd count of text values (PS, or PAL in PUNCT,
/// both meaningless at the end of a segment).
const TEXT_PAD: u8 = 29;

/// Compaction mode of a run of input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Numeric,
    Byte,
}

impl Mode {
    fn of(c: u8, numeric_compaction: bool) -> Self {
        if numeric_compaction && c.is_ascii_digit() {
            Mode::Numeric
        } else if Submode::is_text(c) {
            Mode::Text
        } else {
            Mode::Byte
        }
    }
}

/// Splits `data` into maximal runs sharing the same compaction mode. Digit
/// runs shorter than [NUMERIC_MIN_DIGITS] are folded into text.
pub fn segments(data: &[u8], numeric_compaction: bool) -> Vec<(Mode, &[u8])> {
    let mut runs: Vec<(Mode, usize, usize)> = Vec::new();
    let mut start = 0;

    while start < data.len() {
        let mode = Mode::of(data[start], numeric_compaction);
        let end = data[start..].iter()
            .position(|&c| Mode::of(c, numeric_compaction) != mode)
            .map_or(data.len(), |len| start + len);

        let mode = match mode {
            Mode::Numeric if end - start < NUMERIC_MIN_DIGITS => Mode::Text,
            mode => mode,
        };

        match runs.last_mut() {
            Some(last) if last.0 == mode => last.2 = end,
            _ => runs.push((mode, start, end)),
        }
        start = end;
    }

    runs.into_iter().map(|(mode, start, end)| (mode, &data[start..end])).collect()
}

/// Converts `data` into data codewords (without the length descriptor,
/// padding or error correction). Each segment is introduced by its mode
/// latch, except a leading text segment since decoding starts in text mode.
pub fn compact(data: &[u8], numeric_compaction: bool) -> Vec<u16> {
    let mut out = Vec::with_capacity(data.len());

    for (i, (mode, bytes)) in segments(data, numeric_compaction).into_iter().enumerate() {
        trace!(?mode, len = bytes.len(), "compacting segment");
        match mode {
            Mode::Text => {
                if i > 0 {
                    out.push(M_LATCH_TEXT);
                }
                compact_text(bytes, &mut out);
            },
            Mode::Numeric => {
                out.push(M_LATCH_NUMERIC);
                compact_numeric(bytes, &mut out);
            },
            Mode::Byte => {
                out.push(if bytes.len() % 6 == 0 { M_LATCH_BYTE_M6 } else { M_LATCH_BYTE });
                compact_bytes(bytes, &mut out);
            },
        }
    }

    out
}

/// Text compaction of `s`, starting in the UPPER submode. Every byte of `s`
/// must be representable in at least one submode.
///
/// A character missing from the current submode is shifted when the next
/// one belongs to the current submode again, otherwise the encoder latches
/// to the closest submode containing it.
pub fn compact_text(s: &[u8], out: &mut Vec<u16>) {
    let mut values: Vec<u8> = Vec::with_capacity(s.len() + s.len() / 2);
    let mut mode = Submode::Upper;

    for (k, &c) in s.iter().enumerate() {
        if let Some(v) = mode.value(c) {
            values.push(v);
            continue;
        }

        let returns = s.get(k + 1).is_some_and(|&next| mode.value(next).is_some());
        if returns {
            if let Some((shift, v)) = mode.shift_for(c) {
                values.extend([shift, v]);
                continue;
            }
        }

        let Some(target) = mode.latch_for(c) else {
            unreachable!("byte {c:#04x} has no text compaction value");
        };
        values.extend_from_slice(mode.latch(target));
        mode = target;
        if let Some(v) = mode.value(c) {
            values.push(v);
        }
    }

    if values.len() % 2 == 1 {
        values.push(TEXT_PAD);
    }

    out.extend(values.chunks_exact(2).map(|pair| pair[0] as u16 * 30 + pair[1] as u16));
}

/// Numeric compaction of the ASCII digits `digits`. Groups of up to
/// [NUMERIC_GROUP_DIGITS] digits are prefixed with a 1 and converted to base
/// 900, most significant codeword first.
pub fn compact_numeric(digits: &[u8], out: &mut Vec<u16>) {
    debug_assert!(digits.iter().all(u8::is_ascii_digit));

    let mut group = [b'1'; NUMERIC_GROUP_DIGITS + 1];
    for chunk in digits.chunks(NUMERIC_GROUP_DIGITS) {
        let len = chunk.len() + 1;
        group[1..len].copy_from_slice(chunk);

        let mut b = U160::zero();
        {
            let mut p0 = U160::zero();
            let mut p1 = U160::zero();
            b.bytes_radix_(None, &group[..len], 10, &mut p0, &mut p1)
                .expect("45 digits base 10 should fit in 160 bits");
        }

        let start = out.len();
        while !b.is_zero() {
            let r = b.digit_udivide_inplace_(900).expect("900 > 0");
            out.push(r as u16);
        }
        out[start..].reverse();
    }
}

/// Byte compaction of `bytes`: every 6 bytes are packed into 5 base 900
/// codewords, the remaining bytes are appended one codeword each.
pub fn compact_bytes(bytes: &[u8], out: &mut Vec<u16>) {
    let mut chunks = bytes.chunks_exact(6);

    for six in chunks.by_ref() {
        // pack six bytes
        let mut s = six.iter().fold(0u64, |s, &b| (s << 8) + b as u64);

        // append five codewords
        let mut packed = [0u16; 5];
        for n in 0..5 {
            packed[4 - n] = (s % 900) as u16;
            s /= 900;
        }
        out.extend_from_slice(&packed);
    }

    // remaining
    out.extend(chunks.remainder().iter().map(|&b| b as u16));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact_str(s: &str) -> Vec<u16> {
        compact(s.as_bytes(), true)
    }

    #[test]
    fn test_compact_text_simple() {
        assert_eq!(compact_str("Test"), [19 * 30 + 27, 4 * 30 + 18, 19 * 30 + 29]);
    }

    #[test]
    fn test_compact_switch_modes() {
        assert_eq!(compact_str("abc1D234"), [27 * 30 + 0, 1 * 30 + 2, 28 * 30 + 1, 28 * 30 + 3, 28 * 30 + 2, 3 * 30 + 4]);
    }

    #[test]
    fn test_compact_single_punct_latches() {
        // UPPER -> MIXED -> PUNCT, then ';' (0) and the pad value
        assert_eq!(compact_str(";"), [28 * 30 + 25, 0 * 30 + 29]);
    }

    #[test]
    fn test_compact_punct_shift() {
        // ',' is shifted since 'B' is back in UPPER
        assert_eq!(compact_str("A,B"), [0 * 30 + 29, 13 * 30 + 1]);
        // '\t' shifted from LOWER
        assert_eq!(compact_str("hello\tworld"), [27 * 30 + 7, 4 * 30 + 11, 11 * 30 + 14, 29 * 30 + 12, 22 * 30 + 14, 17 * 30 + 11, 3 * 30 + 29]);
    }

    #[test]
    fn test_compact_alpha_shift() {
        // 'E' shifted from LOWER with AS
        assert_eq!(compact_str("hEllo"), [27 * 30 + 7, 27 * 30 + 4, 11 * 30 + 11, 14 * 30 + 29]);
    }

    #[test]
    fn test_compact_text_with_digits() {
        assert_eq!(compact_str("encoded 0123456789 as digits"), [27 * 30 + 4, 13 * 30 + 2, 14 * 30 + 3, 4 * 30 + 3, 26 * 30 + 28, 0 * 30 + 1, 2 * 30 + 3, 4 * 30 + 5, 6 * 30 + 7, 8 * 30 + 9,
            26 * 30 + 27, 0 * 30 + 18, 26 * 30 + 3, 8 * 30 + 6, 8 * 30 + 19, 18 * 30 + 29]);
    }

    #[test]
    fn test_compact_punc_mixed() {
        assert_eq!(compact_str("This! Is a `quote (100%)`."), [
            597, 218, 569, 326, 818, 566, 26, 878, 500, 439, 146, 865, 719, 841, 0, 655, 728, 539
        ]);
    }

    #[test]
    fn test_compact_numeric() {
        assert_eq!(compact_str("12345678987654321 num"), [902, 190, 232, 499, 20, 504, 721, 900, 26 * 30 + 27, 13 * 30 + 20, 12 * 30 + 29]);
    }

    #[test]
    fn test_compact_numeric_big() {
        //                                 [                        p1                 ][ p2 ]
        assert_eq!(compact_str("123456789876543211234567898765432112345678987654321"), [
            902, 491, 81, 137, 725, 651, 455, 511, 858, 135, 138, 488, 568, 447, 553, 198, /* p2 */ 21, 715, 821
        ]);
    }

    #[test]
    fn test_compact_numeric_threshold() {
        // 12 digits stay in MIXED
        assert_eq!(compact_str("123456789012"), [841, 63, 125, 187, 249, 1, 89]);
        assert_eq!(compact_str("1234567890123"), [902, 17, 110, 836, 811, 223]);
        assert_eq!(compact_str("A123456789012345B"), [29, 902, 1, 812, 292, 890, 124, 745, 900, 59]);
    }

    #[test]
    fn test_compact_numeric_disabled() {
        let compacted = compact(b"1234567890123", false);
        assert!(!compacted.contains(&M_LATCH_NUMERIC));
        assert_eq!(compacted[0], 28 * 30 + 1);
    }

    #[test]
    fn test_compact_bytes_multiple() {
        let mut out = Vec::new();
        compact_bytes(b"alcool", &mut out);
        assert_eq!(out, [163, 238, 432, 766, 244]);
    }

    #[test]
    fn test_compact_bytes_not_multiple() {
        let mut out = Vec::new();
        compact_bytes(b"encode bin", &mut out);
        assert_eq!(out, [169, 883, 224, 680, 517, 32, 98, 105, 110]);
    }

    #[test]
    fn test_compact_binary_six_bytes() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE];
        let compacted = compact(&data, false);
        assert_eq!(compacted, [M_LATCH_BYTE_M6, 373, 154, 306, 260, 590]);

        // base 900 back to the six original bytes
        let packed = compacted[1..].iter().fold(0u64, |n, &cw| n * 900 + cw as u64);
        assert_eq!(packed.to_be_bytes()[2..], data);
    }

    #[test]
    fn test_compact_mixed_segments() {
        assert_eq!(compact(b"abc\x00\x01def", true), [27 * 30 + 0, 1 * 30 + 2, M_LATCH_BYTE, 0, 1, M_LATCH_TEXT, 27 * 30 + 3, 4 * 30 + 5]);
    }

    #[test]
    fn test_segments() {
        let segs = segments(b"ab12\xFF\xFE12345678901234", true);
        assert_eq!(segs, [
            (Mode::Text, &b"ab12"[..]),
            (Mode::Byte, &b"\xFF\xFE"[..]),
            (Mode::Numeric, &b"12345678901234"[..]),
        ]);
        assert!(segments(b"", true).is_empty());
    }

    #[test]
    fn test_compact_empty() {
        assert!(compact(b"", true).is_empty());
    }
}
