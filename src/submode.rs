//! Text compaction submodes and their character tables.

/// Text compaction submode. Every text region starts in [Submode::Upper].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Submode {
    Upper = 0,
    Lower = 1,
    Mixed = 2,
    Punct = 3,
}

/// Value of `A` to `Z` in the UPPER submode and `a` to `z` in LOWER.
const ALPHA_OFFSET: u8 = 0;
/// First value of [MIXED_CHAR_SET] in the MIXED submode.
const MIXED_OFFSET: u8 = 10;
/// Value of the space in every submode except PUNCT.
const SPACE: u8 = 26;

const MIXED_CHAR_SET: [u8; 15] = [
    b'&', b'\r', b'\t', b',', b':', b'#', b'-', b'.', b'$', b'/', b'+', b'%', b'*', b'=', b'^'
];
const PUNC_CHAR_SET: [u8; 29] = [
    b';', b'<', b'>', b'@', b'[', b'\\', b']', b'_', b'`', b'~', b'!', b'\r', b'\t',
    b',', b':', b'\n', b'-', b'.', b'$', b'/', b'"', b'|', b'*', b'(', b')', b'?',
    b'{', b'}', b'\''
];

/// Latch codewords (LL, ML, AL, PL and PAL depending on the submode).
const LL: u8 = 27;
const ML: u8 = 28;
const AL: u8 = 28;
const PL: u8 = 25;
const PAL: u8 = 29;
/// Shift codewords, valid for the next character only.
const AS: u8 = 27;
const PS: u8 = 29;

/// Per byte value in each submode, indexed by `[byte][submode]`.
static TEXT_VALUES: [[Option<u8>; 4]; 256] = {
    let mut table = [[None; 4]; 256];

    let mut c = 0;
    while c < 26 {
        table[(b'A' + c) as usize][Submode::Upper as usize] = Some(ALPHA_OFFSET + c);
        table[(b'a' + c) as usize][Submode::Lower as usize] = Some(ALPHA_OFFSET + c);
        c += 1;
    }

    let mut d = 0;
    while d < 10 {
        table[(b'0' + d) as usize][Submode::Mixed as usize] = Some(d);
        d += 1;
    }

    table[b' ' as usize][Submode::Upper as usize] = Some(SPACE);
    table[b' ' as usize][Submode::Lower as usize] = Some(SPACE);
    table[b' ' as usize][Submode::Mixed as usize] = Some(SPACE);

    let mut i = 0;
    while i < MIXED_CHAR_SET.len() {
        table[MIXED_CHAR_SET[i] as usize][Submode::Mixed as usize] = Some(MIXED_OFFSET + i as u8);
        i += 1;
    }

    let mut i = 0;
    while i < PUNC_CHAR_SET.len() {
        table[PUNC_CHAR_SET[i] as usize][Submode::Punct as usize] = Some(i as u8);
        i += 1;
    }

    table
};

impl Submode {
    /// All submodes, in the order used to break ties between equally
    /// expensive targets.
    pub const ALL: [Submode; 4] = [Submode::Upper, Submode::Lower, Submode::Mixed, Submode::Punct];

    /// Value of `c` in this submode, `None` if the submode can not represent it.
    #[inline]
    pub fn value(self, c: u8) -> Option<u8> {
        TEXT_VALUES[c as usize][self as usize]
    }

    /// Codewords switching permanently from `self` to `to`. Empty when both
    /// submodes are the same.
    pub const fn latch(self, to: Submode) -> &'static [u8] {
        use Submode::*;
        match (self, to) {
            (Upper, Lower) => &[LL],
            (Upper, Mixed) => &[ML],
            (Upper, Punct) => &[ML, PL],
            (Lower, Upper) => &[ML, AL],
            (Lower, Mixed) => &[ML],
            (Lower, Punct) => &[ML, PL],
            (Mixed, Upper) => &[AL],
            (Mixed, Lower) => &[LL],
            (Mixed, Punct) => &[PL],
            (Punct, Upper) => &[PAL],
            (Punct, Lower) => &[PAL, LL],
            (Punct, Mixed) => &[PAL, ML],
            (Upper, Upper) | (Lower, Lower) | (Mixed, Mixed) | (Punct, Punct) => &[],
        }
    }

    /// Codeword encoding a single character of `to` without leaving `self`.
    pub const fn shift(self, to: Submode) -> Option<u8> {
        use Submode::*;
        match (self, to) {
            (Upper, Punct) | (Lower, Punct) | (Mixed, Punct) => Some(PS),
            (Lower, Upper) => Some(AS),
            _ => None,
        }
    }

    /// Returns true if at least one submode can represent `c`.
    #[inline]
    pub fn is_text(c: u8) -> bool {
        TEXT_VALUES[c as usize].iter().any(Option::is_some)
    }

    /// Shift codeword and value encoding `c` once from this submode, if any
    /// shift reaches a submode containing `c`.
    pub fn shift_for(self, c: u8) -> Option<(u8, u8)> {
        Self::ALL.iter().find_map(|&to| Some((self.shift(to)?, to.value(c)?)))
    }

    /// The submode with the shortest latch sequence that can represent `c`.
    pub fn latch_for(self, c: u8) -> Option<Submode> {
        Self::ALL.iter()
            .copied()
            .filter(|&to| to != self && to.value(c).is_some())
            .min_by_key(|&to| self.latch(to).len())
    }
}

#[cfg(test)]
mod tests {
    use super::Submode::{self, *};

    #[test]
    fn test_text_values() {
        assert_eq!(Upper.value(b'A'), Some(0));
        assert_eq!(Lower.value(b'z'), Some(25));
        assert_eq!(Mixed.value(b'7'), Some(7));
        assert_eq!(Mixed.value(b'^'), Some(24));
        assert_eq!(Punct.value(b';'), Some(0));
        assert_eq!(Punct.value(b'\''), Some(28));
        assert_eq!(Punct.value(b'\n'), Some(15));
        assert_eq!(Upper.value(b'a'), None);
        assert_eq!(Punct.value(b' '), None);
    }

    #[test]
    fn test_shared_values() {
        // characters present in both MIXED and PUNCT share the same value
        for c in [b'\t', b'\r', b',', b':', b'-', b'.', b'$', b'/', b'*'] {
            assert!(Mixed.value(c).is_some());
            assert_eq!(Mixed.value(c), Punct.value(c), "{}", c as char);
        }
    }

    #[test]
    fn test_printable_ascii_is_text() {
        for c in 0x20..0x7F {
            assert!(Submode::is_text(c), "{:#04x}", c);
        }
        for c in [b'\t', b'\n', b'\r'] {
            assert!(Submode::is_text(c));
        }
        for c in (0x00..0x09).chain(0x7F..=0xFF) {
            assert!(!Submode::is_text(c), "{:#04x}", c);
        }
    }

    #[test]
    fn test_latch_sequences() {
        assert_eq!(Upper.latch(Punct), &[28, 25]);
        assert_eq!(Lower.latch(Upper), &[28, 28]);
        assert_eq!(Punct.latch(Lower), &[29, 27]);
        assert_eq!(Mixed.latch(Mixed), &[] as &[u8]);
        for from in Submode::ALL {
            for to in Submode::ALL {
                let len = from.latch(to).len();
                assert!(if from == to { len == 0 } else { (1..=2).contains(&len) });
            }
        }
    }

    #[test]
    fn test_shift_codes() {
        assert_eq!(Upper.shift(Punct), Some(29));
        assert_eq!(Lower.shift(Upper), Some(27));
        assert_eq!(Lower.shift(Punct), Some(29));
        assert_eq!(Mixed.shift(Punct), Some(29));
        assert_eq!(Upper.shift(Lower), None);
        assert_eq!(Punct.shift(Upper), None);

        assert_eq!(Lower.shift_for(b'Q'), Some((27, 16)));
        assert_eq!(Upper.shift_for(b'!'), Some((29, 10)));
        assert_eq!(Upper.shift_for(b'a'), None);
    }

    #[test]
    fn test_latch_for_prefers_shortest() {
        // ',' lives in MIXED (1 codeword away) and PUNCT (2 codewords away)
        assert_eq!(Upper.latch_for(b','), Some(Mixed));
        assert_eq!(Punct.latch_for(b' '), Some(Upper));
        assert_eq!(Upper.latch_for(b';'), Some(Punct));
        assert_eq!(Upper.latch_for(0x80), None);
    }
}
