//! Reed-Solomon error correction over GF(929).

use crate::error::{Error, Result};
use crate::tables::ECC_FACTORS;

/// Prime modulus of the codeword field.
pub const MODULUS: u16 = 929;

/// Highest supported security level.
pub const MAX_SECURITY_LEVEL: u8 = 8;

/// Number of error correction codewords for the given security level
/// (`2^(level+1)`).
pub const fn ecc_count(level: u8) -> usize {
    assert!(level <= MAX_SECURITY_LEVEL, "ECC level must be between 0 and 8 inclusive");
    1 << (level as usize + 1)
}

fn factors(level: u8) -> Result<&'static [u16]> {
    ECC_FACTORS.get(level as usize).copied().ok_or(Error::InvalidParameter {
        name: "security_level",
        value: level as usize,
        min: 0,
        max: MAX_SECURITY_LEVEL as usize,
    })
}

/// Computes the error correction codewords of `codewords` (length descriptor,
/// data and padding) for the security level `level`.
///
/// The codewords are returned in transmission order: appended to the input
/// they form a sequence whose polynomial vanishes at `3^1 .. 3^k`.
pub fn generate_ecc(codewords: &[u16], level: u8) -> Result<Vec<u16>> {
    let factors = factors(level)?;
    let k = factors.len();
    let mut ecc = vec![0u16; k];

    for &cw in codewords {
        let t = ((cw % MODULUS) + ecc[0]) % MODULUS;

        for i in (0..k).rev() {
            let factor = ((t as u32 * factors[i] as u32) % MODULUS as u32) as u16;
            let d = if i > 0 { ecc[k - i] } else { 0 };
            ecc[k - 1 - i] = (d + MODULUS - factor) % MODULUS;
        }
    }

    for e in ecc.iter_mut() {
        if *e != 0 {
            *e = MODULUS - *e;
        }
    }

    Ok(ecc)
}
