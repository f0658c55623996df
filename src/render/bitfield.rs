use core::iter;

/// A bar/space pattern: up to 24 modules stored most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitfield(u32);

impl Bitfield {
    pub const fn new(bits: u32, count: u8) -> Self {
        debug_assert!(count <= 24, "count is too big");

        Self((bits << 8) | count as u32)
    }

    /// Pattern of a low level codeword. Its module count is the bit length
    /// of the value: every pattern starts with a bar.
    pub const fn of(value: u32) -> Self {
        Self::new(value, (u32::BITS - value.leading_zeros()) as u8)
    }

    #[inline]
    pub const fn size(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0 >> 8
    }
}

impl iter::IntoIterator for Bitfield {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits { value: self.bits(), count: self.size() as u32 }
    }
}

#[derive(Debug, Clone)]
pub struct Bits {
    value: u32,
    count: u32,
}

impl iter::Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count > 0 {
            self.count -= 1;
            Some((self.value >> self.count) & 1 != 0)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.count as usize;
        (count, Some(count))
    }
}

impl iter::ExactSizeIterator for Bits {}
impl iter::FusedIterator for Bits {}
