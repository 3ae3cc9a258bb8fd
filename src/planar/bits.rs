/// Single-bit masks for every bit-plane, least significant first.
pub(super) const MASKS: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Yields the low `width` bits of a value, most significant first.
pub(super) struct MsbFirst {
    value: u64,
    remaining: u32,
}

impl MsbFirst {
    pub(super) fn new(value: u64, width: u32) -> Self {
        debug_assert!(width <= u64::BITS);
        debug_assert!(width == u64::BITS || value >> width == 0);

        Self {
            value,
            remaining: width,
        }
    }
}

impl From<u8> for MsbFirst {
    fn from(value: u8) -> Self {
        Self::new(value.into(), u8::BITS)
    }
}

impl Iterator for MsbFirst {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some((self.value >> self.remaining) & 1 == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for MsbFirst {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_yields_most_significant_bit_first() {
        let bits: Vec<bool> = MsbFirst::from(0b1010_0001).collect();

        assert_eq!(
            bits,
            [true, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn it_handles_full_width_values() {
        let mut bits = MsbFirst::new((1 << 63) | 1, 64);

        assert_eq!(bits.len(), 64);
        assert_eq!(bits.next(), Some(true));
        assert_eq!(bits.by_ref().filter(|&bit| bit).count(), 1);
        assert_eq!(bits.next(), None);
    }
}
