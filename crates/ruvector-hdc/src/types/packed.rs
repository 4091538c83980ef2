//! Bit-packed storage shared by the binary and bipolar variants.
//!
//! Bits live in `u64` words, least significant bit first. Bits past `len` in
//! the last word are always zero so that popcounts and equality only see
//! real elements.

use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::check_dimension;

const WORD_BITS: usize = 64;

#[inline]
fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub(crate) struct PackedBits {
    words: Vec<u64>,
    len: usize,
}

impl PackedBits {
    pub(crate) fn zeros(len: usize) -> Self {
        Self {
            words: vec![0u64; word_count(len)],
            len,
        }
    }

    pub(crate) fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let words = (0..word_count(len)).map(|_| rng.gen::<u64>()).collect();
        let mut bits = Self { words, len };
        bits.mask_tail();
        bits
    }

    pub(crate) fn from_fn(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = Self::zeros(len);
        for i in 0..len {
            if f(i) {
                bits.set(i, true);
            }
        }
        bits
    }

    fn mask_tail(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, bit: bool) {
        let mask = 1u64 << (index % WORD_BITS);
        if bit {
            self.words[index / WORD_BITS] |= mask;
        } else {
            self.words[index / WORD_BITS] &= !mask;
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    pub(crate) fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub(crate) fn xor(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| a ^ b)
            .collect();
        Self {
            words,
            len: self.len,
        }
    }

    pub(crate) fn and_count(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    pub(crate) fn or_count(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a | b).count_ones() as usize)
            .sum()
    }

    /// Number of differing bits.
    pub(crate) fn hamming(&self, other: &Self) -> usize {
        // Four accumulators keep the popcounts independent in the pipeline.
        let mut d = [0usize; 4];
        for (a, b) in self.words.chunks_exact(4).zip(other.words.chunks_exact(4)) {
            d[0] += (a[0] ^ b[0]).count_ones() as usize;
            d[1] += (a[1] ^ b[1]).count_ones() as usize;
            d[2] += (a[2] ^ b[2]).count_ones() as usize;
            d[3] += (a[3] ^ b[3]).count_ones() as usize;
        }
        let tail = self.words.len() - self.words.len() % 4;
        for i in tail..self.words.len() {
            d[0] += (self.words[i] ^ other.words[i]).count_ones() as usize;
        }
        d.iter().sum()
    }

    /// Moves bit `i` to `(i + shift) % len`.
    pub(crate) fn rotate_right(&mut self, shift: usize) {
        if self.len == 0 || shift % self.len == 0 {
            return;
        }
        let shift = shift % self.len;
        let mut out = Self::zeros(self.len);
        for (w, &word) in self.words.iter().enumerate() {
            let mut word = word;
            while word != 0 {
                let bit = word.trailing_zeros() as usize;
                let src = w * WORD_BITS + bit;
                out.set((src + shift) % self.len, true);
                word &= word - 1;
            }
        }
        *self = out;
    }

    /// Per-bit majority vote over `vectors`.
    ///
    /// A bit is set when strictly more than half of the inputs set it. Exact
    /// ties (even input count, 50/50 split) are resolved by an independent
    /// coin flip per tied bit, drawn in ascending bit order. Returns the
    /// result together with the number of ties that were broken.
    pub(crate) fn majority<R: Rng + ?Sized>(vectors: &[&PackedBits], rng: &mut R) -> (Self, usize) {
        let n = vectors.len();
        let len = vectors.first().map_or(0, |v| v.len);
        let mut result = Self::zeros(len);
        let mut ties = 0usize;

        for word_idx in 0..result.words.len() {
            let mut counts = [0u32; WORD_BITS];
            for v in vectors {
                let word = v.words[word_idx];
                for (bit_pos, count) in counts.iter_mut().enumerate() {
                    *count += ((word >> bit_pos) & 1) as u32;
                }
            }

            let valid = (len - word_idx * WORD_BITS).min(WORD_BITS);
            let mut result_word = 0u64;
            for (bit_pos, &count) in counts.iter().enumerate().take(valid) {
                let twice = 2 * count as usize;
                let bit = if twice > n {
                    true
                } else if twice == n {
                    ties += 1;
                    rng.gen::<bool>()
                } else {
                    false
                };
                if bit {
                    result_word |= 1u64 << bit_pos;
                }
            }
            result.words[word_idx] = result_word;
        }

        (result, ties)
    }
}

#[derive(Deserialize)]
struct RawBits {
    words: Vec<u64>,
    len: usize,
}

impl<'de> Deserialize<'de> for PackedBits {
    /// Rejects an empty vector or a word count that does not match `len`, and
    /// clears stray bits past `len`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawBits { words, len } = RawBits::deserialize(deserializer)?;
        check_dimension(len).map_err(de::Error::custom)?;
        if words.len() != word_count(len) {
            return Err(de::Error::custom(format!(
                "{} bits need {} words, found {}",
                len,
                word_count(len),
                words.len()
            )));
        }
        let mut bits = Self { words, len };
        bits.mask_tail();
        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_tail_masked() {
        let mut rng = StdRng::seed_from_u64(1);
        let bits = PackedBits::random(70, &mut rng);
        assert_eq!(bits.words.len(), 2);
        assert_eq!(bits.words[1] >> 6, 0);
    }

    #[test]
    fn test_rotate_single_bit() {
        let mut bits = PackedBits::zeros(130);
        bits.set(129, true);
        bits.rotate_right(1);
        assert!(bits.get(0));
        assert_eq!(bits.count_ones(), 1);
    }

    #[test]
    fn test_rotate_inverse() {
        let mut rng = StdRng::seed_from_u64(2);
        let original = PackedBits::random(1000, &mut rng);
        let mut bits = original.clone();
        bits.rotate_right(137);
        bits.rotate_right(1000 - 137);
        assert!(bits == original);
    }

    #[test]
    fn test_hamming_matches_xor_popcount() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = PackedBits::random(1001, &mut rng);
        let b = PackedBits::random(1001, &mut rng);
        assert_eq!(a.hamming(&b), a.xor(&b).count_ones());
    }

    #[test]
    fn test_majority_of_three() {
        let a = PackedBits::from_fn(8, |i| i % 2 == 0);
        let b = PackedBits::from_fn(8, |i| i < 4);
        let c = PackedBits::from_fn(8, |_| false);
        let mut rng = StdRng::seed_from_u64(4);
        let (m, ties) = PackedBits::majority(&[&a, &b, &c], &mut rng);
        assert_eq!(ties, 0);
        let expected: Vec<bool> = (0..8).map(|i| i % 2 == 0 && i < 4).collect();
        assert_eq!(m.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_majority_ties_flip_per_bit() {
        let a = PackedBits::from_fn(1000, |_| true);
        let b = PackedBits::from_fn(1000, |_| false);
        let mut rng = StdRng::seed_from_u64(5);
        let (m, ties) = PackedBits::majority(&[&a, &b], &mut rng);
        assert_eq!(ties, 1000);

        // One coin per tied bit: about half set, never all or none.
        let ones = m.count_ones();
        assert!(ones > 400 && ones < 600, "set bits: {}", ones);
    }

    #[test]
    fn test_deserialize_checks_layout() {
        let decode = |json: &str| serde_json::from_str::<PackedBits>(json);

        let bits = decode(r#"{"words":[18446744073709551615],"len":3}"#).unwrap();
        assert_eq!(bits.len(), 3);
        assert_eq!(bits.count_ones(), 3);
        let json = serde_json::to_string(&bits).unwrap();
        assert!(decode(&json).unwrap() == bits);

        assert!(decode(r#"{"words":[],"len":100}"#).is_err());
        assert!(decode(r#"{"words":[0,0,0],"len":100}"#).is_err());
        assert!(decode(r#"{"words":[],"len":0}"#).is_err());
    }
}
