const WORD_BITS: usize = 32;

/// A fixed-length packed boolean array, used to mark per-entity component
/// presence. Backed by u32 words, `ceil(capacity / 32)` of them.
///
/// The length never grows; out-of-range access is a programming error and
/// panics immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresenceBitset {
    words: Vec<u32>,
    len: usize,
}

impl PresenceBitset {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> bool {
        self.check_bounds(index);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 != 0
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.check_bounds(index);
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Raw word-wise copy. Both bitsets must have the same length.
    pub fn copy_from(&mut self, other: &PresenceBitset) {
        assert_eq!(
            self.len, other.len,
            "PresenceBitset::copy_from requires equal lengths"
        );
        self.words.copy_from_slice(&other.words);
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    fn check_bounds(&self, index: usize) {
        if index >= self.len {
            panic!(
                "PresenceBitset index {} out of range (length {})",
                index, self.len
            );
        }
    }
}
