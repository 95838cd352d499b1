/// A bit set with one bit per row, used to select rows from a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMask {
    bytes: Vec<u8>,
    len: usize,
}

impl RowMask {
    /// Creates a mask over `len` rows with no row selected.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Creates a mask selecting every row for which `predicate` holds.
    pub fn from_fn(len: usize, mut predicate: impl FnMut(usize) -> bool) -> Self {
        let mut mask = Self::new(len);
        for index in 0..len {
            if predicate(index) {
                mask.set(index);
            }
        }
        mask
    }

    /// Number of rows the mask covers, selected or not.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selects row `index`. Indices past the end of the mask are ignored.
    pub fn set(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let byte_idx = index / 8;
        let bit_idx = index % 8;
        self.bytes[byte_idx] |= 1 << bit_idx;
    }

    pub fn is_set(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let byte_idx = index / 8;
        let bit_idx = index % 8;
        (self.bytes[byte_idx] & (1 << bit_idx)) != 0
    }

    /// Number of selected rows.
    pub fn count_set(&self) -> usize {
        self.bytes.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Selected row indices in ascending order.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&index| self.is_set(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask() {
        let mask = RowMask::new(10);
        assert_eq!(mask.count_set(), 0);
        assert_eq!(mask.iter_set().count(), 0);
        assert!(!mask.is_set(3));
    }

    #[test]
    fn test_set_across_byte_boundary() {
        let mut mask = RowMask::new(17);
        mask.set(0);
        mask.set(8);
        mask.set(16);

        assert_eq!(mask.iter_set().collect::<Vec<_>>(), vec![0, 8, 16]);
        assert_eq!(mask.count_set(), 3);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut mask = RowMask::new(3);
        mask.set(5);
        assert!(!mask.is_set(5));
        assert_eq!(mask.count_set(), 0);
    }

    #[test]
    fn test_from_fn() {
        let mask = RowMask::from_fn(6, |i| i % 2 == 1);
        assert_eq!(mask.iter_set().collect::<Vec<_>>(), vec![1, 3, 5]);
    }
}
