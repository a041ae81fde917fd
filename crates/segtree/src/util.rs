use std::ops::{Bound, RangeBounds};

#[inline(always)]
pub(crate) fn floor_log2_nonzero(x: usize) -> u32 {
    debug_assert!(x > 0);
    usize::BITS - 1 - x.leading_zeros()
}

/// Capacity of a tree holding `len` leaves: the next power of two, at least 1.
#[inline]
pub(crate) fn tree_size(len: usize) -> usize {
    len.next_power_of_two()
}

#[inline]
pub(crate) fn check_index(idx: usize, size: usize) {
    assert!(idx < size, "index out of bounds: {idx}/{size}");
}

/// Resolves `range` to a non-empty `(l, r)` with `r <= size`, panicking otherwise.
pub(crate) fn normalize_range<R: RangeBounds<usize>>(range: R, size: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => size,
    };

    assert!(
        start < end && end <= size,
        "invalid range: {start}..{end} (size {size})"
    );
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_round_up_to_powers_of_two() {
        let cases = [(0, 1), (1, 1), (2, 2), (3, 4), (10, 16), (16, 16), (17, 32)];
        for (len, expected) in cases {
            assert_eq!(tree_size(len), expected, "len={len}");
        }
    }

    #[test]
    fn floor_log2_known_cases() {
        let cases = [(1, 0), (2, 1), (3, 1), (4, 2), (16, 4), (1023, 9), (1024, 10)];
        for (x, expected) in cases {
            assert_eq!(floor_log2_nonzero(x), expected, "x={x}");
        }
    }

    #[test]
    fn range_forms_normalize() {
        assert_eq!(normalize_range(2..5, 8), (2, 5));
        assert_eq!(normalize_range(2..=5, 8), (2, 6));
        assert_eq!(normalize_range(..3, 8), (0, 3));
        assert_eq!(normalize_range(3.., 8), (3, 8));
        assert_eq!(normalize_range(.., 8), (0, 8));
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn empty_range_panics() {
        normalize_range(3..3, 8);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn range_past_end_panics() {
        normalize_range(0..9, 8);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end_panics() {
        check_index(8, 8);
    }
}
