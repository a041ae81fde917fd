use std::fmt;
use std::ops::RangeBounds;

use crate::util::{check_index, normalize_range, tree_size};

#[derive(Clone)]
pub struct SegmentTree<T, F> {
    len: usize,
    size: usize,
    data: Vec<T>,
    identity: T,
    combine: F,
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    pub fn new(values: &[T], identity: T, combine: F) -> Self {
        let len = values.len();
        let size = tree_size(len);

        let mut data = vec![identity.clone(); 2 * size];
        data[size..size + len].clone_from_slice(values);
        for i in (1..size).rev() {
            data[i] = combine(&data[2 * i], &data[2 * i + 1]);
        }
        tracing::trace!(len, size, "built segment tree");

        Self {
            len,
            size,
            data,
            identity,
            combine,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Leaf capacity; indices in `len()..size()` hold the identity.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, idx: usize) -> &T {
        check_index(idx, self.size);
        &self.data[self.size + idx]
    }

    pub fn set(&mut self, idx: usize, value: T) {
        check_index(idx, self.size);
        let mut i = self.size + idx;
        self.data[i] = value;
        i >>= 1;
        while i > 0 {
            self.recalc(i);
            i >>= 1;
        }
    }

    pub fn query<R: RangeBounds<usize>>(&self, range: R) -> T {
        let (l, r) = normalize_range(range, self.size);

        let mut l = l + self.size;
        let mut r = r + self.size;
        let mut left = self.identity.clone();
        let mut right = self.identity.clone();

        let data = &self.data;
        let combine = &self.combine;

        while l < r {
            if (l & 1) == 1 {
                left = combine(&left, &data[l]);
                l += 1;
            }
            if (r & 1) == 1 {
                r -= 1;
                right = combine(&data[r], &right);
            }
            l >>= 1;
            r >>= 1;
        }

        combine(&left, &right)
    }

    /// Fold of the whole array.
    pub fn all_fold(&self) -> &T {
        &self.data[1]
    }

    #[inline]
    fn recalc(&mut self, i: usize) {
        self.data[i] = (self.combine)(&self.data[2 * i], &self.data[2 * i + 1]);
    }
}

impl<T: fmt::Debug, F> SegmentTree<T, F> {
    /// Emits the backing array at debug level. The format is not stable.
    pub fn dump(&self) {
        tracing::debug!(size = self.size, data = ?&self.data[1..], "segment tree dump");
    }
}

impl<T: fmt::Debug, F> fmt::Debug for SegmentTree<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len)
            .field("size", &self.size)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
