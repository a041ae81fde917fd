use std::fmt;
use std::ops::RangeBounds;

use crate::util::{check_index, floor_log2_nonzero, normalize_range, tree_size};

/// - `compose(older, newer)`: `apply(apply(x, e1), e2) == apply(x, compose(e1, e2))`.
/// - `apply` must distribute over `combine`.
#[derive(Clone)]
pub struct LazySegmentTree<T, E, F, G, H> {
    len: usize,
    size: usize,
    height: u32,
    data: Vec<T>,
    lazy: Vec<E>,
    identity: T,
    effect_identity: E,
    combine: F,
    apply: G,
    compose: H,
}

impl<T, E, F, G, H> LazySegmentTree<T, E, F, G, H>
where
    T: Clone,
    E: Clone,
    F: Fn(&T, &T) -> T,
    G: Fn(&T, &E) -> T,
    H: Fn(&E, &E) -> E,
{
    pub fn new(
        values: &[T],
        identity: T,
        effect_identity: E,
        combine: F,
        apply: G,
        compose: H,
    ) -> Self {
        let len = values.len();
        let size = tree_size(len);

        let mut data = vec![identity.clone(); 2 * size];
        data[size..size + len].clone_from_slice(values);
        for i in (1..size).rev() {
            data[i] = combine(&data[2 * i], &data[2 * i + 1]);
        }
        let lazy = vec![effect_identity.clone(); 2 * size];
        tracing::trace!(len, size, "built lazy segment tree");

        Self {
            len,
            size,
            height: floor_log2_nonzero(size),
            data,
            lazy,
            identity,
            effect_identity,
            combine,
            apply,
            compose,
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

    pub fn get(&mut self, idx: usize) -> &T {
        check_index(idx, self.size);
        let leaf = self.size + idx;
        self.lazy_propagate_from_root(leaf);
        &self.data[leaf]
    }

    pub fn set(&mut self, idx: usize, value: T) {
        check_index(idx, self.size);
        let leaf = self.size + idx;
        // Clean first, or a stale effect above the leaf would land on `value`.
        self.lazy_propagate_from_root(leaf);
        self.data[leaf] = value;
        self.data_propagate_from_leaf(leaf);
    }

    pub fn update<R: RangeBounds<usize>>(&mut self, range: R, effect: E) {
        let (l, r) = normalize_range(range, self.size);
        let first = l + self.size;
        let last = r + self.size - 1;

        self.lazy_propagate_from_root(first);
        self.lazy_propagate_from_root(last);

        let mut l = first;
        let mut r = r + self.size;
        while l < r {
            if (l & 1) == 1 {
                self.lazy[l] = (self.compose)(&self.lazy[l], &effect);
                l += 1;
            }
            if (r & 1) == 1 {
                r -= 1;
                self.lazy[r] = (self.compose)(&self.lazy[r], &effect);
            }
            l >>= 1;
            r >>= 1;
        }

        self.data_propagate_from_leaf(first);
        self.data_propagate_from_leaf(last);
    }

    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> T {
        let (l, r) = normalize_range(range, self.size);
        let first = l + self.size;
        let last = r + self.size - 1;

        self.lazy_propagate_from_root(first);
        self.lazy_propagate_from_root(last);

        let mut l = first;
        let mut r = r + self.size;
        let mut left = self.identity.clone();
        let mut right = self.identity.clone();

        let data = &self.data;
        let combine = &self.combine;

        // Only boundary paths and their siblings are visited; all clean.
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

    pub fn all_fold(&self) -> T {
        (self.apply)(&self.data[1], &self.lazy[1])
    }

    #[inline]
    fn operate(&mut self, i: usize) {
        self.data[i] = (self.apply)(&self.data[i], &self.lazy[i]);
        self.lazy[i] = self.effect_identity.clone();
    }

    #[inline]
    fn propagate(&mut self, i: usize) {
        if i >= self.size {
            return;
        }
        let (left, right) = (2 * i, 2 * i + 1);
        self.lazy[left] = (self.compose)(&self.lazy[left], &self.lazy[i]);
        self.lazy[right] = (self.compose)(&self.lazy[right], &self.lazy[i]);
    }

    #[inline]
    fn propagate_and_operate(&mut self, i: usize) {
        self.propagate(i);
        self.operate(i);
    }

    /// Cleans every ancestor of `leaf`, their siblings, and `leaf` itself, top down.
    fn lazy_propagate_from_root(&mut self, leaf: usize) {
        debug_assert!(self.size <= leaf && leaf < 2 * self.size);
        self.propagate_and_operate(1);
        for shift in (0..self.height).rev() {
            let node = leaf >> shift;
            self.propagate_and_operate(node);
            self.propagate_and_operate(node ^ 1);
        }
    }

    /// Recombines every ancestor of `leaf` from its children's effective values.
    /// Ancestors keep their own pending effects.
    fn data_propagate_from_leaf(&mut self, leaf: usize) {
        debug_assert!(self.size <= leaf && leaf < 2 * self.size);
        let mut i = leaf >> 1;
        while i > 0 {
            self.pull(i);
            i >>= 1;
        }
    }

    #[inline]
    fn effective(&self, i: usize) -> T {
        (self.apply)(&self.data[i], &self.lazy[i])
    }

    #[inline]
    fn pull(&mut self, i: usize) {
        let left = self.effective(2 * i);
        let right = self.effective(2 * i + 1);
        self.data[i] = (self.combine)(&left, &right);
    }
}

impl<T: fmt::Debug, E: fmt::Debug, F, G, H> LazySegmentTree<T, E, F, G, H> {
    /// Emits both backing arrays at debug level. The format is not stable.
    pub fn dump(&self) {
        tracing::debug!(
            size = self.size,
            data = ?&self.data[1..],
            lazy = ?&self.lazy[1..],
            "lazy segment tree dump"
        );
    }
}

impl<T: fmt::Debug, E: fmt::Debug, F, G, H> fmt::Debug for LazySegmentTree<T, E, F, G, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySegmentTree")
            .field("len", &self.len)
            .field("size", &self.size)
            .field("data", &self.data)
            .field("lazy", &self.lazy)
            .finish_non_exhaustive()
    }
}
