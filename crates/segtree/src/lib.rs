//! Array-backed segment trees.
//!
//! - [`SegmentTree`]: point updates and range folds over a monoid.
//! - [`LazySegmentTree`]: adds range updates through deferred effects.
//!
//! Both trees use the implicit 1-indexed heap layout over `size()` leaves
//! (the input length rounded up to a power of two), walk it iteratively, and
//! take half-open ranges. Precondition violations panic.

mod lazy_segment_tree;
mod segment_tree;
mod util;

pub use lazy_segment_tree::LazySegmentTree;
pub use segment_tree::SegmentTree;
