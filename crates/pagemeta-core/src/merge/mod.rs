//! Three-tier metadata merge: fallback, then generated, then override.
//!
//! Invariants shared by both strategies:
//! - anything the override sets wins;
//! - fallback never wins over generated;
//! - a field absent from all three inputs is absent from the result.
//!
//! [`merge_objects`] deep-merges nested objects with arrays treated as atomic
//! values. [`merge_tags`] merges ordered tag lists using each record's
//! [`DedupKey`](crate::DedupKey).

mod object;
mod tags;

pub use object::{deep_merge, merge_objects};
pub use tags::merge_tags;
