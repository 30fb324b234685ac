//! # plindex
//!
//! A learned index over sorted keys: a hierarchy of piecewise-linear
//! models that predicts a key's position within a construction-time error
//! bound ε. A search costs a handful of model probes plus one bounded
//! binary search of at most `2ε + 2` positions, with a fraction of the
//! memory of a comparison-based tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use plindex::Static;
//!
//! let keys: Vec<u64> = (0..10_000).map(|i| i * 7).collect();
//! let index = Static::new(&keys, 64, 4).unwrap();
//!
//! // The index borrows the data; queries take the slice alongside the key.
//! assert_eq!(index.lower_bound(&keys, &700), 100);
//! assert!(index.contains(&keys, &700));
//!
//! let range = index.search(&700);
//! assert!(range.lo <= 100 && 100 < range.hi);
//! ```
//!
//! ## Index Types
//!
//! - [`Static`]: immutable multi-level index over an external sorted slice
//! - [`Dynamic`]: mutable map with versioned entries and log-structured
//!   compaction (requires the `std` feature)
//!
//! The segmentation engine is exposed directly as [`Segmenter`] and
//! [`build_segments`] for callers that only need the piecewise-linear
//! decomposition.
//!
//! ## Features
//!
//! - `std` (default): enables the [`Dynamic`] index
//! - `serde`: serialization of [`Static`] and [`Segment`]
//! - `rkyv`: zero-copy serialization of [`Static`]
//!
//! ## Guarantees
//!
//! Construction is O(n) and streaming: the segmenter's working set is the
//! convex hull of the segment in progress, not the input. Search windows
//! are deterministic; two indexes built from identical inputs with
//! identical parameters are identical. Input validation is eager: an
//! unsorted sequence or a NaN key fails construction with an error.

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod error;
pub mod index;
pub mod util;

pub use error::Error;
pub use index::{build_segments, Builder, Key, Segment, Segmenter, Static};
pub use util::ApproxRange;

pub use index::Static as StaticIndex;

#[cfg(feature = "std")]
pub use index::Dynamic;
#[cfg(feature = "std")]
pub use index::Dynamic as DynamicIndex;
