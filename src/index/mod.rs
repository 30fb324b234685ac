//! Index construction and search.
//!
//! - [`segmentation`]: the streaming piecewise-linear segmentation engine
//! - [`static_index`]: the immutable multi-level index built on top of it
//! - [`dynamic`]: the log-structured mutable index (`std` only)
//! - [`key`] and [`geometry`]: the key abstraction and the exact
//!   arithmetic backing hull maintenance

pub(crate) mod builder;
pub mod geometry;
pub mod key;
pub mod segment;
pub mod segmentation;
pub mod static_index;

#[cfg(feature = "std")]
pub mod dynamic;

pub use builder::Builder;
pub use key::Key;
pub use segment::Segment;
pub use segmentation::{build_segments, Segmenter};
pub use static_index::Static;

#[cfg(feature = "std")]
pub use dynamic::Dynamic;
