//! Multi-level static index.
//!
//! Levels are built bottom-up: the data is segmented with `epsilon`, then
//! each level's first-keys are segmented with `epsilon_recursive` until a
//! level fits in `epsilon_recursive + 1` segments. Levels are stored
//! root-first in contiguous structure-of-arrays buffers (keys, slopes and
//! intercepts separately) with per-level offsets.
//!
//! Every level carries a trailing sentinel segment whose key is the
//! successor of the last input key and whose intercept is the input
//! length; it covers no data and routes out-of-range queries to the end
//! position.

use alloc::vec::Vec;

use crate::error::Error;
use crate::index::segmentation::Segmenter;
use crate::index::{Key, Segment};
use crate::util::search::{add_eps, last_le_in, lower_bound_in, sub_eps};
use crate::util::ApproxRange;

/// A multi-level learned index over a sorted key slice.
///
/// The index stores only model metadata and borrows, never owns, the
/// underlying data: query methods take the data slice alongside the key.
/// Once built it is immutable and can be shared freely across threads.
///
/// # Example
///
/// ```
/// use plindex::Static;
///
/// let keys: Vec<u64> = (0..10000).collect();
/// let index = Static::new(&keys, 64, 4).unwrap();
///
/// assert!(index.contains(&keys, &5000));
/// assert_eq!(index.lower_bound(&keys, &5000), 5000);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Static<K: Key> {
    epsilon: usize,
    epsilon_recursive: usize,
    len: usize,
    levels_offsets: Vec<usize>,
    keys: Vec<K>,
    slopes: Vec<f64>,
    intercepts: Vec<f64>,
}

struct LevelBuf<K> {
    keys: Vec<K>,
    slopes: Vec<f64>,
    intercepts: Vec<f64>,
}

impl<K> LevelBuf<K> {
    fn new() -> Self {
        Self {
            keys: Vec::new(),
            slopes: Vec::new(),
            intercepts: Vec::new(),
        }
    }

    fn push(&mut self, seg: Segment<K>)
    where
        K: Key,
    {
        self.keys.push(seg.key);
        self.slopes.push(seg.slope);
        self.intercepts.push(seg.intercept);
    }

    /// Number of segments excluding the sentinel.
    fn real_len(&self) -> usize {
        self.keys.len() - 1
    }
}

impl<K: Key> Static<K> {
    /// Build a new index over a sorted slice.
    ///
    /// `epsilon` bounds the prediction error at the data level,
    /// `epsilon_recursive` at the upper levels; `epsilon_recursive == 0`
    /// produces a single flat level. Both may be zero. An empty slice is
    /// valid and yields an index whose every search returns `{0, 0}`.
    ///
    /// # Errors
    ///
    /// `Error::UnsortedKeys` if the slice is not non-decreasing,
    /// `Error::NanKey` if a floating-point key is NaN.
    pub fn new(data: &[K], epsilon: usize, epsilon_recursive: usize) -> Result<Self, Error> {
        let mut this = Self {
            epsilon,
            epsilon_recursive,
            len: data.len(),
            levels_offsets: Vec::new(),
            keys: Vec::new(),
            slopes: Vec::new(),
            intercepts: Vec::new(),
        };
        if data.is_empty() {
            return Ok(this);
        }

        let mut levels = Vec::new();
        levels.push(Self::build_data_level(data, epsilon)?);

        if epsilon_recursive > 0 {
            while levels
                .last()
                .map_or(false, |l: &LevelBuf<K>| l.real_len() > epsilon_recursive + 1)
            {
                let prev = &levels[levels.len() - 1];
                let next = Self::build_upper_level(prev, epsilon_recursive)?;
                levels.push(next);
            }
        }

        let total: usize = levels.iter().map(|l| l.keys.len()).sum();
        this.keys = Vec::with_capacity(total);
        this.slopes = Vec::with_capacity(total);
        this.intercepts = Vec::with_capacity(total);
        this.levels_offsets = Vec::with_capacity(levels.len() + 1);

        this.levels_offsets.push(0);
        for level in levels.iter().rev() {
            this.keys.extend_from_slice(&level.keys);
            this.slopes.extend_from_slice(&level.slopes);
            this.intercepts.extend_from_slice(&level.intercepts);
            this.levels_offsets.push(this.keys.len());
        }

        Ok(this)
    }

    /// Segment the data itself.
    ///
    /// The last element of a run of equal keys `x` is fed as
    /// `(successor(x), rank_after_run)` whenever the following key leaves
    /// a gap, so that bounded binary search resolves absent keys just
    /// above the run to the correct insertion point.
    fn build_data_level(data: &[K], epsilon: usize) -> Result<LevelBuf<K>, Error> {
        let n = data.len();
        let mut level = LevelBuf::new();
        let mut segmenter = Segmenter::new(epsilon);

        for i in 0..n {
            let x = data[i];
            let bumped =
                i > 0 && i + 1 < n && x == data[i - 1] && x.successor() < data[i + 1];
            let (key, y) = if bumped {
                (x.successor(), (i + 1) as u64)
            } else {
                (x, i as u64)
            };
            if let Some(seg) = segmenter.push_point(key, y)? {
                level.push(seg);
            }
        }
        if let Some(seg) = segmenter.finish() {
            level.push(seg);
        }

        level.push(Segment::new(data[n - 1].successor(), 0.0, n as f64));
        Ok(level)
    }

    /// Segment the first-keys of the previous level.
    fn build_upper_level(prev: &LevelBuf<K>, epsilon: usize) -> Result<LevelBuf<K>, Error> {
        let m = prev.real_len();
        let mut level = LevelBuf::new();
        let mut segmenter = Segmenter::new(epsilon);

        for (i, &key) in prev.keys[..m].iter().enumerate() {
            if let Some(seg) = segmenter.push_point(key, i as u64)? {
                level.push(seg);
            }
        }
        if let Some(seg) = segmenter.finish() {
            level.push(seg);
        }

        level.push(Segment::new(prev.keys[m - 1].successor(), 0.0, m as f64));
        Ok(level)
    }

    /// Size of a stored level including its sentinel.
    #[inline]
    fn level_size(&self, level: usize) -> usize {
        self.levels_offsets[level + 1] - self.levels_offsets[level]
    }

    /// Rightmost segment of `level` (local index in `[lo, hi)`) whose key
    /// is at most `key`.
    #[inline]
    fn locate(&self, level: usize, key: &K, lo: usize, hi: usize) -> usize {
        let start = self.levels_offsets[level];
        let end = self.levels_offsets[level + 1];
        last_le_in(&self.keys[start..end], key, lo, hi)
    }

    /// Prediction of the segment at local index `idx` of `level`, capped
    /// by the next segment's intercept (its first covered position).
    #[inline]
    fn predicted(&self, level: usize, idx: usize, key: &K) -> usize {
        let abs = self.levels_offsets[level] + idx;
        let diff = key.to_f64_fast() - self.keys[abs].to_f64_fast();
        let raw = self.intercepts[abs] + self.slopes[abs] * diff;
        let mut pos = if raw > 0.0 { raw as usize } else { 0 };
        if idx + 1 < self.level_size(level) {
            let cap = self.intercepts[abs + 1];
            let cap = if cap > 0.0 { cap as usize } else { 0 };
            pos = pos.min(cap);
        }
        pos
    }

    /// Approximate position of `key` in the indexed data.
    ///
    /// The first occurrence of `key`, if present, lies in `[lo, hi)`, and
    /// `hi - lo <= 2 * epsilon + 2`.
    pub fn search(&self, key: &K) -> ApproxRange {
        if self.len == 0 {
            return ApproxRange::new(0, 0, 0);
        }

        let num_levels = self.levels_offsets.len() - 1;
        let mut lo = 0usize;
        let mut hi = self.level_size(0);
        let mut idx = 0usize;

        for level in 0..num_levels {
            idx = self.locate(level, key, lo, hi);
            if level + 1 == num_levels {
                break;
            }
            let next_size = self.level_size(level + 1);
            let pos = self.predicted(level, idx, key).min(next_size - 1);
            lo = pos.saturating_sub(self.epsilon_recursive + 1);
            hi = (pos + self.epsilon_recursive + 2).min(next_size);
        }

        let pos = self
            .predicted(num_levels - 1, idx, key)
            .min(self.len - 1);
        ApproxRange::new(pos, sub_eps(pos, self.epsilon), add_eps(pos, self.epsilon, self.len))
    }

    /// First position where `data[pos] >= key`.
    #[inline]
    pub fn lower_bound(&self, data: &[K], key: &K) -> usize {
        let approx = self.search(key);
        lower_bound_in(data, key, approx.lo, approx.hi)
    }

    /// First position where `data[pos] > key`.
    #[inline]
    pub fn upper_bound(&self, data: &[K], key: &K) -> usize {
        let mut i = self.lower_bound(data, key);
        while i < data.len() && data[i] == *key {
            i += 1;
        }
        i
    }

    /// Whether `key` occurs in the data.
    #[inline]
    pub fn contains(&self, data: &[K], key: &K) -> bool {
        let i = self.lower_bound(data, key);
        i < data.len() && data[i] == *key
    }

    /// Number of keys the index was built over.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments across all levels, sentinels excluded.
    pub fn segments_count(&self) -> usize {
        let num_levels = self.levels_offsets.len().saturating_sub(1);
        self.keys.len() - num_levels
    }

    /// Number of levels; the root counts as one.
    #[inline]
    pub fn levels_count(&self) -> usize {
        self.levels_offsets.len().saturating_sub(1)
    }

    #[inline]
    pub fn epsilon(&self) -> usize {
        self.epsilon
    }

    #[inline]
    pub fn epsilon_recursive(&self) -> usize {
        self.epsilon_recursive
    }

    /// Approximate memory usage in bytes.
    pub fn size_in_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.keys.capacity() * core::mem::size_of::<K>()
            + self.slopes.capacity() * core::mem::size_of::<f64>()
            + self.intercepts.capacity() * core::mem::size_of::<f64>()
            + self.levels_offsets.capacity() * core::mem::size_of::<usize>()
    }
}
