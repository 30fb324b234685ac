//! Streaming optimal piecewise-linear segmentation.
//!
//! Feeds a non-decreasing key sequence through a convex-hull construction
//! that tracks the cone of feasible slopes for the segment under
//! construction: the intersection of the half-planes forcing the line to
//! pass within ±ε of every point seen so far. A segment is closed at the
//! first point the cone cannot absorb, which yields the minimum number of
//! segments for the given ε.
//!
//! Peak auxiliary memory is bounded by the hull size of the in-progress
//! segment, not by the input length.

use alloc::vec::Vec;

use num_traits::Zero;

use crate::error::Error;
use crate::index::geometry::{cross, segment_params, HullPoint, Wide};
use crate::index::{Key, Segment};

/// Incremental segmenter over a non-decreasing key stream.
///
/// `push` returns the finished segment whenever the incoming key closes
/// one; `finish` flushes the segment still under construction. Input is
/// validated as it streams: a decreasing key or a NaN key is rejected
/// eagerly, never silently accepted.
///
/// # Example
///
/// ```
/// use plindex::Segmenter;
///
/// let mut seg = Segmenter::new(4);
/// let mut segments = Vec::new();
/// for key in [2u64, 3, 5, 8, 13, 21, 34, 55] {
///     if let Some(s) = seg.push(key).unwrap() {
///         segments.push(s);
///     }
/// }
/// segments.extend(seg.finish());
/// assert!(!segments.is_empty());
/// ```
pub struct Segmenter<K: Key> {
    epsilon: i64,
    first_key: K,
    last_key: Option<K>,
    pos: u64,
    points_in_hull: usize,
    rect: [HullPoint<K::Wide>; 4],
    upper: Vec<HullPoint<K::Wide>>,
    lower: Vec<HullPoint<K::Wide>>,
    upper_start: usize,
    lower_start: usize,
}

impl<K: Key> Segmenter<K> {
    pub fn new(epsilon: usize) -> Self {
        let zero = HullPoint {
            x: K::Wide::zero(),
            y: K::Wide::zero(),
        };
        Self {
            epsilon: epsilon.min(i64::MAX as usize) as i64,
            first_key: K::default(),
            last_key: None,
            pos: 0,
            points_in_hull: 0,
            rect: [zero; 4],
            upper: Vec::new(),
            lower: Vec::new(),
            upper_start: 0,
            lower_start: 0,
        }
    }

    /// Feed the next key; its position is the number of keys fed so far.
    ///
    /// Returns `Ok(Some(segment))` when this key closed the previous
    /// segment and opened a new one.
    pub fn push(&mut self, key: K) -> Result<Option<Segment<K>>, Error> {
        let y = self.pos;
        self.pos += 1;
        self.push_point(key, y)
    }

    /// Feed a key at an explicit position. Consecutive equal keys are
    /// collapsed: they advance positions but do not constrain the hull.
    pub(crate) fn push_point(&mut self, key: K, y: u64) -> Result<Option<Segment<K>>, Error> {
        if key.is_nan() {
            return Err(Error::NanKey);
        }
        if let Some(last) = self.last_key {
            if key < last {
                return Err(Error::UnsortedKeys);
            }
            if key == last {
                return Ok(None);
            }
        }
        self.last_key = Some(key);

        if self.add_point(key, y as i64) {
            return Ok(None);
        }
        let closed = self.current_segment();
        let opened = self.add_point(key, y as i64);
        debug_assert!(opened);
        Ok(Some(closed))
    }

    /// Flush the in-progress segment, if any.
    pub fn finish(self) -> Option<Segment<K>> {
        if self.points_in_hull == 0 {
            return None;
        }
        Some(self.current_segment())
    }

    fn current_segment(&self) -> Segment<K> {
        let one_point = self.points_in_hull == 1;
        let (slope, intercept) =
            segment_params(&self.rect, self.first_key.to_wide(), one_point);
        Segment::new(self.first_key, slope, intercept)
    }

    /// Try to absorb `(key, y)` into the current hull. On failure the
    /// hull is reset (the rectangle keeps describing the closed segment)
    /// and the caller must re-add the point to open the next segment.
    fn add_point(&mut self, key: K, y: i64) -> bool {
        let x = key.to_wide();
        let p1 = HullPoint {
            x,
            y: K::Wide::from_position(y.saturating_add(self.epsilon)),
        };
        let p2 = HullPoint {
            x,
            y: K::Wide::from_position(y.saturating_sub(self.epsilon)),
        };

        if self.points_in_hull == 0 {
            self.first_key = key;
            self.rect[0] = p1;
            self.rect[1] = p2;
            self.upper.clear();
            self.lower.clear();
            self.upper.push(p1);
            self.lower.push(p2);
            self.upper_start = 0;
            self.lower_start = 0;
            self.points_in_hull = 1;
            return true;
        }

        if self.points_in_hull == 1 {
            self.rect[2] = p2;
            self.rect[3] = p1;
            self.upper.push(p1);
            self.lower.push(p2);
            self.points_in_hull = 2;
            return true;
        }

        let slope1 = self.rect[2] - self.rect[0];
        let slope2 = self.rect[3] - self.rect[1];
        let outside_line1 = (p1 - self.rect[2]) < slope1;
        let outside_line2 = (p2 - self.rect[3]) > slope2;
        if outside_line1 || outside_line2 {
            self.points_in_hull = 0;
            return false;
        }

        if (p1 - self.rect[1]) < slope2 {
            // The upper corner rotates the maximum-slope edge downwards;
            // its new left end is the lower-hull point extremal to p1.
            let mut min = self.lower[self.lower_start] - p1;
            let mut min_i = self.lower_start;
            for i in self.lower_start + 1..self.lower.len() {
                let val = self.lower[i] - p1;
                if val > min {
                    break;
                }
                min = val;
                min_i = i;
            }
            self.rect[1] = self.lower[min_i];
            self.rect[3] = p1;
            self.lower_start = min_i;

            let mut end = self.upper.len();
            while end >= self.upper_start + 2
                && cross(self.upper[end - 2], self.upper[end - 1], p1) <= K::Wide::zero()
            {
                end -= 1;
            }
            self.upper.truncate(end);
            self.upper.push(p1);
        }

        if (p2 - self.rect[0]) > slope1 {
            // Symmetric update of the minimum-slope edge.
            let mut max = self.upper[self.upper_start] - p2;
            let mut max_i = self.upper_start;
            for i in self.upper_start + 1..self.upper.len() {
                let val = self.upper[i] - p2;
                if val < max {
                    break;
                }
                max = val;
                max_i = i;
            }
            self.rect[0] = self.upper[max_i];
            self.rect[2] = p2;
            self.upper_start = max_i;

            let mut end = self.lower.len();
            while end >= self.lower_start + 2
                && cross(self.lower[end - 2], self.lower[end - 1], p2) >= K::Wide::zero()
            {
                end -= 1;
            }
            self.lower.truncate(end);
            self.lower.push(p2);
        }

        self.points_in_hull += 1;
        true
    }
}

/// Segment a sorted slice with error bound `epsilon`.
///
/// The result has at most `keys.len()` segments and is minimal for the
/// given bound. `epsilon == 0` requests exact interpolation.
pub fn build_segments<K: Key>(keys: &[K], epsilon: usize) -> Result<Vec<Segment<K>>, Error> {
    let mut segments = Vec::with_capacity(keys.len() / (2 * epsilon.max(1)) + 1);
    let mut segmenter = Segmenter::new(epsilon);
    for &key in keys {
        if let Some(s) = segmenter.push(key)? {
            segments.push(s);
        }
    }
    if let Some(s) = segmenter.finish() {
        segments.push(s);
    }
    Ok(segments)
}
