use crate::index::Key;

/// A linear model covering a contiguous key range.
///
/// Predicts `position(k) = slope * (k - key) + intercept` for keys in
/// `[key, next.key)`; the prediction is within the construction-time error
/// bound of the true position for every covered key.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<K: Key> {
    pub key: K,
    pub slope: f64,
    pub intercept: f64,
}

impl<K: Key> Segment<K> {
    #[inline]
    pub fn new(key: K, slope: f64, intercept: f64) -> Self {
        Self {
            key,
            slope,
            intercept,
        }
    }

    #[inline(always)]
    pub fn predict(&self, key: K) -> usize {
        let diff = key.to_f64_fast() - self.key.to_f64_fast();
        let pos = self.intercept + self.slope * diff;
        if pos > 0.0 { pos as usize } else { 0 }
    }
}

impl<K: Key> Default for Segment<K> {
    fn default() -> Self {
        Self {
            key: K::default(),
            slope: 0.0,
            intercept: 0.0,
        }
    }
}
