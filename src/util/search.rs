//! Bounded search routines over sorted slices.

/// Window size below which linear scans beat binary search on segment
/// arrays.
pub(crate) const LINEAR_SEARCH_THRESHOLD: usize = 32;

#[inline]
pub fn sub_eps(pos: usize, eps: usize) -> usize {
    pos.saturating_sub(eps)
}

#[inline]
pub fn add_eps(pos: usize, eps: usize, size: usize) -> usize {
    let upper = pos.saturating_add(eps).saturating_add(2);
    if upper >= size { size } else { upper }
}

/// First index in `[lo, hi)` with `keys[i] >= key`, branchless.
#[inline]
pub fn lower_bound_in<K: PartialOrd>(keys: &[K], key: &K, lo: usize, hi: usize) -> usize {
    let hi = hi.min(keys.len());
    if lo >= hi {
        return lo.min(keys.len());
    }

    let slice = &keys[lo..hi];
    let mut size = slice.len();
    let mut base = 0usize;
    while size > 1 {
        let half = size / 2;
        let mid = base + half;
        base = if slice[mid] < *key { mid } else { base };
        size -= half;
    }

    lo + base + (slice[base] < *key) as usize
}

/// Rightmost index in `[lo, hi)` with `keys[i] <= key`, or `lo` when no
/// such index exists. Adaptive: short windows are scanned linearly.
#[inline]
pub fn last_le_in<K: PartialOrd>(keys: &[K], key: &K, lo: usize, hi: usize) -> usize {
    let hi = hi.min(keys.len());
    if lo >= hi {
        return lo;
    }

    if hi - lo <= LINEAR_SEARCH_THRESHOLD {
        let mut i = lo;
        while i + 1 < hi && keys[i + 1] <= *key {
            i += 1;
        }
        i
    } else {
        let slice = &keys[lo..hi];
        lo + slice.partition_point(|k| k <= key).saturating_sub(1)
    }
}
