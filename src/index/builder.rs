use crate::error::Error;
use crate::index::static_index::Static;
use crate::index::Key;

/// Builder for indexes with custom error bounds.
///
/// # Example
///
/// ```
/// use plindex::Builder;
///
/// let data: Vec<u64> = (0..10000).collect();
///
/// let index = Builder::new()
///     .epsilon(128)
///     .epsilon_recursive(8)
///     .build(&data)
///     .unwrap();
///
/// assert_eq!(index.epsilon(), 128);
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    epsilon: usize,
    epsilon_recursive: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            epsilon: 64,
            epsilon_recursive: 4,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error bound for the data level. Zero requests exact interpolation.
    pub fn epsilon(mut self, epsilon: usize) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Error bound for the upper levels. Zero disables recursion,
    /// leaving a flat segment array.
    pub fn epsilon_recursive(mut self, epsilon_recursive: usize) -> Self {
        self.epsilon_recursive = epsilon_recursive;
        self
    }

    pub fn build<K: Key>(&self, data: &[K]) -> Result<Static<K>, Error> {
        Static::new(data, self.epsilon, self.epsilon_recursive)
    }

    /// Create an empty dynamic index whose per-level static indexes use
    /// this builder's error bounds.
    #[cfg(feature = "std")]
    pub fn build_dynamic<K: Key + Ord, V>(
        &self,
        base_capacity: usize,
        min_indexed_level: usize,
    ) -> crate::index::dynamic::Dynamic<K, V> {
        crate::index::dynamic::Dynamic::new(base_capacity, min_indexed_level)
            .with_epsilon(self.epsilon, self.epsilon_recursive)
    }
}
