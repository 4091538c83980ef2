//! Item memory: a named codebook of hypervectors
//!
//! Maps symbols to hypervectors of one variant and dimension, and cleans up
//! noisy query vectors by returning the closest stored symbol.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::HdcConfig;
use crate::error::{HdcError, Result};
use crate::inference::{nearest_neighbor_by_key, nearest_neighbors_by_key, Neighbor};
use crate::types::{check_dimension, Hypervector};

/// Codebook mapping symbols to hypervectors
///
/// Symbols added with [`ItemMemory::get_or_create`] are derived from the
/// symbol itself (and the memory's seed, if any), so two memories with the
/// same seed and dimension assign identical vectors to the same symbol.
///
/// # Performance
///
/// - Insert: O(1)
/// - Retrieve, cleanup, top-k: O(N) similarity evaluations
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::{bind_pair, BipolarHV, ItemMemory};
///
/// let mut memory = ItemMemory::<BipolarHV>::new(10_000).unwrap();
/// let color = memory.get_or_create("color").unwrap().clone();
/// let red = memory.get_or_create("red").unwrap().clone();
///
/// let pair = bind_pair(&color, &red).unwrap();
/// let unbound = bind_pair(&pair, &color).unwrap();
///
/// let hit = memory.cleanup(&unbound).unwrap();
/// assert_eq!(hit.key, "red");
/// ```
#[derive(Debug, Clone)]
pub struct ItemMemory<H> {
    items: HashMap<String, H>,
    dimension: usize,
    seed: Option<u64>,
}

impl<H: Hypervector> ItemMemory<H> {
    /// Creates an empty memory for vectors of `dimension` elements.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_capacity(dimension, 0)
    }

    /// Creates an empty memory with room for `capacity` symbols.
    pub fn with_capacity(dimension: usize, capacity: usize) -> Result<Self> {
        check_dimension(dimension)?;
        Ok(Self {
            items: HashMap::with_capacity(capacity),
            dimension,
            seed: None,
        })
    }

    /// Creates an empty memory from a configuration; the configured seed
    /// salts every generated symbol.
    pub fn from_config(config: &HdcConfig) -> Result<Self> {
        config.validate()?;
        let mut memory = Self::new(config.dimension)?;
        memory.seed = config.seed;
        Ok(memory)
    }

    /// Dimension of every stored vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn check_query(&self, query: &H) -> Result<()> {
        if query.dimension() != self.dimension {
            return Err(HdcError::DimensionMismatch {
                expected: self.dimension,
                actual: query.dimension(),
            });
        }
        Ok(())
    }

    /// Stores `vector` under `symbol`, returning the previous vector.
    ///
    /// # Errors
    ///
    /// [`HdcError::DimensionMismatch`] when `vector` has the wrong dimension.
    pub fn insert(&mut self, symbol: impl Into<String>, vector: H) -> Result<Option<H>> {
        self.check_query(&vector)?;
        Ok(self.items.insert(symbol.into(), vector))
    }

    /// Vector stored under `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&H> {
        self.items.get(symbol)
    }

    /// Vector stored under `symbol`, generating and storing it on first use.
    pub fn get_or_create(&mut self, symbol: &str) -> Result<&H> {
        let dimension = self.dimension;
        let seed = self.seed;
        match self.items.entry(symbol.to_string()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let vector = match seed {
                    Some(seed) => H::from_seed(&(seed, symbol), dimension)?,
                    None => H::from_seed(symbol, dimension)?,
                };
                Ok(&*entry.insert(vector))
            }
        }
    }

    /// Whether `symbol` is stored.
    pub fn contains_key(&self, symbol: &str) -> bool {
        self.items.contains_key(symbol)
    }

    /// Removes and returns the vector stored under `symbol`.
    pub fn remove(&mut self, symbol: &str) -> Option<H> {
        self.items.remove(symbol)
    }

    /// Number of stored symbols.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no symbol is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every symbol.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the stored symbols in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    /// Iterates over `(symbol, vector)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &H)> {
        self.items.iter()
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &H)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All symbols whose similarity to `query` is at least `threshold`,
    /// most similar first (equal similarities by symbol).
    pub fn retrieve(&self, query: &H, threshold: f32) -> Result<Vec<(String, f32)>> {
        self.check_query(query)?;
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let ranked = nearest_neighbors_by_key(query, self.entries(), self.len())?;
        Ok(ranked
            .into_iter()
            .filter(|hit| hit.similarity >= threshold)
            .map(|hit| (hit.key.to_string(), hit.similarity))
            .collect())
    }

    /// The `k` symbols most similar to `query`, most similar first.
    ///
    /// # Errors
    ///
    /// [`HdcError::InvalidParameter`] when `k == 0`.
    pub fn top_k(&self, query: &H, k: usize) -> Result<Vec<(String, f32)>> {
        self.check_query(query)?;
        if k == 0 {
            return Err(HdcError::InvalidParameter("k must be positive".into()));
        }
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let ranked = nearest_neighbors_by_key(query, self.entries(), k)?;
        Ok(ranked
            .into_iter()
            .map(|hit| (hit.key.to_string(), hit.similarity))
            .collect())
    }

    /// Closest stored symbol to a (possibly noisy) query.
    ///
    /// # Errors
    ///
    /// [`HdcError::EmptyInput`] when the memory is empty.
    pub fn cleanup(&self, query: &H) -> Result<Neighbor<'_, &str, H>> {
        self.check_query(query)?;
        nearest_neighbor_by_key(query, self.entries())
    }
}
