//! Who each clue points at
//!
//! A fixed-size hash table from clue text to suspect name. Collisions are
//! resolved by chaining: each bucket is a singly linked list, and new
//! entries are pushed at the head of their chain.
//!
//! Inserting a clue that is already indexed does not replace the old entry.
//! The new entry lands ahead of it in the chain, so the most recent
//! attribution is the one [`SuspectIndex::lookup`] returns.

use crate::GameError;

/// Bucket count used by the built-in scenario
pub const DEFAULT_BUCKETS: usize = 20;

const HASH_SEED: u64 = 5381;

/// djb2 over the key bytes, reduced to a bucket index
pub fn bucket_of(key: &str, buckets: usize) -> usize {
    let hash = key
        .bytes()
        .fold(HASH_SEED, |acc, b| acc.wrapping_mul(33).wrapping_add(u64::from(b)));
    (hash % buckets as u64) as usize
}

#[derive(Debug)]
struct Entry {
    clue: String,
    suspect: String,
    next: Option<Box<Entry>>,
}

/// Clue → suspect lookup table
#[derive(Debug)]
pub struct SuspectIndex {
    buckets: Vec<Option<Box<Entry>>>,
    len: usize,
}

impl SuspectIndex {
    /// Create an index with [`DEFAULT_BUCKETS`] buckets
    pub fn new() -> Self {
        Self {
            buckets: (0..DEFAULT_BUCKETS).map(|_| None).collect(),
            len: 0,
        }
    }

    /// Create an index with a custom number of buckets.
    ///
    /// Fails rather than aborting if the bucket array can't be allocated.
    pub fn with_buckets(count: usize) -> Result<Self, GameError> {
        if count == 0 {
            return Err(GameError::EmptyBucketTable);
        }
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(count)
            .map_err(|_| GameError::AllocationFailed("suspect index"))?;
        buckets.resize_with(count, || None);
        Ok(Self { buckets, len: 0 })
    }

    /// Build an index from (clue, suspect) pairs, in order
    pub fn from_pairs<'a, I>(buckets: usize, pairs: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut index = Self::with_buckets(buckets)?;
        for (clue, suspect) in pairs {
            index.insert(clue, suspect);
        }
        Ok(index)
    }

    /// Attribute a clue to a suspect
    pub fn insert(&mut self, clue: &str, suspect: &str) {
        let bucket = bucket_of(clue, self.buckets.len());
        let next = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Entry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next,
        }));
        self.len += 1;
    }

    /// The suspect a clue points at, if the clue is indexed
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        self.chain(bucket_of(clue, self.buckets.len()))
            .find(|entry| entry.clue == clue)
            .map(|entry| entry.suspect.as_str())
    }

    /// Number of entries, shadowed ones included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of one bucket's chain
    pub fn chain_len(&self, bucket: usize) -> usize {
        if bucket >= self.buckets.len() {
            return 0;
        }
        self.chain(bucket).count()
    }

    /// Distinct suspect names, sorted
    pub fn suspects(&self) -> Vec<&str> {
        let mut names: Vec<&str> = (0..self.buckets.len())
            .flat_map(|bucket| self.chain(bucket))
            .map(|entry| entry.suspect.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn chain(&self, bucket: usize) -> impl Iterator<Item = &Entry> {
        std::iter::successors(self.buckets[bucket].as_deref(), |entry| entry.next.as_deref())
    }
}

impl Default for SuspectIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SuspectIndex {
    fn drop(&mut self) {
        // Unlink chains one entry at a time instead of recursing through Box drops
        for bucket in &mut self.buckets {
            let mut next = bucket.take();
            while let Some(mut entry) = next {
                next = entry.next.take();
            }
        }
    }
}
