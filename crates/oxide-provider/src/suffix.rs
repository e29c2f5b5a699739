//! Suffixes for autogenerated physical names.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Suffix length used when a physical name is autogenerated.
pub const SUFFIX_LENGTH: usize = 7;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Produces suffixes appended to a resource name when no physical name is given.
pub trait SuffixGenerator: Send + Sync {
    /// Returns a suffix of `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Random alphanumeric suffixes drawn from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuffix;

impl SuffixGenerator for RandomSuffix {
    fn generate(&self, length: usize) -> String {
        use rand::RngExt;
        let mut rng = rand::rng();
        (0..length)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect()
    }
}

/// Hands out a fixed sequence of suffixes, cycling when exhausted.
///
/// The requested length is ignored; values are returned as given.
#[derive(Debug)]
pub struct SequenceSuffix {
    values: Vec<String>,
    next: AtomicUsize,
}

impl SequenceSuffix {
    /// Creates a generator over `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        assert!(!values.is_empty(), "SequenceSuffix needs at least one value");
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }
}

impl SuffixGenerator for SequenceSuffix {
    fn generate(&self, _length: usize) -> String {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()].clone()
    }
}
