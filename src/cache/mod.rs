//! Caching subsystem.
//!
//! - [`CacheStore`]: bounded, insertion-ordered store with FIFO eviction.
//!   Each [`GuardedCallGate`](crate::gate::GuardedCallGate) owns one.
//!
//! - [`CacheKeyBuilder`]: derives a [`CacheKey`] from the semantically
//!   relevant fields of a request. Every call site goes through the same
//!   normalization:
//!
//!   - free text is lower-cased, trimmed, whitespace-collapsed and cut to
//!     the first [`KEY_TEXT_PREFIX`] characters, so near-duplicate questions
//!     share an entry;
//!   - missing and empty optional text hash the same;
//!   - large payloads (résumé bodies, transcripts) hash their normalized
//!     prefix plus their normalized length, so documents that merely share
//!     a header do not collide.
//!
//! Keys use `DefaultHasher` (SipHash). The hash is stable within a process
//! lifetime, which is all an in-memory cache needs.

pub mod store;

pub use store::{CacheConfig, CacheStore};

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Characters of normalized free text that participate in a cache key.
pub const KEY_TEXT_PREFIX: usize = 100;

/// Opaque content hash identifying one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Incremental builder for [`CacheKey`]s.
///
/// ```rust
/// # use heimdall::cache::CacheKeyBuilder;
/// let a = CacheKeyBuilder::new("career_chat")
///     .text("How do I  prepare for interviews?")
///     .flag(true)
///     .optional_text(None)
///     .finish();
/// let b = CacheKeyBuilder::new("career_chat")
///     .text("how do i prepare for interviews?")
///     .flag(true)
///     .optional_text(Some(""))
///     .finish();
/// assert_eq!(a, b);
/// ```
pub struct CacheKeyBuilder {
    hasher: DefaultHasher,
}

impl CacheKeyBuilder {
    /// Start a key for the given operation.
    pub fn new(operation: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        operation.hash(&mut hasher);
        Self { hasher }
    }

    /// Add free text, normalized and truncated.
    pub fn text(mut self, text: &str) -> Self {
        normalize(text).hash(&mut self.hasher);
        self
    }

    /// Add optional free text; `None` and `""` are equivalent.
    pub fn optional_text(self, text: Option<&str>) -> Self {
        self.text(text.unwrap_or_default())
    }

    /// Add a large payload: normalized prefix plus normalized length.
    pub fn payload(mut self, text: &str) -> Self {
        let normalized = collapse(text);
        let prefix: String = normalized.chars().take(KEY_TEXT_PREFIX).collect();
        prefix.hash(&mut self.hasher);
        normalized.chars().count().hash(&mut self.hasher);
        self
    }

    /// Add a presence flag.
    pub fn flag(mut self, present: bool) -> Self {
        present.hash(&mut self.hasher);
        self
    }

    /// Add a small integer such as a turn counter.
    pub fn number(mut self, n: u64) -> Self {
        n.hash(&mut self.hasher);
        self
    }

    pub fn finish(self) -> CacheKey {
        CacheKey(self.hasher.finish())
    }
}

/// Normalize free text for keying: lower-case, collapse whitespace, keep the
/// first [`KEY_TEXT_PREFIX`] characters.
pub fn normalize(text: &str) -> String {
    collapse(text).chars().take(KEY_TEXT_PREFIX).collect()
}

fn collapse(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
