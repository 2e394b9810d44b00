//! Cache module for API responses
//!
//! This module keeps the decoded bodies of GET responses in memory for the
//! lifetime of a `CacheStore`, and provides `CachedClient`, a GET wrapper that
//! serves those bodies while they are younger than the TTL requested by the
//! caller. Entries are never evicted proactively: staleness is checked only
//! when the same request is made again.

mod fetcher;
mod key;
mod store;

pub use fetcher::{CachedClient, GetOptions};
pub use key::cache_key;
pub use store::{CacheEntry, CacheStore, CachedResponse};
