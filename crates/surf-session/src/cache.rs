//! Page-content cache: a fixed-size chained hash table keyed by URL.
//!
//! Entries are never updated or evicted. Putting a URL that is already
//! cached adds a second entry at the head of its bucket, which shadows the
//! older one for lookups while both stay in memory.

use crate::url::{MAX_URL_LEN, truncate_bytes};

/// Number of hash buckets.
pub const BUCKET_COUNT: usize = 100;

/// Longest cached body in bytes.
pub const MAX_CONTENT_LEN: usize = 499;

/// Bucket index for `url`.
///
/// `h = (h * 31 + byte) % 100` from `h = 0`. The running value is reduced
/// after every byte, so it never grows past `99 * 31 + 255`.
pub fn hash(url: &str) -> usize {
    let m = BUCKET_COUNT as u32;
    let h = url
        .bytes()
        .fold(0u32, |h, b| (h * 31 + u32::from(b)) % m);
    h as usize
}

#[derive(Debug, Clone)]
struct CacheEntry {
    url: String,
    content: String,
}

/// URL-keyed cache of page bodies.
#[derive(Debug, Clone)]
pub struct ContentCache {
    // Each chain stores its head at the end, so `push` prepends.
    buckets: Vec<Vec<CacheEntry>>,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache {
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKET_COUNT],
        }
    }

    /// Prepend an entry to the bucket for `url`. Existing entries for the
    /// same URL are left in place.
    pub fn put(&mut self, url: &str, content: &str) {
        let key = truncate_bytes(url, MAX_URL_LEN);
        let index = hash(key);
        log::debug!("cache put {key} -> bucket {index}");
        self.buckets[index].push(CacheEntry {
            url: key.to_string(),
            content: truncate_bytes(content, MAX_CONTENT_LEN).to_string(),
        });
    }

    /// Most recently put content for `url`.
    pub fn get(&self, url: &str) -> Option<&str> {
        let key = truncate_bytes(url, MAX_URL_LEN);
        self.buckets[hash(key)]
            .iter()
            .rev()
            .find(|e| e.url == key)
            .map(|e| e.content.as_str())
    }

    /// Number of entries chained in bucket `index`.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.buckets.get(index).map_or(0, Vec::len)
    }

    /// Total entries, shadowed duplicates included.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}
