//! In-memory cache of synthesized audio
//!
//! The games repeat a small vocabulary (29 letter names and sounds, a few
//! dozen words), so the same Piper output is requested over and over.

use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone)]
struct CachedAudio {
    audio: Bytes,
    timestamp: chrono::DateTime<chrono::Utc>,
}

pub struct AudioCache {
    entries: RwLock<HashMap<String, CachedAudio>>,
    max_entries: usize,
}

impl AudioCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn get(&self, text: &str) -> Option<Bytes> {
        let key = cache_key(text);
        self.entries.read().get(&key).map(|cached| cached.audio.clone())
    }

    pub fn insert(&self, text: &str, audio: Bytes) {
        if self.max_entries == 0 {
            return;
        }

        let key = cache_key(text);
        let mut entries = self.entries.write();
        entries.insert(
            key,
            CachedAudio {
                audio,
                timestamp: chrono::Utc::now(),
            },
        );

        while entries.len() > self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.timestamp)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    entries.remove(&key);
                    debug!("Evicted cached audio");
                }
                None => break,
            }
        }
    }
}

fn cache_key(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_and_miss() {
        let cache = AudioCache::new(4);
        assert!(cache.get("aaa").is_none());
        cache.insert("aaa", Bytes::from_static(b"pcm"));
        assert_eq!(cache.get("aaa").unwrap(), Bytes::from_static(b"pcm"));
        assert!(cache.get("bbb").is_none());
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let cache = AudioCache::new(2);
        cache.insert("one", Bytes::from_static(b"1"));
        std::thread::sleep(std::time::Duration::from_millis(2));
        cache.insert("two", Bytes::from_static(b"2"));
        std::thread::sleep(std::time::Duration::from_millis(2));
        cache.insert("three", Bytes::from_static(b"3"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("one").is_none());
        assert!(cache.get("three").is_some());
    }

    #[test]
    fn test_zero_capacity_caches_nothing() {
        let cache = AudioCache::new(0);
        cache.insert("aaa", Bytes::from_static(b"pcm"));
        assert!(cache.is_empty());
    }
}
