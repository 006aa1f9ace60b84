//! Conversation identity persisted in client storage

use sha2::{Digest, Sha256};

use crate::domain::models::ChatSession;
use crate::shared::errors::StorageError;
use crate::shared::logging;

const FALLBACK_PREFIX: &str = "fallback-thread-id-";

/// String key/value storage that survives reloads (localStorage in the browser)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reuse the stored identifier, or create and persist one.
///
/// A failed write keeps the identifier for the current page only.
pub fn load_or_create_session<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> ChatSession {
    if let Some(thread_id) = store.get(key).filter(|v| !v.trim().is_empty()) {
        return ChatSession { thread_id };
    }

    let (thread_id, fallback) = generate_thread_id();
    logging::log_thread_id_created(&thread_id, fallback);
    if let Err(e) = store.set(key, &thread_id) {
        logging::log_thread_id_persist_error(&e.to_string());
    }
    ChatSession { thread_id }
}

/// Random UUID v4; the flag is `true` when the fallback format was used
pub fn generate_thread_id() -> (String, bool) {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => (uuid::Builder::from_random_bytes(bytes).into_uuid().to_string(), false),
        Err(e) => {
            tracing::debug!("getrandom failed: {}", e);
            let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
            (fallback_thread_id(millis, &fallback_seed(millis)), true)
        }
    }
}

/// Entropy for the fallback suffix when the OS source is unavailable
#[cfg(target_arch = "wasm32")]
fn fallback_seed(millis: u64) -> String {
    format!("{}{}", js_sys::Math::random(), millis)
}

#[cfg(not(target_arch = "wasm32"))]
fn fallback_seed(millis: u64) -> String {
    use std::hash::BuildHasher;

    let random = std::collections::hash_map::RandomState::new().hash_one(millis);
    format!("{}{}", random, millis)
}

/// `fallback-thread-id-<millis><base36 suffix>`
pub fn fallback_thread_id(millis: u64, seed: &str) -> String {
    let digest = Sha256::digest(seed.as_bytes());
    let mut n = u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ]);

    let mut suffix = String::new();
    for _ in 0..9 {
        let d = (n % 36) as u32;
        suffix.push(char::from_digit(d, 36).unwrap_or('0'));
        n /= 36;
    }
    format!("{}{}{}", FALLBACK_PREFIX, millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_thread_id_generated_once_and_reused() {
        let store = MemoryStore::default();
        let first = load_or_create_session(&store, "chatThreadId");
        let second = load_or_create_session(&store, "chatThreadId");

        assert_eq!(first, second);
        assert_eq!(store.get("chatThreadId"), Some(first.thread_id.clone()));
    }

    #[test]
    fn test_existing_thread_id_is_kept() {
        let store = MemoryStore::default();
        store.set("chatThreadId", "hilo-existente").unwrap();
        let session = load_or_create_session(&store, "chatThreadId");
        assert_eq!(session.thread_id, "hilo-existente");
    }

    #[test]
    fn test_generated_id_is_uuid_v4() {
        let (id, fallback) = generate_thread_id();
        assert!(!fallback);
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_persist_failure_still_yields_session() {
        let session = load_or_create_session(&ReadOnlyStore, "chatThreadId");
        assert!(!session.thread_id.is_empty());
    }

    #[test]
    fn test_fallback_format() {
        let id = fallback_thread_id(1_700_000_000_000, "seed");
        assert!(id.starts_with("fallback-thread-id-1700000000000"));
        let suffix = &id["fallback-thread-id-1700000000000".len()..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(id, fallback_thread_id(1_700_000_000_000, "seed"));
    }

    #[test]
    fn test_fallback_suffix_varies_within_same_millisecond() {
        let millis = 1_700_000_000_000;
        let a = fallback_seed(millis);
        let b = fallback_seed(millis);
        assert_ne!(a, b);
        assert_ne!(fallback_thread_id(millis, &a), fallback_thread_id(millis, &b));
    }
}
