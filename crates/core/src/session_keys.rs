//! Browser session key generation and hashing.
//!
//! The plaintext key only ever travels in the session cookie; the database
//! stores its SHA-256 digest so a leaked table cannot be replayed.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated session key (alphanumeric characters).
pub const SESSION_KEY_LENGTH: usize = 32;

/// A freshly generated session key and its storage digest.
pub struct GeneratedSessionKey {
    /// Sent to the client exactly once, never stored.
    pub plaintext: String,
    /// SHA-256 hex digest persisted in `sessions.key_hash`.
    pub hash: String,
}

/// Generate a new random session key.
pub fn generate_session_key() -> GeneratedSessionKey {
    let key: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SESSION_KEY_LENGTH)
        .map(char::from)
        .collect();

    let hash = hash_session_key(&key);
    GeneratedSessionKey {
        plaintext: key,
        hash,
    }
}

/// Compute the SHA-256 hex digest of a session key.
pub fn hash_session_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_is_alphanumeric_of_expected_length() {
        let key = generate_session_key();
        assert_eq!(key.plaintext.len(), SESSION_KEY_LENGTH);
        assert!(key.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn hash_is_stable_sha256_hex() {
        let key = generate_session_key();
        assert_eq!(key.hash, hash_session_key(&key.plaintext));
        assert_eq!(key.hash.len(), 64);
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(generate_session_key().plaintext, generate_session_key().plaintext);
    }
}
