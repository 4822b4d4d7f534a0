//! Share token minting and one-way digesting.
//!
//! Raw tokens are 256 bits of CSPRNG output, URL-safe base64 encoded. Only
//! the SHA-256 hex digest is ever persisted or logged; the raw token exists
//! exactly once, in the create/rotate response to the owner.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Raw token entropy in bytes.
const TOKEN_BYTES: usize = 32;

/// Mints opaque share tokens and computes their storage digests.
#[derive(Debug, Clone, Default)]
pub struct TokenCodec;

impl TokenCodec {
    /// Create a new token codec.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh raw token and its digest.
    pub fn mint(&self) -> (String, String) {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        let raw = URL_SAFE_NO_PAD.encode(bytes);
        let digest = self.digest(&raw);
        (raw, digest)
    }

    /// Compute the storage digest of a raw token.
    ///
    /// Deterministic: the same function is used at mint time and at
    /// redemption time, so a presented token is looked up without ever
    /// storing it.
    pub fn digest(&self, raw_token: &str) -> String {
        hex::encode(Sha256::digest(raw_token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let codec = TokenCodec::new();
        let (raw, digest) = codec.mint();
        assert_eq!(digest, codec.digest(&raw));
        assert_eq!(codec.digest(&raw), codec.digest(&raw));
    }

    #[test]
    fn digest_is_hex_sha256() {
        let codec = TokenCodec::new();
        assert_eq!(codec.digest("x").len(), 64);
        assert!(codec.digest("x").chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn minted_tokens_are_unique_and_url_safe() {
        let codec = TokenCodec::new();
        let (a, _) = codec.mint();
        let (b, _) = codec.mint();
        assert_ne!(a, b);
        // 32 bytes base64 without padding
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn different_tokens_produce_different_digests() {
        let codec = TokenCodec::new();
        assert_ne!(codec.digest("a"), codec.digest("b"));
    }
}
