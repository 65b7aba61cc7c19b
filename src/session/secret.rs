//! Secret encoding
//!
//! NOT a password hash. Secrets are stored as standard base64 of their UTF-8
//! bytes, which anyone with the store can reverse. A real deployment needs a
//! salted KDF here instead.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode a plaintext secret into its stored form
pub fn hash_secret(plaintext: &str) -> String {
    STANDARD.encode(plaintext.as_bytes())
}

/// True when `plaintext` encodes to `stored`
pub fn verify_secret(plaintext: &str, stored: &str) -> bool {
    hash_secret(plaintext) == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_browser_encoding() {
        // btoa(unescape(encodeURIComponent(p))) in the web build
        assert_eq!(hash_secret("Abcd123!"), "QWJjZDEyMyE=");
        assert_eq!(hash_secret("pässword"), "cMOkc3N3b3Jk");
        assert_eq!(hash_secret(""), "");
    }

    #[test]
    fn test_verify_own_encoding() {
        for secret in ["Abcd123!", "", " spaced out ", "日本語のパスワード", "a@$!%*#?&"] {
            assert!(verify_secret(secret, &hash_secret(secret)), "{secret:?}");
        }
    }

    #[test]
    fn test_verify_rejects_other_secrets() {
        let stored = hash_secret("Abcd123!");

        assert!(!verify_secret("abcd123!", &stored));
        assert!(!verify_secret("Abcd123! ", &stored));
        assert!(!verify_secret("", &stored));
        assert!(!verify_secret("QWJjZDEyMyE=", &stored));
    }
}
