//! One-way salted password hashing.
//!
//! Hashes are Argon2id PHC strings with a per-password random salt. The plain
//! text is never stored or logged.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Raised when the hasher itself fails (not when a password is wrong).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Argon2 PHC string as persisted in `users.password_hash`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plain-text password with a fresh random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })
    }

    /// Wrap a PHC string read back from storage.
    #[must_use]
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Check a candidate password against this digest.
    ///
    /// A malformed stored hash never verifies.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Digest checked when a login names no account, so both outcomes pay
    /// for one Argon2 verification.
    ///
    /// `None` only if the hasher failed on first use.
    #[must_use]
    pub fn decoy() -> Option<&'static Self> {
        static DECOY: OnceLock<Option<PasswordDigest>> = OnceLock::new();
        DECOY
            .get_or_init(|| Self::hash("feedeyes-decoy-password").ok())
            .as_ref()
    }

    /// PHC string for persistence.
    #[must_use]
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn verifies_the_original_password_only() {
        let digest = PasswordDigest::hash("pw1").expect("hash");
        assert!(digest.verify("pw1"));
        assert!(!digest.verify("pw2"));
        assert!(!digest.verify(""));
    }

    #[rstest]
    fn salts_each_hash() {
        let first = PasswordDigest::hash("same").expect("hash");
        let second = PasswordDigest::hash("same").expect("hash");
        assert_ne!(first.as_phc(), second.as_phc());
        assert!(first.as_phc().starts_with("$argon2id$"));
    }

    #[rstest]
    fn malformed_stored_hash_never_verifies() {
        assert!(!PasswordDigest::from_phc("not-a-phc-string").verify("anything"));
    }

    #[rstest]
    fn decoy_is_a_real_digest_that_rejects_candidates() {
        let decoy = PasswordDigest::decoy().expect("decoy digest");
        assert!(decoy.as_phc().starts_with("$argon2id$"));
        assert!(!decoy.verify("pw1"));
        assert!(!decoy.verify(""));
        assert!(std::ptr::eq(
            decoy,
            PasswordDigest::decoy().expect("decoy digest")
        ));
    }

    #[rstest]
    fn debug_output_hides_the_hash() {
        let digest = PasswordDigest::hash("secret").expect("hash");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(<redacted>)");
    }
}
