//! Argon2id password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password into PHC string format with a fresh salt.
pub fn hash(plaintext: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plaintext.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// An unparseable hash counts as a mismatch rather than an error; the
/// caller only ever needs yes/no.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hashed = hash("correct horse").unwrap();
        assert!(verify("correct horse", &hashed));
        assert!(!verify("battery staple", &hashed));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash("same input").unwrap();
        let b = hash("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify("anything", "not-a-phc-string"));
    }
}
