use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use service_core::error::AppError;

/// Hash a password with Argon2id; the generated salt is embedded in the hash.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to hash password: {}", e)))?
        .to_string();
    Ok(hash)
}

/// Constant-time verification of a password against a stored hash.
/// A malformed stored hash verifies as false rather than erroring.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("s0lar-p0wer").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s0lar-p0wer", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("s0lar-p0wer").unwrap();
        assert!(!verify_password("wind-p0wer", &hash));
    }

    #[test]
    fn malformed_hash_fails_quietly() {
        assert!(!verify_password("anything", "not-a-hash"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("s0lar-p0wer").unwrap();
        let second = hash_password("s0lar-p0wer").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("s0lar-p0wer", &second));
    }
}
