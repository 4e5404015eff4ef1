use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::error::AppError;

/// Hash a plaintext password for storage. Plaintext never reaches the
/// database.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Check a plaintext candidate against a stored bcrypt hash. A malformed
/// hash counts as a failed match rather than an error surface.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hashed = hash_password("correct horse battery staple").unwrap();
        assert_ne!(hashed, "correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hashed));
    }

    #[test]
    fn test_wrong_password_fails_verification() {
        let hashed = hash_password("password1").unwrap();
        assert!(!verify_password("password2", &hashed));
    }

    #[test]
    fn test_garbage_hash_does_not_verify() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
