use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify_accepts_the_same_password() {
        let hashed = hash_password("s3cret-pass", TEST_COST).unwrap();
        assert_ne!(hashed, "s3cret-pass");
        assert!(verify_password("s3cret-pass", &hashed).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hashed = hash_password("s3cret-pass", TEST_COST).unwrap();
        assert!(!verify_password("other", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("repeat", TEST_COST).unwrap();
        let b = hash_password("repeat", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
