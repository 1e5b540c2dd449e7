//! bcrypt-backed password hashing.

use crate::auth::traits::PasswordHasher;
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes passwords with bcrypt on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify(password, &hash))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Verification task failed: {}", e)))?
            .map_err(|e| {
                ServiceError::internal_error(format!("Password verification failed: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = BcryptHasher::new(4);
        let hashed = hasher.hash("P@ss1").await.unwrap();

        assert_ne!(hashed, "P@ss1");
        assert!(hasher.verify("P@ss1", &hashed).await.unwrap());
        assert!(!hasher.verify("wrong", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash_is_an_error() {
        let hasher = BcryptHasher::new(4);
        assert!(hasher.verify("P@ss1", "not-a-bcrypt-hash").await.is_err());
    }
}
