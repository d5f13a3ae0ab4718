use crate::security::errors::AuthError;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use tokio::task;

/// Argon2id hashing, used identically for registration and login so the two
/// paths can never drift apart. Hashing runs on the blocking pool.
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        PasswordService
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();

        task::spawn_blocking(move || {
            let argon2 = Argon2::default();
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|_| AuthError::HashingError)
        })
        .await
        .map_err(|_| AuthError::HashingError)?
    }

    /// Ok(false) on a plain mismatch; errors are reserved for malformed
    /// stored hashes and runtime failures.
    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_string();
        let hash = hash.to_string();

        task::spawn_blocking(move || {
            let parsed_hash = argon2::password_hash::PasswordHash::new(&hash)
                .map_err(|_| AuthError::VerificationError)?;

            match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(_) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(_) => Err(AuthError::VerificationError),
            }
        })
        .await
        .map_err(|_| AuthError::VerificationError)?
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}
