use crate::data::models::user::{NewUser, User};
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::auth::PasswordService;
use crate::services::errors::UserServiceError;

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService
    }

    /// Registers a new account. The plaintext password never reaches the
    /// store; only its argon2 hash does.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, UserServiceError> {
        let repo = UserRepo::new();

        if repo
            .get_by_email(email)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .is_some()
        {
            return Err(UserServiceError::EmailAlreadyRegistered);
        }

        let hashed = PasswordService::new()
            .hash_password(password)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?;

        let new_user = NewUser {
            email,
            password_hash: &hashed,
            first_name,
            last_name,
        };

        repo.add(new_user)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?;

        repo.get_by_email(email)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .ok_or(UserServiceError::DatabaseError)
    }

    /// Unknown email and wrong password both fail with the same
    /// InvalidCredentials, so callers cannot probe which emails exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, UserServiceError> {
        let repo = UserRepo::new();

        let user = repo
            .get_by_email(email)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .ok_or(UserServiceError::InvalidCredentials)?;

        let valid = PasswordService::new()
            .verify_password(password, &user.password_hash)
            .await
            .map_err(|_| UserServiceError::InvalidCredentials)?;

        if !valid {
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(user)
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
