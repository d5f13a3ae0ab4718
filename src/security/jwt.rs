use crate::api::config::Config;
use crate::security::errors::AuthError;
use serde::{Deserialize, Serialize};

pub struct JwtService;

impl JwtService {
    pub fn new() -> Self {
        JwtService
    }

    pub fn generate_token(&self, user_id: i32) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;
        let config = Config::default();

        let claims = AccessClaims {
            sub: user_id as usize,
            iat: curr_time,
            exp: curr_time + (config.jwt_expiration_minutes * 60) as usize,
        };

        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .map_err(|_| AuthError::TokenCreationError)
    }

    pub fn decode_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, AuthError> {
        let validation = jsonwebtoken::Validation::default();

        let token_data = jsonwebtoken::decode::<T>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(Config::default().jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: usize,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl AccessClaims {
    pub fn user_id(&self) -> i32 {
        self.sub as i32
    }
}
