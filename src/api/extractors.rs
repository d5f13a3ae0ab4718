use crate::api::errors::APIErrors;
use crate::security::jwt::{AccessClaims, JwtService};
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

impl FromRequestParts<()> for AccessClaims {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                tracing::debug!("Invalid authorization header");
                APIErrors::Unauthorized
            })?;

        JwtService::new()
            .decode_token::<AccessClaims>(bearer.token())
            .map_err(|e| {
                tracing::debug!("Token decoding error: {:?}", e);
                APIErrors::Unauthorized
            })
    }
}
