use crate::api::errors::APIErrors;
use crate::security::identity::Identity;
use crate::security::jwt::{AccessClaims, JwtService};
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

impl<S: Send + Sync> FromRequestParts<S> for AccessClaims {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        decode_token_from_request_parts(parts).await
    }
}

/// Handlers usually want the resolved identity rather than raw claims;
/// a token whose role no longer parses is treated as unauthorized.
impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims: AccessClaims = decode_token_from_request_parts(parts).await?;

        Identity::try_from(&claims).map_err(|e| {
            tracing::error!("token carried an unusable role: {}", e);
            APIErrors::Unauthorized
        })
    }
}

async fn decode_token_from_request_parts<T>(parts: &mut Parts) -> Result<T, APIErrors>
where
    T: for<'de> serde::Deserialize<'de> + Send + Sync,
{
    let tokenizer = JwtService::new();

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| {
            tracing::error!("Invalid authorization header");
            APIErrors::Unauthorized
        })?;

    let claims = tokenizer.decode_token::<T>(bearer.token()).map_err(|e| {
        tracing::error!("Token decoding error: {:?}", e);
        APIErrors::Unauthorized
    })?;

    Ok(claims)
}
