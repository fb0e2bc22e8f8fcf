use crate::server::ServerError;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use pinnwand_common::model::{
    Id,
    user::{PostOwner, UserMarker},
};
use pinnwand_db::store::{StoreError, UserStore};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

type AuthorizationHeader = TypedHeader<Authorization<Bearer>>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Required token was not provided")]
    MissingToken,
    #[error("Token expired")]
    Expired,
    #[error("Token could not be verified: {0}")]
    Invalid(jsonwebtoken::errors::Error),
    #[error("User '{0}' does not exist")]
    UserNotFound(Id<UserMarker>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken => StatusCode::FORBIDDEN,
            AuthError::Expired | AuthError::Invalid(_) => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound(_) => StatusCode::BAD_REQUEST,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Required token was not provided",
            AuthError::Expired => "Token expired",
            AuthError::Invalid(_) => "Invalid token",
            AuthError::UserNotFound(_) => "User does not exist",
            AuthError::Store(_) => "Internal Server Error",
        }
    }
}

/// Classifies a bearer token into expired, invalid, valid-but-unknown-user,
/// or valid with the resolved owner snapshot. A missing token never reaches
/// the verifier; the extractor below rejects it first.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<PostOwner, AuthError>;
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct AuthenticatedOwner(PostOwner);

impl AuthenticatedOwner {
    #[must_use]
    pub fn into_owner(self) -> PostOwner {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthenticatedOwner
where
    Arc<dyn TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = AuthorizationHeader::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let token = header.token();
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        let owner = Arc::<dyn TokenVerifier>::from_ref(state)
            .verify(token)
            .await?;

        Ok(Self(owner))
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Production verifier: HS256 JWT carrying the user id in `sub`, resolved to
/// an owner snapshot through the user store.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    users: Arc<dyn UserStore>,
}

impl JwtVerifier {
    #[must_use]
    pub fn new(secret: &[u8], users: Arc<dyn UserStore>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            users,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<PostOwner, AuthError> {
        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(err),
            })?;

        let user_id = Id::from(token_data.claims.sub);
        let user = self.users.fetch_user(&user_id).await?;

        user.map(PostOwner::from)
            .ok_or(AuthError::UserNotFound(user_id))
    }
}
