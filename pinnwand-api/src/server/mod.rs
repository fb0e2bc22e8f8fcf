use crate::service::posts::{PostService, PostServiceError};
use auth::{AuthError, TokenVerifier};
use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

pub mod auth;
mod json;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub posts: Arc<PostService>,
    pub verifier: Arc<dyn TokenVerifier>,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Service(#[from] PostServiceError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ServerError::PathRejection(_) | ServerError::JsonRejection(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Auth(auth) => auth.status(),
            ServerError::JsonResponse(_) | ServerError::Service(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body sent to the client. Fixed per failure class: the detailed error
    /// text goes to the log, never over the wire.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServerError::UnknownRoute(_) => "Not Found",
            ServerError::PathRejection(_) | ServerError::JsonRejection(_) => "Bad Request",
            ServerError::Auth(auth) => auth.public_message(),
            ServerError::JsonResponse(_) | ServerError::Service(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        (status, self.public_message()).into_response()
    }
}
