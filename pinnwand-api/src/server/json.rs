use crate::server::ServerError;
use axum::{
    Json as AxumJson,
    extract::FromRequest,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON wrapper for the posts API.
///
/// Extraction delegates to [`axum::Json`] but funnels malformed bodies into
/// [`ServerError`], so they render with the same fixed plain-text bodies as
/// every other failure. Responses serialize eagerly; a post that cannot be
/// serialized surfaces as a [`ServerError`] too instead of a bare 500.
#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(AxumJson), rejection(ServerError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self.0) {
            Ok(body) => body,
            Err(err) => return ServerError::JsonResponse(err).into_response(),
        };

        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use crate::server::json::Json;
    use axum::{body::to_bytes, http::header, response::IntoResponse};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload {
        message: &'static str,
    }

    #[tokio::test]
    async fn response_is_json_with_content_type() {
        let response = Json(Payload { message: "hi" }).into_response();

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), br#"{"message":"hi"}"#);
    }
}
