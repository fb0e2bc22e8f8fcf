use crate::{
    server::{Result, ServerError, ServerRouter, auth::AuthenticatedOwner, json::Json},
    service::posts::PostService,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use pinnwand_common::model::post::Post;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_post(create_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/create", rejection(ServerError))]
struct CreatePostPath();

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostBody {
    post_body: String,
}

async fn create_post(
    CreatePostPath(): CreatePostPath,
    State(posts): State<Arc<PostService>>,
    owner: AuthenticatedOwner,
    Json(request): Json<CreatePostBody>,
) -> Result<Json<Post>> {
    let owner = owner.into_owner();
    let post = posts.create_post(&owner, request.post_body).await?;

    Ok(Json(post))
}

#[cfg(test)]
mod tests {
    use crate::{
        server::{
            self, ServerState,
            auth::{AuthError, TokenVerifier},
        },
        service::posts::PostService,
    };
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use bson::oid::ObjectId;
    use pinnwand_common::model::{
        Id,
        post::{CommentMarker, CreatePost, CreatePostComment, PostMarker},
        user::{PostOwner, UserMarker},
    };
    use pinnwand_db::{
        record::{CommentRecord, LikeRecord, OwnerRecord, PostRecord},
        store::{PostStore, Result as StoreResult, StoreError},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    const POST_OID: &str = "64f1b5c2a9d4e6f701234567";
    const USER_OID: &str = "64f1b5c2a9d4e6f789abcdef";

    enum VerifyOutcome {
        Owner,
        Expired,
        Invalid,
        UserNotFound,
    }

    struct StubVerifier(VerifyOutcome);

    #[async_trait]
    impl TokenVerifier for StubVerifier {
        async fn verify(&self, _token: &str) -> Result<PostOwner, AuthError> {
            match self.0 {
                VerifyOutcome::Owner => Ok(owner()),
                VerifyOutcome::Expired => Err(AuthError::Expired),
                VerifyOutcome::Invalid => Err(AuthError::Invalid(
                    jsonwebtoken::errors::ErrorKind::InvalidToken.into(),
                )),
                VerifyOutcome::UserNotFound => Err(AuthError::UserNotFound(USER_OID.into())),
            }
        }
    }

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    enum StoreOutcome {
        Created,
        Null,
        Fail,
    }

    struct StubStore(StoreOutcome);

    fn stub_error() -> StoreError {
        StoreError::InvalidId(ObjectId::parse_str("definitely-not-an-id").unwrap_err())
    }

    #[async_trait]
    impl PostStore for StubStore {
        async fn create_post(&self, post: &CreatePost) -> StoreResult<Option<PostRecord>> {
            match self.0 {
                StoreOutcome::Created => Ok(Some(
                    PostRecord::new(post, bson::DateTime::now()).unwrap(),
                )),
                StoreOutcome::Null => Ok(None),
                StoreOutcome::Fail => Err(stub_error()),
            }
        }

        async fn get_all(&self) -> StoreResult<Vec<PostRecord>> {
            Ok(Vec::new())
        }

        async fn get_comment(
            &self,
            _post_id: &Id<PostMarker>,
            _comment_id: &Id<CommentMarker>,
        ) -> StoreResult<Option<CommentRecord>> {
            Ok(None)
        }

        async fn create_post_comment(
            &self,
            _post_id: &Id<PostMarker>,
            _comment: &CreatePostComment,
        ) -> StoreResult<Option<PostRecord>> {
            Ok(None)
        }

        async fn get_post_like_by_owner_id(
            &self,
            _post_id: &Id<PostMarker>,
            _owner_id: &Id<UserMarker>,
        ) -> StoreResult<Option<LikeRecord>> {
            Ok(None)
        }

        async fn create_post_like(
            &self,
            _post_id: &Id<PostMarker>,
            _owner: &PostOwner,
        ) -> StoreResult<Option<PostRecord>> {
            Ok(None)
        }

        async fn delete_post_like(
            &self,
            _post_id: &Id<PostMarker>,
            _owner_id: &Id<UserMarker>,
        ) -> StoreResult<Option<PostRecord>> {
            Ok(None)
        }
    }

    fn owner() -> PostOwner {
        PostOwner {
            id: USER_OID.into(),
            name: "Jane".to_owned(),
            surname: "Doe".to_owned(),
            avatar: "https://cdn.example/jane.png".to_owned(),
        }
    }

    fn app(verify: VerifyOutcome, store: StoreOutcome) -> Router {
        let state = ServerState {
            posts: Arc::new(PostService::new(Arc::new(StubStore(store)))),
            verifier: Arc::new(StubVerifier(verify)),
        };

        server::routes().with_state(state)
    }

    fn create_post_request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/posts/create")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }

        builder
            .body(Body::from(r#"{"postBody":"my new post"}"#))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn created_post_is_returned_in_domain_shape() {
        let response = app(VerifyOutcome::Owner, StoreOutcome::Created)
            .oneshot(create_post_request(Some("Bearer some-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        let post = body.as_object().unwrap();

        assert_eq!(post.len(), 7);
        for field in ["id", "body", "owner", "comments", "likes", "createdAt", "updatedAt"] {
            assert!(post.contains_key(field), "missing field {field}");
        }

        assert_eq!(post["body"], "my new post");
        assert_eq!(post["comments"].as_array().unwrap().len(), 0);
        assert_eq!(post["likes"].as_array().unwrap().len(), 0);
        assert_eq!(post["owner"]["id"], USER_OID);
        assert_eq!(post["owner"]["name"], "Jane");
        assert_eq!(post["owner"]["surname"], "Doe");
        assert_eq!(post["owner"]["avatar"], "https://cdn.example/jane.png");
    }

    #[tokio::test]
    async fn missing_token_is_forbidden() {
        let response = app(VerifyOutcome::Owner, StoreOutcome::Created)
            .oneshot(create_post_request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_string(response).await, "Required token was not provided");
    }

    #[tokio::test]
    async fn empty_token_is_forbidden() {
        let response = app(VerifyOutcome::Owner, StoreOutcome::Created)
            .oneshot(create_post_request(Some("Bearer ")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_string(response).await, "Required token was not provided");
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let response = app(VerifyOutcome::Expired, StoreOutcome::Created)
            .oneshot(create_post_request(Some("Bearer some-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "Token expired");
    }

    #[tokio::test]
    async fn malformed_token_is_unauthorized() {
        let response = app(VerifyOutcome::Invalid, StoreOutcome::Created)
            .oneshot(create_post_request(Some("Bearer not-a-jwt")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "Invalid token");
    }

    #[tokio::test]
    async fn unknown_user_is_a_bad_request() {
        let response = app(VerifyOutcome::UserNotFound, StoreOutcome::Created)
            .oneshot(create_post_request(Some("Bearer some-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "User does not exist");
    }

    #[tokio::test]
    async fn null_creation_result_is_an_internal_error() {
        let response = app(VerifyOutcome::Owner, StoreOutcome::Null)
            .oneshot(create_post_request(Some("Bearer some-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn store_failure_is_an_internal_error_without_detail() {
        let response = app(VerifyOutcome::Owner, StoreOutcome::Fail)
            .oneshot(create_post_request(Some("Bearer some-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app(VerifyOutcome::Owner, StoreOutcome::Created)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
