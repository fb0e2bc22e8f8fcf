use crate::record::{CommentRecord, LikeRecord, PostRecord, UserRecord};
use async_trait::async_trait;
use pinnwand_common::model::{
    Id,
    post::{CommentMarker, CreatePost, CreatePostComment, PostMarker},
    user::{PostOwner, UserMarker},
};
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid document id: {0}")]
    InvalidId(#[from] bson::oid::Error),
    #[error("Could not serialize document: {0}")]
    Serialize(#[from] bson::ser::Error),
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Document-store operations on the posts collection.
///
/// Read-by-id operations return `None` when the parent document or the
/// nested item is absent; errors are reserved for store-level failures
/// (connectivity, id or document validation). Implementations never produce
/// domain error types.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persists a new post with empty comment and like arrays and equal
    /// creation/update stamps.
    async fn create_post(&self, post: &CreatePost) -> Result<Option<PostRecord>>;

    /// Every persisted post, store-native shape, unfiltered and unpaginated.
    async fn get_all(&self) -> Result<Vec<PostRecord>>;

    async fn get_comment(
        &self,
        post_id: &Id<PostMarker>,
        comment_id: &Id<CommentMarker>,
    ) -> Result<Option<CommentRecord>>;

    /// Appends a comment to the post's array field and returns the updated
    /// post, or `None` when the post does not exist.
    async fn create_post_comment(
        &self,
        post_id: &Id<PostMarker>,
        comment: &CreatePostComment,
    ) -> Result<Option<PostRecord>>;

    async fn get_post_like_by_owner_id(
        &self,
        post_id: &Id<PostMarker>,
        owner_id: &Id<UserMarker>,
    ) -> Result<Option<LikeRecord>>;

    /// Upserts the owner's like: an existing like from the same owner is
    /// replaced rather than duplicated.
    async fn create_post_like(
        &self,
        post_id: &Id<PostMarker>,
        owner: &PostOwner,
    ) -> Result<Option<PostRecord>>;

    async fn delete_post_like(
        &self,
        post_id: &Id<PostMarker>,
        owner_id: &Id<UserMarker>,
    ) -> Result<Option<PostRecord>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn fetch_user(&self, user_id: &Id<UserMarker>) -> Result<Option<UserRecord>>;
}
