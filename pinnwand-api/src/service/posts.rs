use pinnwand_common::model::{
    Id,
    post::{CommentMarker, CreatePost, CreatePostComment, Post, PostComment, PostLike, PostMarker},
    user::{PostOwner, UserMarker},
};
use pinnwand_db::store::{PostStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

pub type Result<T, E = PostServiceError> = std::result::Result<T, E>;

/// One variant per operation and failure shape (unexpected null result, or a
/// store failure wrapped with operation context).
///
/// The rendered texts are stable API: consumers match on them byte for byte,
/// including the historical "commment" and "retereaving" spellings and the
/// like-retrieval message that reads "post comment".
#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error(
        "Error creating post for user '{owner_id}'. Post creation process initiated but completed with NULL result"
    )]
    CreatingPostNull { owner_id: Id<UserMarker> },
    #[error("Error creating post for user '{owner_id}'. {source}")]
    CreatingPost {
        owner_id: Id<UserMarker>,
        source: StoreError,
    },
    #[error(
        "Error creating post '{post_id}' commment by user '{owner_id}'. Post comment insertion process initiated but completed with NULL result"
    )]
    CreatingPostCommentNull {
        post_id: Id<PostMarker>,
        owner_id: Id<UserMarker>,
    },
    #[error("Error creating post '{post_id}' commment by user '{owner_id}'. {source}")]
    CreatingPostComment {
        post_id: Id<PostMarker>,
        owner_id: Id<UserMarker>,
        source: StoreError,
    },
    #[error("Error retereaving post comment. {source}")]
    GettingPostLike { source: StoreError },
    #[error("Error retereaving posts. {source}")]
    GettingPosts { source: StoreError },
    #[error("Error retereaving post comment. {source}")]
    GettingPostComment { source: StoreError },
    #[error(
        "Error creating post '{post_id}' like by user '{owner_id}'. Post like insertion process initiated but completed with NULL result"
    )]
    CreatingPostLikeNull {
        post_id: Id<PostMarker>,
        owner_id: Id<UserMarker>,
    },
    #[error("Error creating post '{post_id}' like by user '{owner_id}'. {source}")]
    CreatingPostLike {
        post_id: Id<PostMarker>,
        owner_id: Id<UserMarker>,
        source: StoreError,
    },
    #[error(
        "Error deleting post '{post_id}' like by user '{owner_id}'. Post like deletion process initiated but completed with NULL result"
    )]
    DeletingPostLikeNull {
        post_id: Id<PostMarker>,
        owner_id: Id<UserMarker>,
    },
    #[error("Error deleting post '{post_id}' like by user '{owner_id}'. {source}")]
    DeletingPostLike {
        post_id: Id<PostMarker>,
        owner_id: Id<UserMarker>,
        source: StoreError,
    },
}

/// One business operation per method. This is the single place where adapter
/// failures become typed domain errors and persistence records become domain
/// shapes; the store itself only knows `None` and `StoreError`.
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn create_post(&self, owner: &PostOwner, body: String) -> Result<Post> {
        let create = CreatePost {
            body,
            owner: owner.clone(),
        };

        let record = self
            .store
            .create_post(&create)
            .await
            .map_err(|source| PostServiceError::CreatingPost {
                owner_id: owner.id.clone(),
                source,
            })?
            .ok_or_else(|| PostServiceError::CreatingPostNull {
                owner_id: owner.id.clone(),
            })?;

        Ok(record.into())
    }

    pub async fn create_post_comment(
        &self,
        post_id: &Id<PostMarker>,
        body: String,
        owner: &PostOwner,
    ) -> Result<Post> {
        let comment = CreatePostComment {
            body,
            owner: owner.clone(),
        };

        let record = self
            .store
            .create_post_comment(post_id, &comment)
            .await
            .map_err(|source| PostServiceError::CreatingPostComment {
                post_id: post_id.clone(),
                owner_id: owner.id.clone(),
                source,
            })?
            .ok_or_else(|| PostServiceError::CreatingPostCommentNull {
                post_id: post_id.clone(),
                owner_id: owner.id.clone(),
            })?;

        Ok(record.into())
    }

    /// Absence of the post, or of a like from this owner, is a normal
    /// outcome and comes back as `Ok(None)`.
    pub async fn get_post_like_by_owner_id(
        &self,
        post_id: &Id<PostMarker>,
        owner_id: &Id<UserMarker>,
    ) -> Result<Option<PostLike>> {
        let like = self
            .store
            .get_post_like_by_owner_id(post_id, owner_id)
            .await
            .map_err(|source| PostServiceError::GettingPostLike { source })?;

        Ok(like.map(Into::into))
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let records = self
            .store
            .get_all()
            .await
            .map_err(|source| PostServiceError::GettingPosts { source })?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn get_post_comment(
        &self,
        post_id: &Id<PostMarker>,
        comment_id: &Id<CommentMarker>,
    ) -> Result<Option<PostComment>> {
        let comment = self
            .store
            .get_comment(post_id, comment_id)
            .await
            .map_err(|source| PostServiceError::GettingPostComment { source })?;

        Ok(comment.map(Into::into))
    }

    pub async fn create_post_like(
        &self,
        post_id: &Id<PostMarker>,
        owner: &PostOwner,
    ) -> Result<Post> {
        let record = self
            .store
            .create_post_like(post_id, owner)
            .await
            .map_err(|source| PostServiceError::CreatingPostLike {
                post_id: post_id.clone(),
                owner_id: owner.id.clone(),
                source,
            })?
            .ok_or_else(|| PostServiceError::CreatingPostLikeNull {
                post_id: post_id.clone(),
                owner_id: owner.id.clone(),
            })?;

        Ok(record.into())
    }

    pub async fn delete_post_like(
        &self,
        post_id: &Id<PostMarker>,
        owner_id: &Id<UserMarker>,
    ) -> Result<Post> {
        let record = self
            .store
            .delete_post_like(post_id, owner_id)
            .await
            .map_err(|source| PostServiceError::DeletingPostLike {
                post_id: post_id.clone(),
                owner_id: owner_id.clone(),
                source,
            })?
            .ok_or_else(|| PostServiceError::DeletingPostLikeNull {
                post_id: post_id.clone(),
                owner_id: owner_id.clone(),
            })?;

        Ok(record.into())
    }
}
