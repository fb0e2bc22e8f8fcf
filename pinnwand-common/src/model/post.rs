use crate::model::{
    Id,
    user::{PostOwner, UserMarker},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub body: String,
    pub owner: PostOwner,
    pub comments: Vec<PostComment>,
    pub likes: Vec<PostLike>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub id: Id<CommentMarker>,
    pub body: String,
    pub owner: PostOwner,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A like's id is the liking user's id, so a post holds at most one like per
/// user.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLike {
    pub id: Id<UserMarker>,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CreatePost {
    pub body: String,
    pub owner: PostOwner,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CreatePostComment {
    pub body: String,
    pub owner: PostOwner,
}
