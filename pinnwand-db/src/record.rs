use bson::oid::ObjectId;
use pinnwand_common::model::{
    post::{CreatePost, CreatePostComment, Post, PostComment, PostLike},
    user::PostOwner,
};
use serde::{Deserialize, Serialize};

/// Store-native shape of a post document. The domain layer never sees these
/// types; every read path converts them through the `From` impls below.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub body: String,
    pub owner: OwnerRecord,
    pub comments: Vec<CommentRecord>,
    pub likes: Vec<LikeRecord>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Full owner snapshot embedded in a post: its own subdocument id plus the
/// id of the user it was copied from.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub name: String,
    pub surname: String,
    pub avatar: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub body: String,
    pub owner: CommentOwnerRecord,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Trimmed owner snapshot embedded in comments, keyed by the user's id.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentOwnerRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}

/// A like's `_id` is the liking user's id, so the array holds at most one
/// entry per user.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    pub avatar: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl PostRecord {
    pub fn new(post: &CreatePost, now: bson::DateTime) -> Result<Self, bson::oid::Error> {
        Ok(Self {
            id: ObjectId::new(),
            body: post.body.clone(),
            owner: OwnerRecord::new(&post.owner, now)?,
            comments: Vec::new(),
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl OwnerRecord {
    pub fn new(owner: &PostOwner, now: bson::DateTime) -> Result<Self, bson::oid::Error> {
        Ok(Self {
            id: ObjectId::new(),
            user_id: ObjectId::parse_str(owner.id.get())?,
            name: owner.name.clone(),
            surname: owner.surname.clone(),
            avatar: owner.avatar.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl CommentRecord {
    pub fn new(comment: &CreatePostComment, now: bson::DateTime) -> Result<Self, bson::oid::Error> {
        Ok(Self {
            id: ObjectId::new(),
            body: comment.body.clone(),
            owner: CommentOwnerRecord::new(&comment.owner)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl CommentOwnerRecord {
    pub fn new(owner: &PostOwner) -> Result<Self, bson::oid::Error> {
        Ok(Self {
            id: ObjectId::parse_str(owner.id.get())?,
            name: owner.name.clone(),
            surname: owner.surname.clone(),
            avatar: owner.avatar.clone(),
        })
    }
}

impl LikeRecord {
    pub fn new(owner: &PostOwner) -> Result<Self, bson::oid::Error> {
        Ok(Self {
            id: ObjectId::parse_str(owner.id.get())?,
            name: owner.name.clone(),
            surname: owner.surname.clone(),
            avatar: owner.avatar.clone(),
        })
    }
}

impl From<PostRecord> for Post {
    fn from(value: PostRecord) -> Self {
        Self {
            id: value.id.to_hex().into(),
            body: value.body,
            owner: value.owner.into(),
            comments: value.comments.into_iter().map(Into::into).collect(),
            likes: value.likes.into_iter().map(Into::into).collect(),
            created_at: value.created_at.to_time_0_3(),
            updated_at: value.updated_at.to_time_0_3(),
        }
    }
}

impl From<OwnerRecord> for PostOwner {
    fn from(value: OwnerRecord) -> Self {
        Self {
            id: value.user_id.to_hex().into(),
            name: value.name,
            surname: value.surname,
            avatar: value.avatar,
        }
    }
}

impl From<CommentRecord> for PostComment {
    fn from(value: CommentRecord) -> Self {
        Self {
            id: value.id.to_hex().into(),
            body: value.body,
            owner: value.owner.into(),
            created_at: value.created_at.to_time_0_3(),
            updated_at: value.updated_at.to_time_0_3(),
        }
    }
}

impl From<CommentOwnerRecord> for PostOwner {
    fn from(value: CommentOwnerRecord) -> Self {
        Self {
            id: value.id.to_hex().into(),
            name: value.name,
            surname: value.surname,
            avatar: value.avatar,
        }
    }
}

impl From<LikeRecord> for PostLike {
    fn from(value: LikeRecord) -> Self {
        Self {
            id: value.id.to_hex().into(),
            name: value.name,
            surname: value.surname,
            avatar: value.avatar,
        }
    }
}

impl From<UserRecord> for PostOwner {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.to_hex().into(),
            name: value.name,
            surname: value.surname,
            avatar: value.avatar,
        }
    }
}
