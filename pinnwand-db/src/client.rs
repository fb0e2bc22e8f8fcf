use crate::{
    record::{CommentRecord, LikeRecord, PostRecord, UserRecord},
    store::{PostStore, Result, UserStore},
};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Collection, options::ReturnDocument};
use pinnwand_common::model::{
    Id,
    post::{CommentMarker, CreatePost, CreatePostComment, PostMarker},
    user::{PostOwner, UserMarker},
};

pub const POSTS_COLLECTION: &str = "posts";
pub const USERS_COLLECTION: &str = "users";

pub struct DbClient {
    posts: Collection<PostRecord>,
    users: Collection<UserRecord>,
}

impl DbClient {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database);

        Ok(Self {
            posts: database.collection(POSTS_COLLECTION),
            users: database.collection(USERS_COLLECTION),
        })
    }
}

#[async_trait]
impl PostStore for DbClient {
    async fn create_post(&self, post: &CreatePost) -> Result<Option<PostRecord>> {
        let record = PostRecord::new(post, bson::DateTime::now())?;
        self.posts.insert_one(&record).await?;

        Ok(Some(record))
    }

    async fn get_all(&self) -> Result<Vec<PostRecord>> {
        let posts = self.posts.find(doc! {}).await?.try_collect().await?;
        Ok(posts)
    }

    async fn get_comment(
        &self,
        post_id: &Id<PostMarker>,
        comment_id: &Id<CommentMarker>,
    ) -> Result<Option<CommentRecord>> {
        let post_id = ObjectId::parse_str(post_id.get())?;
        let comment_id = ObjectId::parse_str(comment_id.get())?;

        let post = self.posts.find_one(doc! { "_id": post_id }).await?;
        Ok(post.and_then(|post| {
            post.comments
                .into_iter()
                .find(|comment| comment.id == comment_id)
        }))
    }

    async fn create_post_comment(
        &self,
        post_id: &Id<PostMarker>,
        comment: &CreatePostComment,
    ) -> Result<Option<PostRecord>> {
        let post_id = ObjectId::parse_str(post_id.get())?;
        let record = CommentRecord::new(comment, bson::DateTime::now())?;

        let update = doc! {
            "$push": { "comments": bson::to_bson(&record)? },
            "$set": { "updatedAt": bson::DateTime::now() },
        };
        let updated = self
            .posts
            .find_one_and_update(doc! { "_id": post_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn get_post_like_by_owner_id(
        &self,
        post_id: &Id<PostMarker>,
        owner_id: &Id<UserMarker>,
    ) -> Result<Option<LikeRecord>> {
        let post_id = ObjectId::parse_str(post_id.get())?;
        let owner_id = ObjectId::parse_str(owner_id.get())?;

        let post = self.posts.find_one(doc! { "_id": post_id }).await?;
        Ok(post.and_then(|post| post.likes.into_iter().find(|like| like.id == owner_id)))
    }

    async fn create_post_like(
        &self,
        post_id: &Id<PostMarker>,
        owner: &PostOwner,
    ) -> Result<Option<PostRecord>> {
        let post_id = ObjectId::parse_str(post_id.get())?;
        let record = LikeRecord::new(owner)?;

        // Upsert by owner id: a `$push` alone would duplicate the entry, so
        // any previous like from this owner is pulled first.
        self.posts
            .update_one(
                doc! { "_id": post_id },
                doc! { "$pull": { "likes": { "_id": record.id } } },
            )
            .await?;

        let update = doc! {
            "$push": { "likes": bson::to_bson(&record)? },
            "$set": { "updatedAt": bson::DateTime::now() },
        };
        let updated = self
            .posts
            .find_one_and_update(doc! { "_id": post_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete_post_like(
        &self,
        post_id: &Id<PostMarker>,
        owner_id: &Id<UserMarker>,
    ) -> Result<Option<PostRecord>> {
        let post_id = ObjectId::parse_str(post_id.get())?;
        let owner_id = ObjectId::parse_str(owner_id.get())?;

        let update = doc! {
            "$pull": { "likes": { "_id": owner_id } },
            "$set": { "updatedAt": bson::DateTime::now() },
        };
        let updated = self
            .posts
            .find_one_and_update(doc! { "_id": post_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }
}

#[async_trait]
impl UserStore for DbClient {
    async fn fetch_user(&self, user_id: &Id<UserMarker>) -> Result<Option<UserRecord>> {
        let user_id = ObjectId::parse_str(user_id.get())?;

        let user = self.users.find_one(doc! { "_id": user_id }).await?;
        Ok(user)
    }
}
