//! MongoDB Post Repository
//!
//! One document per post in the `posts` collection, votes and comments
//! embedded. `_id` is an `ObjectId`; its hex form is the post id.
//!
//! Vote writes are optimistic: the document carries a `revision` counter,
//! the update is filtered on the revision that was read and bumps it. A
//! lost race re-reads and tries again, up to [`MAX_VOTE_ATTEMPTS`].

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use kernel::id::{CommentId, UserId};
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    Author, Comment, NewComment, NewPost, Post, PostContent, PostKind, Vote, VoteValue,
};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{Category, PostId};
use crate::error::{PostError, PostResult};

pub const POSTS_COLLECTION: &str = "posts";

pub const MAX_VOTE_ATTEMPTS: u32 = 5;

const DUPLICATE_KEY: i32 = 11000;

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthorDocument {
    id: String,
    username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VoteDocument {
    user: String,
    vote: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommentDocument {
    id: String,
    created: bson::DateTime,
    author: AuthorDocument,
    body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    score: i64,
    views: i64,
    #[serde(rename = "type")]
    kind: PostKind,
    title: String,
    author: AuthorDocument,
    category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default)]
    votes: Vec<VoteDocument>,
    #[serde(default)]
    comments: Vec<CommentDocument>,
    created: bson::DateTime,
    #[serde(rename = "upvotePercentage")]
    upvote_percentage: i32,
    /// Bumped by every vote write.
    #[serde(default)]
    revision: i64,
}

fn to_bson_time(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_time(at: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}

impl From<&Author> for AuthorDocument {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username.clone(),
        }
    }
}

impl From<AuthorDocument> for Author {
    fn from(doc: AuthorDocument) -> Self {
        Self {
            id: UserId::from_raw(doc.id),
            username: doc.username,
        }
    }
}

impl From<&Vote> for VoteDocument {
    fn from(vote: &Vote) -> Self {
        Self {
            user: vote.user.to_string(),
            vote: match vote.value {
                VoteValue::Up => 1,
                VoteValue::Down => -1,
            },
        }
    }
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            created: to_bson_time(comment.created),
            author: AuthorDocument::from(&comment.author),
            body: comment.body.clone(),
        }
    }
}

impl PostDocument {
    fn from_new(id: ObjectId, post: &NewPost) -> Self {
        Self {
            id,
            score: post.score,
            views: i64::try_from(post.views).unwrap_or(i64::MAX),
            kind: post.content.kind(),
            title: post.title.clone(),
            author: AuthorDocument::from(&post.author),
            category: post.category,
            text: post.content.text().map(str::to_owned),
            url: post.content.url().map(str::to_owned),
            votes: post.votes.iter().map(VoteDocument::from).collect(),
            comments: post.comments.iter().map(CommentDocument::from).collect(),
            created: to_bson_time(post.created),
            upvote_percentage: i32::from(post.upvote_percentage),
            revision: 0,
        }
    }

    fn into_post(self) -> Post {
        Post {
            id: PostId::from_trusted(self.id.to_hex()),
            title: self.title,
            category: self.category,
            content: PostContent::from_stored(self.kind, self.text, self.url),
            author: self.author.into(),
            score: self.score,
            views: u64::try_from(self.views).unwrap_or_default(),
            upvote_percentage: u8::try_from(self.upvote_percentage.clamp(0, 100)).unwrap_or(0),
            votes: self
                .votes
                .into_iter()
                .map(|v| Vote::new(UserId::from_raw(v.user), VoteValue::from_delta(i64::from(v.vote))))
                .collect(),
            comments: self
                .comments
                .into_iter()
                .map(|c| Comment {
                    id: CommentId::from_raw(c.id),
                    created: from_bson_time(c.created),
                    author: c.author.into(),
                    body: c.body,
                })
                .collect(),
            created: from_bson_time(self.created),
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

#[derive(Clone)]
pub struct MongoPostRepository {
    posts: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            posts: db.collection(POSTS_COLLECTION),
        }
    }

    /// Secondary indexes for the category and author listings.
    pub async fn ensure_indexes(&self) -> PostResult<()> {
        self.posts
            .create_indexes([
                IndexModel::builder().keys(doc! { "category": 1 }).build(),
                IndexModel::builder()
                    .keys(doc! { "author.username": 1 })
                    .build(),
            ])
            .await?;
        Ok(())
    }

    async fn collect(&self, filter: Document, sort: Option<Document>) -> PostResult<Vec<Post>> {
        let cursor = match sort {
            Some(sort) => self.posts.find(filter).sort(sort).await?,
            None => self.posts.find(filter).await?,
        };
        let docs: Vec<PostDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(PostDocument::into_post).collect())
    }

    async fn update_one_returning(&self, id: &PostId, update: Document) -> PostResult<Post> {
        self.posts
            .find_one_and_update(doc! { "_id": object_id(id)? }, update)
            .return_document(ReturnDocument::After)
            .await?
            .map(PostDocument::into_post)
            .ok_or(PostError::NotFound)
    }

    /// Read-modify-write of the vote list, guarded by `revision`.
    async fn rewrite_votes<F>(&self, id: &PostId, mutate: F) -> PostResult<Post>
    where
        F: Fn(&mut Post) -> PostResult<()>,
    {
        let oid = object_id(id)?;

        for attempt in 1..=MAX_VOTE_ATTEMPTS {
            let current = self
                .posts
                .find_one(doc! { "_id": oid })
                .await?
                .ok_or(PostError::NotFound)?;
            let revision = current.revision;

            let mut post = current.into_post();
            mutate(&mut post)?;

            let votes: Vec<VoteDocument> = post.votes.iter().map(VoteDocument::from).collect();
            let update = doc! {
                "$set": {
                    "votes": bson::to_bson(&votes)?,
                    "score": post.score,
                    "upvotePercentage": i32::from(post.upvote_percentage),
                },
                "$inc": { "revision": 1_i64 },
            };

            let written = self
                .posts
                .find_one_and_update(revision_filter(oid, revision), update)
                .return_document(ReturnDocument::After)
                .await?;

            match written {
                Some(doc) => return Ok(doc.into_post()),
                None => {
                    tracing::debug!(post_id = %id, attempt, "Vote write lost a race, retrying");
                }
            }
        }

        Err(PostError::Conflict)
    }
}

fn object_id(id: &PostId) -> PostResult<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|_| PostError::InvalidId)
}

/// Documents written before `revision` existed match revision 0.
fn revision_filter(oid: ObjectId, revision: i64) -> Document {
    if revision == 0 {
        doc! {
            "_id": oid,
            "$or": [
                { "revision": 0_i64 },
                { "revision": { "$exists": false } },
            ],
        }
    } else {
        doc! { "_id": oid, "revision": revision }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY
    )
}

impl PostRepository for MongoPostRepository {
    async fn create(&self, post: NewPost) -> PostResult<Post> {
        let oid = ObjectId::new();
        let document = PostDocument::from_new(oid, &post);

        self.posts.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                PostError::AlreadyExists
            } else {
                PostError::Storage(e)
            }
        })?;

        tracing::debug!(post_id = %oid, "Post inserted");
        Ok(post.with_id(PostId::from_trusted(oid.to_hex())))
    }

    async fn get_by_id(&self, id: &PostId) -> PostResult<Post> {
        self.update_one_returning(id, doc! { "$inc": { "views": 1_i64 } })
            .await
    }

    async fn list_all(&self) -> PostResult<Vec<Post>> {
        self.collect(doc! {}, Some(doc! { "score": -1 })).await
    }

    async fn list_by_author(&self, username: &str) -> PostResult<Vec<Post>> {
        self.collect(doc! { "author.username": username }, None).await
    }

    async fn list_by_category(&self, category: Category) -> PostResult<Vec<Post>> {
        self.collect(doc! { "category": category.as_str() }, None)
            .await
    }

    async fn delete(&self, id: &PostId) -> PostResult<()> {
        let result = self
            .posts
            .delete_one(doc! { "_id": object_id(id)? })
            .await?;
        if result.deleted_count == 0 {
            return Err(PostError::NotFound);
        }
        Ok(())
    }

    async fn add_comment(&self, id: &PostId, comment: NewComment) -> PostResult<Post> {
        let comment = comment.with_id(CommentId::from_raw(ObjectId::new().to_hex()));
        let pushed = bson::to_bson(&CommentDocument::from(&comment))?;
        self.update_one_returning(id, doc! { "$push": { "comments": pushed } })
            .await
    }

    async fn remove_comment(&self, id: &PostId, comment_id: &CommentId) -> PostResult<Post> {
        self.update_one_returning(
            id,
            doc! { "$pull": { "comments": { "id": comment_id.as_str() } } },
        )
        .await
    }

    async fn add_vote(&self, id: &PostId, vote: Vote) -> PostResult<Post> {
        self.rewrite_votes(id, |post| {
            post.cast_vote(&vote.user, vote.value);
            Ok(())
        })
        .await
    }

    async fn cancel_vote(&self, id: &PostId, user: &UserId) -> PostResult<Post> {
        self.rewrite_votes(id, |post| post.cancel_vote(user)).await
    }
}
