//! In-memory Post Repository
//!
//! Posts live in insertion order behind a `tokio::sync::RwLock`; every
//! mutation happens under the write lock.

use std::sync::Arc;

use kernel::id::{CommentId, UserId};
use platform::crypto::random_hex;
use tokio::sync::RwLock;

use crate::domain::entity::{NewComment, NewPost, Post, Vote};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{Category, PostId};
use crate::domain::value_object::post_id::POST_ID_LEN;
use crate::error::{PostError, PostResult};

#[derive(Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: &PostId, mutate: F) -> PostResult<Post>
    where
        F: FnOnce(&mut Post) -> PostResult<()>,
    {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(PostError::NotFound)?;
        mutate(post)?;
        Ok(post.clone())
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        self.posts
            .read()
            .await
            .iter()
            .filter(|p| keep(p))
            .cloned()
            .collect()
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> PostResult<Post> {
        let mut posts = self.posts.write().await;
        let id = PostId::from_trusted(random_hex(POST_ID_LEN));
        if posts.iter().any(|p| p.id == id) {
            return Err(PostError::AlreadyExists);
        }
        let post = post.with_id(id);
        posts.push(post.clone());
        Ok(post)
    }

    async fn get_by_id(&self, id: &PostId) -> PostResult<Post> {
        self.update(id, |post| {
            post.views += 1;
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> PostResult<Vec<Post>> {
        let mut posts = self.posts.read().await.clone();
        // stable, so equal scores keep insertion order
        posts.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(posts)
    }

    async fn list_by_author(&self, username: &str) -> PostResult<Vec<Post>> {
        Ok(self.filtered(|p| p.author.username == username).await)
    }

    async fn list_by_category(&self, category: Category) -> PostResult<Vec<Post>> {
        Ok(self.filtered(|p| p.category == category).await)
    }

    async fn delete(&self, id: &PostId) -> PostResult<()> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != *id);
        if posts.len() == before {
            return Err(PostError::NotFound);
        }
        Ok(())
    }

    async fn add_comment(&self, id: &PostId, comment: NewComment) -> PostResult<Post> {
        let comment = comment.with_id(CommentId::from_raw(random_hex(POST_ID_LEN)));
        self.update(id, |post| {
            post.comments.push(comment);
            Ok(())
        })
        .await
    }

    async fn remove_comment(&self, id: &PostId, comment_id: &CommentId) -> PostResult<Post> {
        self.update(id, |post| {
            post.remove_comment(comment_id);
            Ok(())
        })
        .await
    }

    async fn add_vote(&self, id: &PostId, vote: Vote) -> PostResult<Post> {
        self.update(id, |post| {
            post.cast_vote(&vote.user, vote.value);
            Ok(())
        })
        .await
    }

    async fn cancel_vote(&self, id: &PostId, user: &UserId) -> PostResult<Post> {
        self.update(id, |post| post.cancel_vote(user)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::entity::{Author, PostContent, VoteValue};

    fn author(name: &str) -> Author {
        Author {
            id: UserId::from_raw(format!("{name:0>24}")),
            username: name.to_string(),
        }
    }

    fn draft(title: &str, category: Category, by: &str) -> NewPost {
        NewPost::new(
            title,
            category,
            PostContent::Text("body".into()),
            author(by),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn fetch_increments_views() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(draft("a", Category::News, "alice")).await.unwrap();
        assert_eq!(post.id.as_str().len(), 24);

        assert_eq!(repo.get_by_id(&post.id).await.unwrap().views, 1);
        assert_eq!(repo.get_by_id(&post.id).await.unwrap().views, 2);

        let missing = PostId::parse("000000000000000000000000").unwrap();
        assert!(matches!(repo.get_by_id(&missing).await, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn listings() {
        let repo = InMemoryPostRepository::new();
        let low = repo.create(draft("low", Category::News, "alice")).await.unwrap();
        let high = repo.create(draft("high", Category::Music, "bob")).await.unwrap();
        repo.add_vote(&high.id, Vote::new(UserId::from_raw("c".repeat(24)), VoteValue::Up))
            .await
            .unwrap();
        repo.add_vote(&low.id, Vote::new(UserId::from_raw("c".repeat(24)), VoteValue::Down))
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(), ["high", "low"]);

        let by_bob = repo.list_by_author("bob").await.unwrap();
        assert_eq!(by_bob.len(), 1);
        assert_eq!(by_bob[0].id, high.id);

        assert_eq!(repo.list_by_category(Category::News).await.unwrap().len(), 1);
        assert!(repo.list_by_category(Category::Fashion).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comments_add_and_remove() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(draft("a", Category::Funny, "alice")).await.unwrap();

        let with_comment = repo
            .add_comment(&post.id, NewComment::new(author("bob"), "nice", Utc::now()))
            .await
            .unwrap();
        assert_eq!(with_comment.comments.len(), 1);
        let comment_id = with_comment.comments[0].id.clone();

        let removed = repo.remove_comment(&post.id, &comment_id).await.unwrap();
        assert!(removed.comments.is_empty());

        // second removal is a no-op
        let again = repo.remove_comment(&post.id, &comment_id).await.unwrap();
        assert_eq!(again, removed);
    }

    #[tokio::test]
    async fn delete_then_missing() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(draft("a", Category::Videos, "alice")).await.unwrap();
        repo.delete(&post.id).await.unwrap();
        assert!(matches!(repo.delete(&post.id).await, Err(PostError::NotFound)));
    }
}
