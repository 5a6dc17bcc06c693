//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use kernel::error::app_error::{AppError, AppResult, BodyKey};
use kernel::id::{CommentId, ID_LEN};
use kernel::identity::AuthUser;
use kernel::json::decode;

use crate::application::{
    CommentUseCase, CreatePostInput, CreatePostUseCase, DeletePostUseCase, PostQueryUseCase,
    VoteUseCase,
};
use crate::domain::repository::PostRepository;
use crate::error::PostResult;
use crate::presentation::dto::{
    CommentRequest, CreatePostRequest, MessageResponse, PostResponse, post_list,
};

const INVALID_JSON: &str = "invalid JSON payload";

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> PostAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

// ============================================================================
// Public reads
// ============================================================================

/// GET /api/posts/
pub async fn list_posts<R>(State(state): State<PostAppState<R>>) -> Json<Vec<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let posts = PostQueryUseCase::new(state.repo.clone()).list_all().await;
    Json(post_list(posts))
}

/// GET /api/posts/{category}
pub async fn list_by_category<R>(
    State(state): State<PostAppState<R>>,
    Path(category): Path<String>,
) -> Json<Vec<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let posts = PostQueryUseCase::new(state.repo.clone())
        .list_by_category(&category)
        .await;
    Json(post_list(posts))
}

/// GET /api/user/{login}
pub async fn list_by_user<R>(
    State(state): State<PostAppState<R>>,
    Path(login): Path<String>,
) -> Json<Vec<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let posts = PostQueryUseCase::new(state.repo.clone())
        .list_by_author(&login)
        .await;
    Json(post_list(posts))
}

/// GET /api/post/{post_id}
///
/// Counts a view. Client errors answer under `"message"`.
pub async fn get_post<R>(
    State(state): State<PostAppState<R>>,
    Path(post_id): Path<String>,
) -> AppResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    require_id_len(&post_id, "invalid post id")?;

    match PostQueryUseCase::new(state.repo.clone()).get(&post_id).await {
        Ok(post) => Ok(Json(post.into())),
        Err(err) => {
            err.log();
            let err = err.into_app_error();
            if err.is_client_error() {
                Err(err.with_body_key(BodyKey::Message))
            } else {
                Err(err)
            }
        }
    }
}

// ============================================================================
// Identified writes
// ============================================================================

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<PostAppState<R>>,
    user: AuthUser,
    body: Bytes,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let req: CreatePostRequest = decode(&body, INVALID_JSON)?;

    let input = CreatePostInput {
        kind: req.kind,
        title: req.title,
        category: req.category,
        text: req.text,
        url: req.url,
    };
    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(input, user)
        .await?;

    Ok(Json(post.into()))
}

/// POST /api/post/{post_id}
pub async fn add_comment<R>(
    State(state): State<PostAppState<R>>,
    Path(post_id): Path<String>,
    user: AuthUser,
    body: Bytes,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    require_id_len(&post_id, "invalid post id")?;
    let req: CommentRequest = decode(&body, INVALID_JSON)?;

    let post = CommentUseCase::new(state.repo.clone())
        .add(&post_id, user, req.comment)
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /api/post/{post_id}
pub async fn delete_post<R>(
    State(state): State<PostAppState<R>>,
    Path(post_id): Path<String>,
    user: AuthUser,
) -> PostResult<Json<MessageResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    require_id_len(&post_id, "invalid post id")?;

    DeletePostUseCase::new(state.repo.clone())
        .execute(&post_id, &user)
        .await?;

    Ok(Json(MessageResponse { message: "success" }))
}

/// DELETE /api/post/{post_id}/{comm_id}
pub async fn remove_comment<R>(
    State(state): State<PostAppState<R>>,
    Path((post_id, comment_id)): Path<(String, String)>,
    _user: AuthUser,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    require_id_len(&post_id, "invalid post id")?;
    let comment_id =
        CommentId::parse(&comment_id).map_err(|_| AppError::bad_request("invalid comment id"))?;

    let post = CommentUseCase::new(state.repo.clone())
        .remove(&post_id, &comment_id)
        .await?;

    Ok(Json(post.into()))
}

/// GET /api/post/{post_id}/{upvote|downvote|unvote}
pub async fn vote<R>(
    State(state): State<PostAppState<R>>,
    Path((post_id, action)): Path<(String, String)>,
    user: AuthUser,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    require_id_len(&post_id, "invalid post id")?;

    let post = VoteUseCase::new(state.repo.clone())
        .execute(&post_id, &user.id, &action)
        .await?;

    Ok(Json(post.into()))
}

// ============================================================================
// Helpers
// ============================================================================

/// 400 `{"message": rejection}` unless `raw` is exactly 24 characters.
fn require_id_len(raw: &str, rejection: &'static str) -> AppResult<()> {
    if raw.chars().count() == ID_LEN {
        Ok(())
    } else {
        Err(AppError::bad_request(rejection))
    }
}
