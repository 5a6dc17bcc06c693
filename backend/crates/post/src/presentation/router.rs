//! Post Router

use axum::http::Method;
use kernel::routing::ApiRouter;

use crate::domain::repository::PostRepository;
use crate::presentation::handlers::{self, PostAppState};

/// Post routes, relative to the API root.
///
/// `/post/{post_id}/{target}` carries the vote action on GET and the
/// comment id on DELETE.
pub fn post_routes<R>(state: PostAppState<R>) -> ApiRouter
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    ApiRouter::new()
        .public(Method::GET, "/posts/", handlers::list_posts::<R>)
        .public(Method::GET, "/posts/{category}", handlers::list_by_category::<R>)
        .public(Method::GET, "/post/{post_id}", handlers::get_post::<R>)
        .public(Method::GET, "/user/{login}", handlers::list_by_user::<R>)
        .identified(Method::POST, "/posts", handlers::create_post::<R>)
        .identified(Method::POST, "/post/{post_id}", handlers::add_comment::<R>)
        .identified(Method::DELETE, "/post/{post_id}", handlers::delete_post::<R>)
        .identified(Method::GET, "/post/{post_id}/{target}", handlers::vote::<R>)
        .identified(
            Method::DELETE,
            "/post/{post_id}/{target}",
            handlers::remove_comment::<R>,
        )
        .with_state(state)
}
