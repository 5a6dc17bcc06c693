//! Auth Router

use axum::http::Method;
use kernel::routing::ApiRouter;

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Auth routes, relative to the API root
pub fn auth_routes<R>(state: AuthAppState<R>) -> ApiRouter
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    ApiRouter::new()
        .public(Method::POST, "/register", handlers::register::<R>)
        .public(Method::POST, "/login", handlers::login::<R>)
        .identified(Method::POST, "/logout", handlers::logout::<R>)
        .with_state(state)
}
