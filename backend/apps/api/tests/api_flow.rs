//! End-to-end flows over the assembled router with in-memory stores.

use std::path::PathBuf;

use auth::{AuthAppState, AuthConfig, InMemoryAuthRepository};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::routing::get;
use kernel::id::UserId;
use kernel::identity::AuthUser;
use kernel::routing::RouteAccess;
use linkboard::app::panic_guard;
use linkboard::{HttpOptions, build_app};
use post::{InMemoryPostRepository, PostAppState};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    auth: AuthAppState<InMemoryAuthRepository>,
}

fn test_app() -> TestApp {
    let auth = AuthAppState::new(InMemoryAuthRepository::new(), AuthConfig::development());
    let posts = PostAppState::new(InMemoryPostRepository::new());
    let options = HttpOptions {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        frontend_origins: Vec::new(),
    };
    let (router, _) = build_app(auth.clone(), posts, &options);
    TestApp { router, auth }
}

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("{e}: {}", self.body))
    }
}

async fn call(router: &Router, req: Request<Body>) -> Reply {
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    }
}

async fn register(router: &Router, username: &str) -> String {
    let reply = call(
        router,
        request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({"username": username, "password": "hunter2"})),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    reply.json()["token"].as_str().unwrap().to_string()
}

async fn create_text_post(router: &Router, token: &str) -> Value {
    let reply = call(
        router,
        request(
            Method::POST,
            "/api/posts",
            Some(token),
            Some(json!({"type": "text", "title": "Hi", "category": "music", "text": "hello"})),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    reply.json()
}

fn user_id(app: &TestApp, token: &str) -> String {
    app.auth.tokens.verify(token).unwrap().user.id.into_inner()
}

#[tokio::test]
async fn register_twice_then_bad_login() {
    let app = test_app();
    let token = register(&app.router, "alice").await;
    assert_eq!(token.split('.').count(), 3);

    let again = call(
        &app.router,
        request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({"username": "alice", "password": "hunter2"})),
        ),
    )
    .await;
    assert_eq!(again.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(again.json()["errors"][0]["msg"], "already exists");

    let login = call(
        &app.router,
        request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.json(), json!({"message": "invalid password"}));
}

#[tokio::test]
async fn post_lifecycle() {
    let app = test_app();
    let alice = register(&app.router, "alice").await;
    let bob = register(&app.router, "bob").await;

    let post = create_text_post(&app.router, &alice).await;
    assert_eq!(post["score"], 1);
    assert_eq!(post["upvotePercentage"], 100);
    assert_eq!(post["votes"], json!([{"user": user_id(&app, &alice), "vote": 1}]));
    assert_eq!(post["comments"], json!([]));
    assert_eq!(post["author"]["username"], "alice");

    let post_uri = format!("/api/post/{}", post["id"].as_str().unwrap());

    // views count each fetch
    let first = call(&app.router, request(Method::GET, &post_uri, None, None)).await;
    assert_eq!(first.json()["views"], 1);
    let second = call(&app.router, request(Method::GET, &post_uri, None, None)).await;
    assert_eq!(second.json()["views"], 2);

    // bob downvotes, then switches to an upvote
    let down = call(
        &app.router,
        request(Method::GET, &format!("{post_uri}/downvote"), Some(&bob), None),
    )
    .await
    .json();
    assert_eq!(down["score"], 0);
    assert_eq!(down["upvotePercentage"], 50);
    assert_eq!(down["votes"].as_array().unwrap().len(), 2);

    let up = call(
        &app.router,
        request(Method::GET, &format!("{post_uri}/upvote"), Some(&bob), None),
    )
    .await
    .json();
    assert_eq!(up["score"], 2);
    assert_eq!(up["upvotePercentage"], 100);
    assert_eq!(up["votes"].as_array().unwrap().len(), 2);

    // comment, remove it, remove it again
    let commented = call(
        &app.router,
        request(Method::POST, &post_uri, Some(&bob), Some(json!({"comment": "nice"}))),
    )
    .await;
    assert_eq!(commented.status, StatusCode::OK);
    let comment_id = commented.json()["comments"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let comment_uri = format!("{post_uri}/{comment_id}");

    let removed = call(&app.router, request(Method::DELETE, &comment_uri, Some(&bob), None)).await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.json()["comments"], json!([]));

    let repeat = call(&app.router, request(Method::DELETE, &comment_uri, Some(&bob), None)).await;
    assert_eq!(repeat.status, StatusCode::OK);
    assert_eq!(repeat.json(), removed.json());

    // listings
    let all = call(&app.router, request(Method::GET, "/api/posts/", None, None)).await;
    assert_eq!(all.json().as_array().unwrap().len(), 1);
    let mine = call(&app.router, request(Method::GET, "/api/user/alice", None, None)).await;
    assert_eq!(mine.json().as_array().unwrap().len(), 1);
    let music = call(&app.router, request(Method::GET, "/api/posts/music", None, None)).await;
    assert_eq!(music.json().as_array().unwrap().len(), 1);

    let deleted = call(&app.router, request(Method::DELETE, &post_uri, Some(&alice), None)).await;
    assert_eq!(deleted.json(), json!({"message": "success"}));
    let gone = call(&app.router, request(Method::GET, &post_uri, None, None)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let app = test_app();
    for uri in [
        "/api",
        "/api/posts/",
        "/api/posts/news",
        "/api/user/alice",
    ] {
        let reply = call(&app.router, request(Method::GET, uri, None, None)).await;
        assert_eq!(reply.status, StatusCode::OK, "{uri}");
        assert_eq!(reply.json(), json!([]), "{uri}");
    }

    let missing = call(
        &app.router,
        request(Method::GET, "/api/post/ffffffffffffffffffffffff", None, None),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json(), json!({"message": "post not found"}));
}

#[tokio::test]
async fn identified_routes_reject_missing_or_bad_credentials() {
    let app = test_app();
    let token = register(&app.router, "alice").await;
    let post = create_text_post(&app.router, &token).await;
    let id = post["id"].as_str().unwrap();

    let stranger = app
        .auth
        .tokens
        .mint(AuthUser::new(UserId::from_raw("zzzzzzzzzzzzzzzzzzzzzzzz"), "stranger"))
        .unwrap();

    let routes = [
        (Method::POST, "/api/posts".to_string()),
        (Method::POST, format!("/api/post/{id}")),
        (Method::DELETE, format!("/api/post/{id}")),
        (Method::DELETE, format!("/api/post/{id}/aaaaaaaaaaaaaaaaaaaaaaaa")),
        (Method::GET, format!("/api/post/{id}/upvote")),
        (Method::POST, "/api/logout".to_string()),
    ];

    for (method, uri) in routes {
        for token in [None, Some("not-a-token"), Some(stranger.as_str())] {
            let reply = call(&app.router, request(method.clone(), &uri, token, None)).await;
            assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "{method} {uri} {token:?}");
            assert_eq!(reply.json(), json!({"message": "unauthorized"}));
        }
    }

    // post untouched
    let fetched = call(&app.router, request(Method::GET, &format!("/api/post/{id}"), None, None)).await;
    assert_eq!(fetched.json()["votes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = test_app();
    let token = register(&app.router, "alice").await;

    let out = call(&app.router, request(Method::POST, "/api/logout", Some(&token), None)).await;
    assert_eq!(out.status, StatusCode::OK);

    let reply = call(
        &app.router,
        request(
            Method::POST,
            "/api/posts",
            Some(&token),
            Some(json!({"type": "text", "title": "Hi", "category": "music", "text": "x"})),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_paths() {
    let app = test_app();

    let api = call(&app.router, request(Method::GET, "/api/nothing/here", None, None)).await;
    assert_eq!(api.status, StatusCode::OK);
    assert_eq!(api.body, "[]");
    assert_eq!(api.content_type.as_deref(), Some("application/json"));

    let page = call(&app.router, request(Method::GET, "/some/page", None, None)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<div id=\"root\">"));

    let asset = call(&app.router, request(Method::GET, "/static/html/index.html", None, None)).await;
    assert_eq!(asset.status, StatusCode::OK);
}

#[test]
fn route_table_tags() {
    let app_parts = {
        let auth = AuthAppState::new(InMemoryAuthRepository::new(), AuthConfig::development());
        let posts = PostAppState::new(InMemoryPostRepository::new());
        build_app(
            auth,
            posts,
            &HttpOptions {
                static_dir: PathBuf::from("static"),
                frontend_origins: vec!["http://localhost:3000".into()],
            },
        )
    };
    let table = app_parts.1;

    for (method, path) in [
        (Method::POST, "/login"),
        (Method::POST, "/register"),
        (Method::GET, "/"),
        (Method::GET, "/posts/"),
        (Method::GET, "/post/{post_id}"),
        (Method::GET, "/user/{login}"),
        (Method::GET, "/posts/{category}"),
    ] {
        assert_eq!(table.classify(&method, path), Some(RouteAccess::Public), "{path}");
    }
    for (method, path) in [
        (Method::POST, "/posts"),
        (Method::POST, "/post/{post_id}"),
        (Method::DELETE, "/post/{post_id}"),
        (Method::DELETE, "/post/{post_id}/{target}"),
        (Method::GET, "/post/{post_id}/{target}"),
        (Method::POST, "/logout"),
    ] {
        assert_eq!(table.classify(&method, path), Some(RouteAccess::Identified), "{path}");
    }
}

#[tokio::test]
async fn panics_become_500() {
    async fn boom() -> &'static str {
        panic!("boom")
    }

    let router = Router::new()
        .route("/boom", get(boom))
        .route("/ok", get(|| async { "ok" }))
        .layer(panic_guard());

    let reply = call(&router, request(Method::GET, "/boom", None, None)).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body, "Internal server error");

    let reply = call(&router, request(Method::GET, "/ok", None, None)).await;
    assert_eq!(reply.status, StatusCode::OK);
}
