//! Route registration with access tags
//!
//! Every API route is declared once, together with whether it is public or
//! requires an identified caller. [`ApiRouter`] keeps the two sets in separate
//! axum routers so the identity guard can be applied to the identified set
//! only, and records every registration in a [`RouteTable`].

use std::fmt;

use axum::Router;
use axum::handler::Handler;
use axum::routing::{MethodFilter, on};
use http::Method;

/// Access level of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without credentials.
    Public,
    /// Requires a verified token and a live session.
    Identified,
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteAccess::Public => f.write_str("public"),
            RouteAccess::Identified => f.write_str("identified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    /// Path template as registered, e.g. `/post/{post_id}`.
    pub path: String,
    pub access: RouteAccess,
}

/// Registry of `(method, template) -> access`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Looks up a route by method and path template.
    pub fn classify(&self, method: &Method, template: &str) -> Option<RouteAccess> {
        self.entries
            .iter()
            .find(|e| e.method == *method && e.path == template)
            .map(|e| e.access)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn has_identified(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.access == RouteAccess::Identified)
    }

    fn push(&mut self, method: Method, path: &str, access: RouteAccess) {
        self.entries.push(RouteEntry {
            method,
            path: path.to_owned(),
            access,
        });
    }

    fn extend(&mut self, other: RouteTable) {
        self.entries.extend(other.entries);
    }
}

/// Router builder that tags each route as public or identified.
///
/// ```rust
/// use axum::http::Method;
/// use kernel::routing::{ApiRouter, RouteAccess};
///
/// let api: ApiRouter = ApiRouter::new()
///     .public(Method::GET, "/posts/", || async { "[]" })
///     .identified(Method::POST, "/posts", || async { "created" });
///
/// let (_router, table) = api.into_router(|identified| identified);
/// assert_eq!(table.classify(&Method::GET, "/posts/"), Some(RouteAccess::Public));
/// assert_eq!(table.classify(&Method::POST, "/posts"), Some(RouteAccess::Identified));
/// ```
pub struct ApiRouter<S = ()> {
    public: Router<S>,
    identified: Router<S>,
    table: RouteTable,
}

impl<S> Default for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            public: Router::new(),
            identified: Router::new(),
            table: RouteTable::default(),
        }
    }

    /// Registers a route reachable without credentials.
    pub fn public<H, T>(self, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(RouteAccess::Public, method, path, handler)
    }

    /// Registers a route that only runs behind the identity guard.
    pub fn identified<H, T>(self, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(RouteAccess::Identified, method, path, handler)
    }

    fn route<H, T>(mut self, access: RouteAccess, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let method_router = on(method_filter(&method, path), handler);
        match access {
            RouteAccess::Public => self.public = self.public.route(path, method_router),
            RouteAccess::Identified => {
                self.identified = self.identified.route(path, method_router)
            }
        }
        self.table.push(method, path, access);
        self
    }

    /// Combines two builders that share the same state type.
    pub fn merge(mut self, other: ApiRouter<S>) -> Self {
        self.public = self.public.merge(other.public);
        self.identified = self.identified.merge(other.identified);
        self.table.extend(other.table);
        self
    }

    /// Provides the state for both route sets.
    pub fn with_state<S2>(self, state: S) -> ApiRouter<S2>
    where
        S2: Clone + Send + Sync + 'static,
    {
        ApiRouter {
            public: self.public.with_state(state.clone()),
            identified: self.identified.with_state(state),
            table: self.table,
        }
    }

    /// Flattens into a single router. `guard` wraps the identified set only,
    /// typically with `route_layer(from_fn_with_state(...))`.
    pub fn into_router<G>(self, guard: G) -> (Router<S>, RouteTable)
    where
        G: FnOnce(Router<S>) -> Router<S>,
    {
        // route_layer on an empty router panics in axum
        let identified = if self.table.has_identified() {
            guard(self.identified)
        } else {
            self.identified
        };
        (self.public.merge(identified), self.table)
    }
}

fn method_filter(method: &Method, path: &str) -> MethodFilter {
    match *method {
        Method::GET => MethodFilter::GET,
        Method::POST => MethodFilter::POST,
        Method::PUT => MethodFilter::PUT,
        Method::PATCH => MethodFilter::PATCH,
        Method::DELETE => MethodFilter::DELETE,
        Method::HEAD => MethodFilter::HEAD,
        Method::OPTIONS => MethodFilter::OPTIONS,
        // registration happens at startup, like axum's own overlap checks
        _ => panic!("unsupported method {method} for route {path}"),
    }
}
