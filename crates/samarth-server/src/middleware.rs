//! Request ids for every route; bearer auth and a per-client request budget
//! for the admin routes.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const API_KEYS_VAR: &str = "SAMARTH_API_KEYS";
const REQUEST_ID_HEADER: &str = "x-request-id";
const ANONYMOUS_CLIENT: &str = "anonymous";

/// The request id, stored as a request extension and echoed on the response.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Which bearer tokens may use the admin routes.
#[derive(Debug, Clone)]
pub struct AuthState {
    keys: Option<Arc<HashSet<String>>>,
}

impl AuthState {
    /// Reads comma-separated admin tokens from `SAMARTH_API_KEYS`.
    ///
    /// # Errors
    ///
    /// Fails outside development when no token is configured.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var(API_KEYS_VAR).unwrap_or_default();
        Self::from_keys(&raw, is_development)
    }

    /// Parses an explicit token list. An empty list leaves the admin routes
    /// open, which is only accepted in development.
    ///
    /// # Errors
    ///
    /// Fails outside development when `raw` holds no token.
    pub fn from_keys(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let keys: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        match (keys.is_empty(), is_development) {
            (false, _) => Ok(Self {
                keys: Some(Arc::new(keys)),
            }),
            (true, true) => {
                tracing::warn!("{API_KEYS_VAR} not set; admin routes are open in development");
                Ok(Self { keys: None })
            }
            (true, false) => anyhow::bail!(
                "{API_KEYS_VAR} is required outside development to protect the catalog admin"
            ),
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.keys.is_some()
    }

    fn allows(&self, token: Option<&str>) -> bool {
        match (&self.keys, token) {
            (None, _) => true,
            (Some(keys), Some(token)) => keys.contains(token),
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: usize,
}

/// Fixed-window request budget, counted separately per admin client.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request for `client`; `false` once its budget is spent.
    async fn admit(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;
        clients.retain(|_, w| now.duration_since(w.started_at) < self.window);

        let window = clients.entry(client.to_owned()).or_insert(Window {
            started_at: now,
            count: 0,
        });
        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

fn request_id_of(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map_or_else(String::new, |id| id.0.clone())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The identity an admin request is budgeted under: its token when auth is
/// on and the token is accepted, else the forwarding address, else one shared
/// bucket. Unaccepted tokens never open a bucket of their own.
fn client_key(headers: &HeaderMap, auth: &AuthState) -> String {
    let accepted = bearer_token(headers).filter(|t| auth.enabled() && auth.allows(Some(*t)));
    if let Some(token) = accepted {
        return format!("token:{token}");
    }
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| ANONYMOUS_CLIENT.to_owned(), |addr| format!("addr:{addr}"))
}

/// Reuses an incoming `x-request-id` or assigns a fresh `UUIDv4`.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    res
}

pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if auth.allows(bearer_token(req.headers())) {
        return next.run(req).await;
    }

    tracing::warn!(
        path = %req.uri().path(),
        method = %req.method(),
        "rejected admin request without a valid bearer token"
    );
    ApiError::new(
        request_id_of(&req),
        "unauthorized",
        "missing or invalid bearer token",
    )
    .into_response()
}

pub async fn enforce_rate_limit(
    State((rate_limit, auth)): State<(RateLimitState, AuthState)>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_key(req.headers(), &auth);
    if rate_limit.admit(&client).await {
        return next.run(req).await;
    }

    tracing::warn!(%client, "admin rate limit exceeded");
    ApiError::new(
        request_id_of(&req),
        "rate_limited",
        "too many admin requests; try again shortly",
    )
    .into_response()
}
