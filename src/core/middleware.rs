use crate::features::auth::model::Principal;
use crate::features::auth::TokenValidator;
use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use futures::{stream, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Message of the event emitted for every 403 response
pub const FORBIDDEN_LOG_MESSAGE: &str = "403 Forbidden response";

/// Number of characters of a 403 body kept in the anomaly log
pub const FORBIDDEN_BODY_EXCERPT_CHARS: usize = 500;

/// Bytes read ahead from a 403 body, enough for the excerpt even in 4-byte UTF-8
const FORBIDDEN_BODY_PEEK_BYTES: usize = FORBIDDEN_BODY_EXCERPT_CHARS * 4;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let provided = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(|value| value.strip_prefix("Basic "))
                .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
                .and_then(|decoded| String::from_utf8(decoded).ok());

            if provided.as_deref() == Some(credentials.as_str()) {
                return Ok(next.run(req).await);
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

/// Attaches a [`Principal`] when the request carries a valid bearer token.
///
/// Storefront routes stay reachable without (or with a stale) token; the admin gate is
/// what turns a missing principal into a 401.
pub async fn auth_middleware(
    State(validator): State<Arc<TokenValidator>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    if let Some(token) = token {
        match validator.validate_token(&token) {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(e) => tracing::debug!("Ignoring invalid bearer token: {}", e),
        }
    }

    next.run(req).await
}

/// Best-effort client address: proxy headers first, then the socket peer.
pub fn client_ip(req: &Request) -> String {
    let headers = req.headers();
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    if let Some(real_ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return real_ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn body_excerpt(bytes: &[u8], max_chars: usize) -> String {
    String::from_utf8_lossy(bytes).chars().take(max_chars).collect()
}

/// Logs every 403 leaving the service, whichever layer or handler produced it.
///
/// Must sit inside `auth_middleware` so the principal id is known. Only the head of the
/// body is read for the excerpt; it is replayed ahead of the rest of the stream so the
/// client receives the body unchanged, whatever its size.
pub async fn log_forbidden_responses(req: Request, next: Next) -> Response {
    let url = req.uri().to_string();
    let method = req.method().clone();
    let ip = client_ip(&req);
    let user_id = req
        .extensions()
        .get::<Principal>()
        .map(|p| p.id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;
    if response.status() != StatusCode::FORBIDDEN {
        return response;
    }

    let (parts, body) = response.into_parts();
    let mut rest = body.into_data_stream();
    let mut head: Vec<Result<Bytes, axum::Error>> = Vec::new();
    let mut head_len = 0;
    let mut read_error = None;

    while head_len < FORBIDDEN_BODY_PEEK_BYTES {
        match rest.next().await {
            Some(Ok(chunk)) => {
                head_len += chunk.len();
                head.push(Ok(chunk));
            }
            Some(Err(e)) => {
                read_error = Some(e.to_string());
                head.push(Err(e));
                break;
            }
            None => break,
        }
    }

    let excerpt = match read_error {
        Some(e) => format!("<unreadable body: {}>", e),
        None => {
            let bytes: Vec<u8> = head
                .iter()
                .filter_map(|chunk| chunk.as_ref().ok())
                .flat_map(|chunk| chunk.iter().copied())
                .collect();
            body_excerpt(&bytes, FORBIDDEN_BODY_EXCERPT_CHARS)
        }
    };

    tracing::warn!(
        url = %url,
        method = %method,
        ip = %ip,
        user_id = %user_id,
        user_agent = %user_agent,
        body = %excerpt,
        "{}",
        FORBIDDEN_LOG_MESSAGE
    );

    let body = Body::from_stream(stream::iter(head).chain(rest));
    Response::from_parts(parts, body)
}
