//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, header
//! extraction, route matching, and access logging.

use crate::config::AppState;
use crate::handler::stream_files;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // 1. Method policy: GET/HEAD are served, OPTIONS answered, rest rejected
    if let Some(resp) = check_http_method(&method, state.config.http.enable_cors) {
        return Ok(resp);
    }

    // 2. Extract the headers the responder cares about
    let ctx = RequestContext {
        path: &path,
        is_head: method == Method::HEAD,
        if_none_match: header_string(&req, "if-none-match"),
        range_header: header_string(&req, "range"),
    };

    // 3. Dispatch
    let response = route_request(&ctx, &state).await;

    // 4. Access log
    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.range = ctx.range_header.clone();
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return the response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<ResponseBody>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<ResponseBody> {
    // Health check endpoints first, always fast
    if ctx.path == "/healthz" || ctx.path == "/readyz" {
        return http::build_health_response("ok");
    }

    // Media library routes
    if let Some(rel_path) = media_rel_path(ctx.path, &state.config.media.route_prefix) {
        return stream_files::serve_resource(
            ctx,
            &state.store,
            rel_path,
            state.config.media.chunk_size,
        )
        .await;
    }

    http::build_404_response()
}

/// Relative resource path for `path` under the media route prefix, or None
/// when the path does not belong to the media routes.
///
/// Matching is segment-aware: with prefix `/media`, `/media/a.mp4` matches
/// but `/mediafoo` does not.
fn media_rel_path<'a>(path: &'a str, route_prefix: &str) -> Option<&'a str> {
    let prefix = route_prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
