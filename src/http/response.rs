//! HTTP response building module
//!
//! Builders for every status the server emits, decoupled from routing and
//! store logic. Streamed bodies are passed in by the caller; everything else
//! is built here.

use crate::http::body::{self, ResponseBody};
use crate::http::range::ByteSpan;
use hyper::Response;

/// Build 200 response streaming the entire resource
pub fn build_full_response(
    stream: ResponseBody,
    total_size: u64,
    content_type: &str,
    etag: &str,
) -> Response<ResponseBody> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", total_size)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", "private, max-age=3600")
        .body(stream)
        .unwrap_or_else(|e| fallback_response("200", &e))
}

/// Build 206 Partial Content response streaming the resolved span
pub fn build_partial_response(
    stream: ResponseBody,
    span: ByteSpan,
    total_size: u64,
    content_type: &str,
    etag: &str,
) -> Response<ResponseBody> {
    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", span.content_length())
        .header("Content-Range", span.content_range(total_size))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", "private, max-age=3600")
        .body(stream)
        .unwrap_or_else(|e| fallback_response("206", &e))
}

/// Build 416 Range Not Satisfiable response.
///
/// Carries the unsatisfied-range form of `Content-Range` and an empty body,
/// so media players can learn the true resource size and re-request.
pub fn build_416_response(total_size: u64) -> Response<ResponseBody> {
    Response::builder()
        .status(416)
        .header("Content-Range", format!("bytes */{total_size}"))
        .body(body::empty())
        .unwrap_or_else(|e| fallback_response("416", &e))
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "private, max-age=3600")
        .body(body::empty())
        .unwrap_or_else(|e| fallback_response("304", &e))
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(body::full("404 Not Found"))
        .unwrap_or_else(|e| fallback_response("404", &e))
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(body::full("405 Method Not Allowed"))
        .unwrap_or_else(|e| fallback_response("405", &e))
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type, Range")
            .header("Access-Control-Expose-Headers", "Content-Range, Accept-Ranges")
            .header("Access-Control-Max-Age", "86400");
    }

    builder
        .body(body::empty())
        .unwrap_or_else(|e| fallback_response("OPTIONS", &e))
}

/// Build health check response
pub fn build_health_response(status: &str) -> Response<ResponseBody> {
    let payload = serde_json::json!({ "status": status }).to_string();
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", payload.len())
        .header("Cache-Control", "no-store")
        .body(body::full(payload))
        .unwrap_or_else(|e| fallback_response("health", &e))
}

/// Last-resort response when the builder itself fails (bad header value)
fn fallback_response(status: &str, error: &hyper::http::Error) -> Response<ResponseBody> {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    Response::new(body::empty())
}
