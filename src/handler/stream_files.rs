//! Resource streaming module
//!
//! Turns one authorized request for a stored resource into the right HTTP
//! response: 200 streaming the whole file, 206 streaming a resolved byte
//! span, 416 when the range cannot be honored, or 404 when the resource is
//! gone. Each invocation is independent and touches no shared mutable
//! state, so repeating a request against an unchanged resource yields a
//! byte-identical response.

use crate::handler::router::RequestContext;
use crate::http::range::{resolve_range, RangeOutcome};
use crate::http::{body, cache, response, ResponseBody};
use crate::logger;
use crate::store::{FileStore, OpenedResource, StoreError};
use hyper::Response;

/// Serve the resource identified by `rel_path` from the store.
///
/// Access control happens upstream; by the time a request reaches this
/// point it is allowed to read the resource.
pub async fn serve_resource(
    ctx: &RequestContext<'_>,
    store: &FileStore,
    rel_path: &str,
    chunk_size: usize,
) -> Response<ResponseBody> {
    let resource = match store.open(rel_path).await {
        Ok(resource) => resource,
        Err(StoreError::NotFound) => return response::build_404_response(),
        Err(err @ StoreError::Io(_)) => {
            logger::log_error(&format!("Failed to open resource '{rel_path}': {err}"));
            return response::build_404_response();
        }
    };

    let OpenedResource {
        file,
        size,
        modified,
        content_type,
    } = resource;

    let etag = cache::resource_etag(size, modified);
    if cache::none_match(ctx.if_none_match.as_deref(), &etag) {
        return response::build_304_response(&etag);
    }

    match resolve_range(ctx.range_header.as_deref(), size) {
        RangeOutcome::Unsatisfiable => response::build_416_response(size),
        RangeOutcome::Satisfiable(span) => {
            let stream = if ctx.is_head {
                body::empty()
            } else {
                body::file_span(file, span.start, span.content_length(), chunk_size)
            };
            response::build_partial_response(stream, span, size, content_type, &etag)
        }
        RangeOutcome::Ignored => {
            let stream = if ctx.is_head {
                body::empty()
            } else {
                body::file_span(file, 0, size, chunk_size)
            };
            response::build_full_response(stream, size, content_type, &etag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::path::PathBuf;

    fn library(tag: &str, content: &[u8]) -> (PathBuf, FileStore) {
        let dir = std::env::temp_dir().join(format!(
            "lectern-serve-{tag}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("create library");
        std::fs::write(dir.join("clip.mp4"), content).expect("seed file");
        let store = FileStore::new(&dir);
        (dir, store)
    }

    fn ctx<'a>(range: Option<&str>) -> RequestContext<'a> {
        RequestContext {
            path: "/media/clip.mp4",
            is_head: false,
            if_none_match: None,
            range_header: range.map(ToString::to_string),
        }
    }

    fn sample_content(len: usize) -> Vec<u8> {
        (0..len).map(|i| u8::try_from(i % 251).unwrap()).collect()
    }

    async fn body_bytes(resp: Response<ResponseBody>) -> Vec<u8> {
        resp.into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn no_range_streams_full_resource() {
        let content = sample_content(42);
        let (dir, store) = library("full", &content);

        let resp = serve_resource(&ctx(None), &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "42");
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
        assert_eq!(resp.headers()["Content-Type"], "video/mp4");
        assert_eq!(body_bytes(resp).await, content);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn valid_range_streams_exact_span() {
        let content = sample_content(100);
        let (dir, store) = library("span", &content);

        let resp = serve_resource(&ctx(Some("bytes=10-29")), &store, "clip.mp4", 7).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 10-29/100");
        assert_eq!(resp.headers()["Content-Length"], "20");
        assert_eq!(body_bytes(resp).await, &content[10..30]);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn open_ended_range_runs_to_last_byte() {
        let content = sample_content(100);
        let (dir, store) = library("tail", &content);

        let resp = serve_resource(&ctx(Some("bytes=90-")), &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 90-99/100");
        assert_eq!(resp.headers()["Content-Length"], "10");
        assert_eq!(body_bytes(resp).await, &content[90..]);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn range_past_resource_is_416_with_empty_body() {
        let content = sample_content(100);
        let (dir, store) = library("unsat", &content);

        let resp = serve_resource(&ctx(Some("bytes=500-600")), &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */100");
        assert!(body_bytes(resp).await.is_empty());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn any_range_on_empty_resource_is_416() {
        let (dir, store) = library("empty", b"");

        let resp = serve_resource(&ctx(Some("bytes=0-")), &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */0");

        // Without a Range header the empty resource is a plain 200
        let resp = serve_resource(&ctx(None), &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "0");
        assert!(body_bytes(resp).await.is_empty());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_resource_is_404() {
        let (dir, store) = library("missing", b"x");
        let resp = serve_resource(&ctx(None), &store, "gone.mp4", 8192).await;
        assert_eq!(resp.status(), 404);
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn head_gets_headers_without_body() {
        let content = sample_content(100);
        let (dir, store) = library("head", &content);

        let mut head_ctx = ctx(Some("bytes=0-49"));
        head_ctx.is_head = true;
        let resp = serve_resource(&head_ctx, &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Length"], "50");
        assert!(body_bytes(resp).await.is_empty());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn matching_etag_gets_304() {
        let content = sample_content(64);
        let (dir, store) = library("etag", &content);

        let first = serve_resource(&ctx(None), &store, "clip.mp4", 8192).await;
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let mut revalidation = ctx(None);
        revalidation.if_none_match = Some(etag.clone());
        let resp = serve_resource(&revalidation, &store, "clip.mp4", 8192).await;
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["ETag"].to_str().unwrap(), etag);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn repeated_requests_are_byte_identical() {
        let content = sample_content(512);
        let (dir, store) = library("idempotent", &content);

        let first = serve_resource(&ctx(Some("bytes=100-399")), &store, "clip.mp4", 64).await;
        let second = serve_resource(&ctx(Some("bytes=100-399")), &store, "clip.mp4", 64).await;
        assert_eq!(first.status(), second.status());
        assert_eq!(
            first.headers()["Content-Range"],
            second.headers()["Content-Range"]
        );
        assert_eq!(body_bytes(first).await, body_bytes(second).await);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn chunk_size_is_invisible_to_the_client() {
        let content = sample_content(5000);
        let (dir, store) = library("chunking", &content);

        let mut seen = Vec::new();
        for chunk_size in [1, 17, 4096, 1 << 20] {
            let resp =
                serve_resource(&ctx(Some("bytes=123-4321")), &store, "clip.mp4", chunk_size)
                    .await;
            assert_eq!(resp.status(), 206);
            assert_eq!(resp.headers()["Content-Length"], "4199");
            seen.push(body_bytes(resp).await);
        }
        assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(seen[0], &content[123..4322]);

        std::fs::remove_dir_all(dir).ok();
    }
}
