//! Chunked response bodies
//!
//! A streamed body reads the requested span of a file in fixed-size chunks
//! instead of buffering it, so memory stays bounded no matter how large the
//! resource or how slowly the client reads. When the client disconnects,
//! hyper drops the body and the underlying file handle with it, so no
//! further chunks are pulled from disk.

use bytes::{Bytes, BytesMut};
use futures::stream::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::Frame;
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

/// Body type shared by every response the server produces
pub type ResponseBody = BoxBody<Bytes, io::Error>;

/// Empty body (HEAD responses, 304, 416)
#[must_use]
pub fn empty() -> ResponseBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

/// Fully buffered body for small, non-resource payloads (error pages, health)
#[must_use]
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Stream `len` bytes of `file` starting at offset `start`, in chunks of at
/// most `chunk_size` bytes.
///
/// The final chunk is clipped so the stream never reads past the span, and
/// the stream ends deterministically once `len` bytes have been emitted (no
/// trailing empty chunk). A short read before the span is exhausted means
/// the file shrank underneath us; that surfaces as an `UnexpectedEof` error
/// frame, which aborts the connection mid-stream.
#[must_use]
pub fn file_span(file: File, start: u64, len: u64, chunk_size: usize) -> ResponseBody {
    let chunk_size = chunk_size.max(1);
    let state = SpanReader {
        file,
        seek_to: Some(start),
        remaining: len,
        chunk_size,
    };

    let chunks = futures::stream::try_unfold(state, |mut reader| async move {
        match reader.next_chunk().await? {
            Some(chunk) => Ok(Some((chunk, reader))),
            None => Ok(None),
        }
    });

    StreamBody::new(chunks.map_ok(Frame::data)).boxed()
}

/// Cursor over the remaining bytes of a requested span
struct SpanReader {
    file: File,
    /// Deferred initial seek; performed on the first read so that building
    /// the body stays synchronous
    seek_to: Option<u64>,
    remaining: u64,
    chunk_size: usize,
}

impl SpanReader {
    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        if let Some(offset) = self.seek_to.take() {
            self.file.seek(SeekFrom::Start(offset)).await?;
        }

        let want = usize::try_from(self.remaining)
            .map_or(self.chunk_size, |rest| rest.min(self.chunk_size));
        let mut buf = BytesMut::zeroed(want);
        let n = self.file.read(&mut buf).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "resource truncated while streaming",
            ));
        }

        buf.truncate(n);
        self.remaining -= n as u64;
        Ok(Some(buf.freeze()))
    }
}
