//! HTTP `Range` header resolution
//!
//! Single-range byte requests per RFC 7233, resolved against the size of the
//! resource being served. Multi-range requests and non-`bytes` units are
//! ignored rather than rejected, which makes the server fall back to a plain
//! 200 full-content response.

/// A resolved, inclusive byte span within a resource.
///
/// Invariant: `start <= end < total_size` of the resource it was resolved
/// against. Construct one only through [`resolve_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    /// First byte offset of the span
    pub start: u64,
    /// Last byte offset of the span (inclusive)
    pub end: u64,
}

impl ByteSpan {
    /// Number of bytes covered by the span, i.e. the `Content-Length`
    /// of a 206 response serving it.
    #[inline]
    #[must_use]
    pub const fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for a 206 response.
    #[must_use]
    pub fn content_range(&self, total_size: u64) -> String {
        format!("bytes {}-{}/{total_size}", self.start, self.end)
    }
}

/// Outcome of resolving a `Range` header against a resource size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// A valid single range; serve 206 with exactly this span
    Satisfiable(ByteSpan),
    /// Syntactically a byte range, but impossible for this resource
    /// (start past end of resource, reversed interval, empty resource);
    /// serve 416
    Unsatisfiable,
    /// Header absent, malformed, multi-range, or not `bytes`-unit;
    /// serve the full resource with 200
    Ignored,
}

/// Resolve a client `Range` header value against `total_size`.
///
/// Supported forms:
/// - `bytes=start-end` - closed interval, `end` clamped to the resource
/// - `bytes=start-` - from `start` to the last byte
/// - `bytes=-suffix` - the last `suffix` bytes
///
/// # Examples
/// ```
/// use lectern::http::range::{resolve_range, ByteSpan, RangeOutcome};
///
/// assert_eq!(
///     resolve_range(Some("bytes=90-"), 100),
///     RangeOutcome::Satisfiable(ByteSpan { start: 90, end: 99 }),
/// );
/// assert_eq!(resolve_range(Some("bytes=500-600"), 100), RangeOutcome::Unsatisfiable);
/// assert_eq!(resolve_range(None, 100), RangeOutcome::Ignored);
/// ```
#[must_use]
pub fn resolve_range(header: Option<&str>, total_size: u64) -> RangeOutcome {
    let Some(header) = header else {
        return RangeOutcome::Ignored;
    };

    let Some(spec) = header.trim().strip_prefix("bytes=") else {
        // Unknown unit, ignore per RFC 7233 §3.1
        return RangeOutcome::Ignored;
    };

    // Multi-range would require multipart/byteranges encoding; treat as absent
    if spec.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        resolve_suffix(end_str, total_size)
    } else {
        resolve_interval(start_str, end_str, total_size)
    }
}

/// Resolve `bytes=-N`: the last `N` bytes of the resource.
fn resolve_suffix(suffix_str: &str, total_size: u64) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<u64>() else {
        return RangeOutcome::Ignored;
    };

    // A zero-length suffix is never satisfiable, and no range at all is
    // satisfiable on an empty resource.
    if suffix == 0 || total_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Satisfiable(ByteSpan {
        // A suffix longer than the resource covers the whole resource
        start: total_size.saturating_sub(suffix),
        end: total_size - 1,
    })
}

/// Resolve `bytes=start-end` or `bytes=start-`.
fn resolve_interval(start_str: &str, end_str: &str, total_size: u64) -> RangeOutcome {
    let Ok(start) = start_str.parse::<u64>() else {
        return RangeOutcome::Ignored;
    };

    // Covers total_size == 0 as well: every start offset is past the end
    if start >= total_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        total_size - 1
    } else {
        let Ok(end) = end_str.parse::<u64>() else {
            return RangeOutcome::Ignored;
        };
        if start > end {
            return RangeOutcome::Unsatisfiable;
        }
        // Client-specified end past the resource is clamped, not rejected
        end.min(total_size - 1)
    };

    RangeOutcome::Satisfiable(ByteSpan { start, end })
}
