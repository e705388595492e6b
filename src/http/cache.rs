//! Conditional request handling
//!
//! `ETag` validators for stored resources. Hashing the content would require
//! reading the whole file, which streamed serving is meant to avoid, so the
//! validator is derived from metadata (size plus mtime), nginx-style.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// `ETag` for a stored resource, from its size and modification time.
///
/// Two resources with the same size and mtime get the same validator; a
/// rewrite of the file changes it. When mtime is unavailable the tag
/// degrades to a size-only validator, which is still correct, just weaker.
#[must_use]
pub fn resource_etag(size: u64, modified: Option<SystemTime>) -> String {
    let mut hasher = DefaultHasher::new();
    size.hash(&mut hasher);
    if let Some(mtime) = modified {
        if let Ok(since_epoch) = mtime.duration_since(UNIX_EPOCH) {
            since_epoch.as_nanos().hash(&mut hasher);
        }
    }
    format!("\"{size:x}-{:x}\"", hasher.finish())
}

/// Whether the client's `If-None-Match` header matches `etag`.
///
/// Handles comma-separated candidate lists and the `*` wildcard. A match
/// means the client's copy is current and a 304 should be served.
#[must_use]
pub fn none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|candidates| {
        candidates
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn etag_is_stable_for_same_metadata() {
        let mtime = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(
            resource_etag(1024, Some(mtime)),
            resource_etag(1024, Some(mtime))
        );
    }

    #[test]
    fn etag_changes_with_size_or_mtime() {
        let mtime = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let later = mtime + Duration::from_secs(1);
        assert_ne!(
            resource_etag(1024, Some(mtime)),
            resource_etag(1025, Some(mtime))
        );
        assert_ne!(
            resource_etag(1024, Some(mtime)),
            resource_etag(1024, Some(later))
        );
    }

    #[test]
    fn etag_is_quoted() {
        let etag = resource_etag(42, None);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
    }

    #[test]
    fn none_match_handles_lists_and_wildcard() {
        let etag = "\"400-abc\"";
        assert!(none_match(Some("\"400-abc\""), etag));
        assert!(none_match(Some("\"other\", \"400-abc\""), etag));
        assert!(none_match(Some("*"), etag));
        assert!(!none_match(Some("\"other\""), etag));
        assert!(!none_match(None, etag));
    }
}
