//! Stored resource access module
//!
//! The request handlers never touch the filesystem directly; they go through
//! the store, which owns path containment and resource metadata. The store
//! only ever reads: resources are created and deleted by whatever uploads
//! them, and are treated as immutable for the duration of one request.

mod fs;

pub use fs::{FileStore, OpenedResource};

use thiserror::Error;

/// Why a resource could not be opened
#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier does not resolve to a readable file inside the
    /// library root. Expected and benign; the caller serves a 404.
    #[error("resource not found")]
    NotFound,

    /// The file exists but reading it failed. Surfaced distinctly so the
    /// caller can log it; still presented to the client as a 404.
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
