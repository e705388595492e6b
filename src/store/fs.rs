//! Filesystem-backed resource store
//!
//! Resources are files under a configured library root. Request paths are
//! canonicalized and checked against the root, so a crafted identifier can
//! never escape the library.

use crate::http::mime;
use crate::logger;
use crate::store::StoreError;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;
use tokio::fs::File;

/// Read-only view of the media library directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// A resource opened for one request: the handle plus the metadata the
/// responder needs to build headers
#[derive(Debug)]
pub struct OpenedResource {
    /// Open read handle, positioned at the start of the file
    pub file: File,
    /// Total size in bytes
    pub size: u64,
    /// Modification time, when the filesystem reports one
    pub modified: Option<SystemTime>,
    /// Declared MIME type, octet-stream when unknown
    pub content_type: &'static str,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the resource identified by `rel_path` (the request path with the
    /// route prefix already stripped).
    ///
    /// Missing files, directories, and paths escaping the library root all
    /// resolve to [`StoreError::NotFound`]; only genuine read failures on an
    /// existing file surface as [`StoreError::Io`].
    pub async fn open(&self, rel_path: &str) -> Result<OpenedResource, StoreError> {
        // Strip the leading slash and neutralize traversal segments before
        // the path ever reaches the filesystem
        let clean = rel_path.trim_start_matches('/').replace("..", "");
        // Re-trim: stripping ".." can leave a leading slash, and joining an
        // absolute path would replace the library root entirely
        let clean = clean.trim_start_matches('/');
        if clean.is_empty() {
            return Err(StoreError::NotFound);
        }

        let root_canonical = match tokio::fs::canonicalize(&self.root).await {
            Ok(path) => path,
            Err(e) => {
                logger::log_warning(&format!(
                    "Media library root not found or inaccessible '{}': {e}",
                    self.root.display()
                ));
                return Err(StoreError::NotFound);
            }
        };

        // Missing files are common; resolve failures quietly into NotFound
        let candidate = root_canonical.join(&clean);
        let Ok(resolved) = tokio::fs::canonicalize(&candidate).await else {
            return Err(StoreError::NotFound);
        };
        if !resolved.starts_with(&root_canonical) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {rel_path} -> {}",
                resolved.display()
            ));
            return Err(StoreError::NotFound);
        }

        let file = File::open(&resolved).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound
            } else {
                StoreError::Io(e)
            }
        })?;

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound);
        }

        Ok(OpenedResource {
            file,
            size: metadata.len(),
            modified: metadata.modified().ok(),
            content_type: mime::content_type_for(&resolved),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn library(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lectern-store-{tag}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("week1")).expect("create library");
        dir
    }

    fn seed(dir: &Path, name: &str, content: &[u8]) {
        std::fs::write(dir.join(name), content).expect("seed file");
    }

    #[tokio::test]
    async fn opens_existing_file_with_metadata() {
        let dir = library("open");
        seed(&dir, "week1/intro.mp4", &[7u8; 4096]);

        let store = FileStore::new(&dir);
        let resource = store.open("/week1/intro.mp4").await.expect("open");
        assert_eq!(resource.size, 4096);
        assert_eq!(resource.content_type, "video/mp4");
        assert!(resource.modified.is_some());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = library("missing");
        let store = FileStore::new(&dir);
        assert!(matches!(
            store.open("/week1/nope.mp4").await,
            Err(StoreError::NotFound)
        ));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn directory_is_not_a_resource() {
        let dir = library("dir");
        let store = FileStore::new(&dir);
        assert!(matches!(
            store.open("/week1").await,
            Err(StoreError::NotFound)
        ));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn traversal_cannot_escape_the_root() {
        let dir = library("traversal");
        seed(&dir, "week1/notes.txt", b"inside");
        // Plant a file right outside the library root
        let outside = dir.parent().unwrap().join(format!(
            "lectern-store-outside-{}.txt",
            std::process::id()
        ));
        std::fs::write(&outside, b"outside").expect("seed outside file");

        let store = FileStore::new(&dir);
        let escaped = format!("/../{}", outside.file_name().unwrap().to_str().unwrap());
        assert!(matches!(
            store.open(&escaped).await,
            Err(StoreError::NotFound)
        ));

        std::fs::remove_file(outside).ok();
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn empty_file_opens_with_zero_size() {
        let dir = library("empty");
        seed(&dir, "week1/empty.bin", b"");
        let store = FileStore::new(&dir);
        let resource = store.open("week1/empty.bin").await.expect("open");
        assert_eq!(resource.size, 0);
        std::fs::remove_dir_all(dir).ok();
    }
}
