//! MIME type detection for stored lecture material
//!
//! Content types are derived from the file extension; anything unknown is
//! served as a generic octet stream.

use std::path::Path;

/// Content-Type for a stored resource, from its path extension.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use lectern::http::mime::content_type_for;
///
/// assert_eq!(content_type_for(Path::new("week1/intro.mp4")), "video/mp4");
/// assert_eq!(content_type_for(Path::new("notes.pdf")), "application/pdf");
/// assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
/// ```
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        // Lecture recordings
        Some("mp4" | "m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("mov") => "video/quicktime",
        Some("ogv") => "video/ogg",

        // Audio
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("ogg" | "oga") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",

        // Course documents
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",

        // Figures and scans
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",

        // Bundled handouts
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("tar") => "application/x-tar",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types() {
        assert_eq!(content_type_for(Path::new("lecture.mp4")), "video/mp4");
        assert_eq!(content_type_for(Path::new("lecture.webm")), "video/webm");
        assert_eq!(content_type_for(Path::new("podcast.mp3")), "audio/mpeg");
    }

    #[test]
    fn document_types() {
        assert_eq!(content_type_for(Path::new("syllabus.pdf")), "application/pdf");
        assert_eq!(
            content_type_for(Path::new("notes.txt")),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(content_type_for(Path::new("LECTURE.MP4")), "video/mp4");
    }

    #[test]
    fn unknown_falls_back_to_octet_stream() {
        assert_eq!(
            content_type_for(Path::new("mystery.xyz")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
