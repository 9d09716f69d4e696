//! Blob identifiers and retrieval: the filesystem-facing core shared by
//! the document and thumbnail servers.
//!
//! Identifiers come from untrusted client input and are concatenated into
//! filesystem paths. [`BlobId::parse`] is the only barrier against
//! directory traversal and must run before any path is constructed; it is
//! an allow-list check, not a deny-list.

use std::fmt;
use std::path::{Path, PathBuf};

/// Content kinds served by the blob servers. Both kinds share one
/// retrieval code path; only the extension, media type, and storage root
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Document,
    Thumbnail,
}

impl BlobKind {
    pub fn extension(&self) -> &'static str {
        match self {
            BlobKind::Document => "pdf",
            BlobKind::Thumbnail => "png",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            BlobKind::Document => "application/pdf",
            BlobKind::Thumbnail => "image/png",
        }
    }

    /// Human-readable label used in error envelopes and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            BlobKind::Document => "PDF",
            BlobKind::Thumbnail => "thumbnail",
        }
    }

    pub fn server_name(&self) -> &'static str {
        match self {
            BlobKind::Document => "PDF Data Server",
            BlobKind::Thumbnail => "Thumbnail Data Server",
        }
    }
}

/// A validated blob identifier: non-empty, ASCII letters, digits,
/// underscore, and hyphen only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobId(String);

/// Rejection from [`BlobId::parse`].
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidBlobId;

impl fmt::Display for InvalidBlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid blob identifier")
    }
}

impl std::error::Error for InvalidBlobId {}

impl BlobId {
    /// Validate a raw identifier. Total, side-effect free.
    pub fn parse(raw: &str) -> Result<Self, InvalidBlobId> {
        if raw.is_empty() {
            return Err(InvalidBlobId);
        }
        if raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidBlobId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for this identifier under the given kind.
    pub fn file_name(&self, kind: BlobKind) -> String {
        format!("{}.{}", self.0, kind.extension())
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Retrieval failure. `NotFound` (absent or not a regular file) and `Io`
/// (permissions, transient faults) are distinct fault domains and map to
/// different client-visible statuses.
#[derive(Debug)]
pub enum RetrieveError {
    NotFound,
    Io(std::io::Error),
}

impl fmt::Display for RetrieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrieveError::NotFound => write!(f, "blob not found"),
            RetrieveError::Io(e) => write!(f, "blob read failed: {}", e),
        }
    }
}

impl std::error::Error for RetrieveError {}

/// Resolve a validated identifier to an existing regular file under the
/// storage root. The returned path is always `<root>/<id>.<ext>` — no
/// nesting, no sidecar files.
pub fn resolve(root: &Path, kind: BlobKind, id: &BlobId) -> Result<PathBuf, RetrieveError> {
    let path = root.join(id.file_name(kind));

    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(RetrieveError::NotFound),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(RetrieveError::NotFound),
        Err(e) => Err(RetrieveError::Io(e)),
    }
}
