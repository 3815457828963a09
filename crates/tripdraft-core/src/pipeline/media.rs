//! Media type resolution for uploaded files.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Classification of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    /// Paginated PDF document.
    Pdf,
    /// Any `image/*` type.
    Image(String),
    /// Anything else, including the unknown-binary fallback.
    Other(String),
}

impl MediaType {
    /// Classify a media type string.
    ///
    /// Parameters (`; charset=...`) are dropped and the type is compared
    /// case-insensitively.
    pub fn parse(s: &str) -> Self {
        let essence = s
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == PDF_MIME_TYPE {
            Self::Pdf
        } else if essence.starts_with("image/") {
            Self::Image(essence)
        } else {
            Self::Other(essence)
        }
    }

    /// The type without parameters, e.g. `image/png`.
    pub fn essence(&self) -> &str {
        match self {
            Self::Pdf => PDF_MIME_TYPE,
            Self::Image(s) | Self::Other(s) => s,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.essence())
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.essence())
    }
}

/// Guess a media type from a filename extension.
///
/// The filename is only inspected, never opened.
pub fn guess_from_filename(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();

    let mime = match extension.as_str() {
        "pdf" => PDF_MIME_TYPE,
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "htm" | "html" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "eml" => "message/rfc822",
        _ => return None,
    };
    Some(mime)
}

/// Resolve the media type of an upload.
///
/// A declared type wins when it is present and not blank; otherwise the
/// type is guessed from the filename, falling back to
/// `application/octet-stream`.
pub fn resolve_media_type(filename: &str, declared: Option<&str>) -> MediaType {
    let declared = declared.map(str::trim).filter(|s| !s.is_empty());
    let resolved = declared
        .or_else(|| guess_from_filename(filename))
        .unwrap_or(OCTET_STREAM_MIME_TYPE);

    MediaType::parse(resolved)
}
