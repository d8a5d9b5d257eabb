//! Image intake
//!
//! Validates and persists uploaded label photos. Filenames are sanitized
//! to a safe character set, extensions are checked against a short
//! allow-list, content is sniffed by magic bytes, and stored names get a
//! timestamp prefix so repeat uploads never collide.

use std::path::PathBuf;

use axum::http::StatusCode;
use chrono::Utc;

/// File extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Intake error types
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("No image received. Please upload or capture an image.")]
    EmptyUpload,

    #[error("Invalid file type '{0}'. Allowed: png, jpg, jpeg, webp.")]
    InvalidFileType(String),

    #[error("File '{0}' is not a readable image")]
    NotAnImage(String),

    #[error("Image '{0}' not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntakeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyUpload | Self::InvalidFileType(_) | Self::NotAnImage(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Whether a filename carries an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        }
        _ => false,
    }
}

/// Reduce a client-supplied filename to a safe form: path components are
/// discarded and anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim_matches('.');

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A stored upload
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Name on disk, including the timestamp prefix
    pub filename: String,
}

/// Filesystem store for uploaded label photos
#[derive(Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create the upload directory if it doesn't exist yet.
    pub async fn init(&self) -> Result<(), IntakeError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Validate and persist an upload. A missing or empty client
    /// filename gets a generated capture name; a name without an
    /// extension defaults to `.png` (camera captures arrive that way).
    pub async fn store(
        &self,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<StoredImage, IntakeError> {
        if data.is_empty() {
            return Err(IntakeError::EmptyUpload);
        }

        let timestamp = Utc::now().timestamp();

        let mut name = original_name
            .map(sanitize_filename)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("capture_{}.png", timestamp));

        if !name.contains('.') {
            name.push_str(".png");
        }

        if !allowed_file(&name) {
            return Err(IntakeError::InvalidFileType(name));
        }

        if image::guess_format(data).is_err() {
            return Err(IntakeError::NotAnImage(name));
        }

        let filename = format!("{}_{}", timestamp, name);
        tokio::fs::write(self.dir.join(&filename), data).await?;

        tracing::info!(filename = %filename, size = data.len(), "Stored uploaded image");

        Ok(StoredImage { filename })
    }

    /// Read back a stored image by its on-disk name. Only names the
    /// sanitizer could have produced are accepted, so a request cannot
    /// escape the upload directory.
    pub async fn open(&self, filename: &str) -> Result<Vec<u8>, IntakeError> {
        if filename != sanitize_filename(filename) {
            return Err(IntakeError::NotFound(filename.to_string()));
        }

        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(IntakeError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Content type for a stored name, by extension.
    pub fn content_type(filename: &str) -> &'static str {
        match filename.rsplit_once('.').map(|(_, ext)| ext) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}
