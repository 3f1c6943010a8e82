//! Profile Picture Uploads
//!
//! Resolves an inbound file part to a stored filename and serves stored
//! files back at a fixed public prefix. Filenames are synthesized from the
//! form field name, the current time, and the original extension so that
//! concurrent uploads cannot collide on the original name.

use std::fs;
use std::path::{Path, PathBuf};

use axum::{
    Router,
    body::Bytes,
    extract::{Path as UrlPath, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use http::header;

use crate::core::ServerState;
use crate::utils::AppError;

/// Maximum accepted upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Decides the stored filename for profile pictures
#[derive(Debug, Clone)]
pub struct UploadResolver {
    dir: PathBuf,
    default_picture: String,
}

impl UploadResolver {
    /// Create the resolver, ensuring the uploads directory exists
    pub fn new(work_dir: &Path, default_picture: impl Into<String>) -> Result<Self, AppError> {
        let dir = work_dir.join("uploads");
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {e}")))?;
        Ok(Self {
            dir,
            default_picture: default_picture.into(),
        })
    }

    /// The sentinel filename used when a record never got a real picture
    pub fn default_picture(&self) -> &str {
        &self.default_picture
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist an uploaded part, returning the stored filename
    /// (`{field}-{millis}.{ext}`).
    pub fn store(
        &self,
        field_name: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Empty file provided"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {original_name}"))
            })?;

        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            )));
        }

        // Verify it actually decodes as an image
        if let Err(e) = image::load_from_memory(data) {
            return Err(AppError::validation(format!(
                "Invalid image file ({ext}): {e}"
            )));
        }

        let filename = format!("{}-{}.{}", field_name, Utc::now().timestamp_millis(), ext);
        let path = self.dir.join(&filename);
        fs::write(&path, data)
            .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

        tracing::info!(
            original_name = %original_name,
            stored = %filename,
            size = data.len(),
            "Picture uploaded"
        );

        Ok(filename)
    }
}

enum StoredFileResponse {
    Ok(String, Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for StoredFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            StoredFileResponse::Ok(content_type, content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            StoredFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            StoredFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve a stored picture
async fn serve_stored_file(
    State(state): State<ServerState>,
    UrlPath(filename): UrlPath<String>,
) -> StoredFileResponse {
    // Security check: prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return StoredFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.uploads.dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .to_string();
            StoredFileResponse::Ok(content_type, content.into())
        }
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Stored file not found");
            StoredFileResponse::NotFound
        }
    }
}

/// Public router for stored pictures
pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{filename}", get(serve_stored_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::new(2, 2);
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn resolver() -> (tempfile::TempDir, UploadResolver) {
        let dir = tempfile::tempdir().unwrap();
        let resolver = UploadResolver::new(dir.path(), "default.png").unwrap();
        (dir, resolver)
    }

    #[test]
    fn test_store_synthesizes_collision_free_name() {
        let (_dir, resolver) = resolver();
        let data = png_bytes();
        let name = resolver.store("profilePicture", "me.PNG", &data).unwrap();
        assert!(name.starts_with("profilePicture-"));
        assert!(name.ends_with(".png"));
        assert_eq!(fs::read(resolver.dir().join(&name)).unwrap(), data);
    }

    #[test]
    fn test_store_rejects_unsupported_extension() {
        let (_dir, resolver) = resolver();
        let err = resolver
            .store("profilePicture", "evil.exe", &png_bytes())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_store_rejects_non_image_bytes() {
        let (_dir, resolver) = resolver();
        let err = resolver
            .store("profilePicture", "fake.png", b"not an image")
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_store_rejects_empty_part() {
        let (_dir, resolver) = resolver();
        let err = resolver.store("profilePicture", "me.png", &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_default_picture_sentinel() {
        let (_dir, resolver) = resolver();
        assert_eq!(resolver.default_picture(), "default.png");
    }
}
