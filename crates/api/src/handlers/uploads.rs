//! Shared multipart upload plumbing.
//!
//! Uploaded files land under `{upload_dir}/{subdir}/{filename}` on local
//! disk and are referenced everywhere by their public URL path
//! (`/uploads/{subdir}/{filename}`), which `ServeDir` maps back to disk.

use axum::extract::Multipart;
use campus_core::error::CoreError;
use campus_core::uploads::validate_image_upload;

use crate::error::{AppError, AppResult};

/// A file field read out of a multipart body.
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Read the named file field from a multipart body. Unknown fields are
/// ignored; a missing field is a 400.
pub async fn read_file_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(UploadedFile {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }
    Err(AppError::BadRequest(format!(
        "Missing required '{field_name}' field"
    )))
}

/// Validate an image upload: declared type + size cap, then a header-only
/// decode to confirm the payload really is an image.
pub fn validate_image(file: &UploadedFile) -> AppResult<()> {
    validate_image_upload(&file.content_type, file.data.len())?;

    image::ImageReader::new(std::io::Cursor::new(&file.data))
        .with_guessed_format()
        .map_err(|e| AppError::BadRequest(format!("Unreadable image: {e}")))?
        .into_dimensions()
        .map_err(|_| {
            AppError::Core(CoreError::Validation(
                "File is not a decodable image".into(),
            ))
        })?;
    Ok(())
}

/// Write bytes to `{upload_dir}/{subdir}/{filename}`, creating the
/// directory as needed. Returns the public URL path.
pub async fn store_file(
    upload_dir: &str,
    subdir: &str,
    filename: &str,
    data: &[u8],
) -> AppResult<String> {
    let dir = std::path::Path::new(upload_dir).join(subdir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let path = dir.join(filename);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(format!("/uploads/{subdir}/{filename}"))
}

/// Best-effort removal of a previously stored file, given its public path.
/// Failure is logged, not surfaced: the database reference is the source
/// of truth and an orphaned file is harmless.
pub async fn remove_stored_file(upload_dir: &str, public_path: &str) {
    let Some(relative) = public_path.strip_prefix("/uploads/") else {
        return;
    };
    let disk_path = std::path::Path::new(upload_dir).join(relative);
    if let Err(e) = tokio::fs::remove_file(&disk_path).await {
        tracing::warn!(path = %disk_path.display(), error = %e, "Failed to remove uploaded file");
    }
}
