//! Upload constraints: MIME allow-lists and byte caps.
//!
//! Files land on local disk under a predictable path convention and are
//! referenced by path string; there is no content-addressing. Enforcement
//! is limited to these allow-lists and size caps (plus an image
//! header-decode sanity check in the API layer).

use crate::error::CoreError;

/// Maximum accepted image upload (profile avatars, category images): 5 MB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum accepted lesson video upload: 500 MB.
pub const MAX_VIDEO_BYTES: usize = 500 * 1024 * 1024;

/// Accepted image content types.
pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Accepted video file extensions.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Validate an image upload's declared content type and size.
pub fn validate_image_upload(content_type: &str, len: usize) -> Result<(), CoreError> {
    if !IMAGE_CONTENT_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Unsupported image type '{content_type}'. Supported: {}",
            IMAGE_CONTENT_TYPES.join(", ")
        )));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "Image exceeds the {} MB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Validate a video upload's filename extension and size.
pub fn validate_video_upload(filename: &str, len: usize) -> Result<(), CoreError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if !VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported video format '.{ext}'. Supported: .mp4, .webm, .mov"
        )));
    }
    if len > MAX_VIDEO_BYTES {
        return Err(CoreError::Validation(format!(
            "Video exceeds the {} MB limit",
            MAX_VIDEO_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// File extension for an accepted image content type.
pub fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_image_types() {
        for ct in IMAGE_CONTENT_TYPES {
            assert!(validate_image_upload(ct, 1024).is_ok());
        }
    }

    #[test]
    fn test_rejected_image_type() {
        let err = validate_image_upload("image/gif", 1024).unwrap_err();
        assert!(err.to_string().contains("Unsupported image type"));
    }

    #[test]
    fn test_image_size_cap() {
        assert!(validate_image_upload("image/png", MAX_IMAGE_BYTES).is_ok());
        assert!(validate_image_upload("image/png", MAX_IMAGE_BYTES + 1).is_err());
    }

    #[test]
    fn test_video_extension_check_is_case_insensitive() {
        assert!(validate_video_upload("intro.MP4", 1024).is_ok());
        assert!(validate_video_upload("intro.webm", 1024).is_ok());
        assert!(validate_video_upload("intro.avi", 1024).is_err());
        assert!(validate_video_upload("no-extension", 1024).is_err());
    }

    #[test]
    fn test_video_size_cap() {
        assert!(validate_video_upload("a.mp4", MAX_VIDEO_BYTES).is_ok());
        assert!(validate_video_upload("a.mp4", MAX_VIDEO_BYTES + 1).is_err());
    }

    #[test]
    fn test_image_extension_mapping() {
        assert_eq!(image_extension("image/png"), "png");
        assert_eq!(image_extension("image/jpeg"), "jpg");
        assert_eq!(image_extension("image/webp"), "webp");
    }
}
