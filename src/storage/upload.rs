//! Filesystem store for uploaded post images.
//!
//! Files live flat under the configured upload directory and are served
//! back as static assets at `/uploads/{name}`. Stored names are prefixed
//! with a random id so concurrent uploads of the same client filename
//! cannot clobber each other.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// URL prefix the upload directory is served under.
pub const URL_PREFIX: &str = "/uploads";

/// Error type for upload operations.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

/// Strip any path components from a client-supplied file name.
///
/// Rejects empty names and names that are nothing but path syntax; the
/// result is always a single normal component.
fn sanitize_name(name: &str) -> Result<String, UploadError> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    if base.is_empty() || base == "." || base == ".." {
        return Err(UploadError::InvalidName(name.to_string()));
    }

    Ok(base)
}

fn upload_path(upload_dir: &Path, stored_name: &str) -> PathBuf {
    upload_dir.join(stored_name)
}

/// Initialize the upload directory.
///
/// Creates the directory if it doesn't exist.
pub async fn init_storage(upload_dir: &Path) -> Result<(), UploadError> {
    fs::create_dir_all(upload_dir).await?;
    Ok(())
}

/// Write an uploaded file to disk and return its stored name.
///
/// Uses atomic write (write to temp file, then rename) so a concurrent
/// static-file read never observes a partial file.
pub async fn save_upload(
    upload_dir: &Path,
    original_name: &str,
    content: &[u8],
) -> Result<String, UploadError> {
    let base = sanitize_name(original_name)?;
    let stored_name = format!("{}_{}", nanoid::nanoid!(8), base);
    let path = upload_path(upload_dir, &stored_name);

    // Write to temp file first (atomic)
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(content).await?;
    file.sync_all().await?;

    // Rename to final path (atomic on most filesystems)
    fs::rename(&temp_path, &path).await?;

    Ok(stored_name)
}

/// Delete a stored file.
///
/// Returns true if the file was deleted, false if it didn't exist.
pub async fn delete_upload(upload_dir: &Path, stored_name: &str) -> Result<bool, UploadError> {
    // Stored names were produced by save_upload; re-check anyway so a
    // corrupt url column can't reach outside the upload directory.
    let base = sanitize_name(stored_name)?;
    let path = upload_path(upload_dir, &base);

    match fs::remove_file(&path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(UploadError::Io(e)),
    }
}

/// Public URL for a stored file name.
pub fn public_url(stored_name: &str) -> String {
    format!("{}/{}", URL_PREFIX, stored_name)
}

/// Stored file name from a public URL, if it is one of ours.
pub fn stored_name_from_url(url: &str) -> Option<&str> {
    url.strip_prefix(URL_PREFIX)?.strip_prefix('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_read_delete() {
        let temp_dir = TempDir::new().unwrap();
        let upload_dir = temp_dir.path();

        init_storage(upload_dir).await.unwrap();

        let stored = save_upload(upload_dir, "photo.png", b"image bytes")
            .await
            .unwrap();
        assert!(stored.ends_with("_photo.png"));

        let content = fs::read(upload_dir.join(&stored)).await.unwrap();
        assert_eq!(content, b"image bytes");

        let deleted = delete_upload(upload_dir, &stored).await.unwrap();
        assert!(deleted);

        // Delete again (should return false)
        let deleted = delete_upload(upload_dir, &stored).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_same_name_does_not_clobber() {
        let temp_dir = TempDir::new().unwrap();
        let upload_dir = temp_dir.path();

        init_storage(upload_dir).await.unwrap();

        let first = save_upload(upload_dir, "photo.png", b"one").await.unwrap();
        let second = save_upload(upload_dir, "photo.png", b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read(upload_dir.join(&first)).await.unwrap(), b"one");
        assert_eq!(fs::read(upload_dir.join(&second)).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_path_components_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let upload_dir = temp_dir.path();

        init_storage(upload_dir).await.unwrap();

        let stored = save_upload(upload_dir, "../../etc/passwd", b"data")
            .await
            .unwrap();
        assert!(stored.ends_with("_passwd"));
        assert!(upload_dir.join(&stored).exists());
    }

    #[tokio::test]
    async fn test_invalid_names_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let upload_dir = temp_dir.path();

        for name in ["", "   ", "..", "/", "a/.."] {
            let result = save_upload(upload_dir, name, b"data").await;
            assert!(
                matches!(result, Err(UploadError::InvalidName(_))),
                "expected rejection for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_url_roundtrip() {
        let url = public_url("abc123_photo.png");
        assert_eq!(url, "/uploads/abc123_photo.png");
        assert_eq!(stored_name_from_url(&url), Some("abc123_photo.png"));
        assert_eq!(stored_name_from_url("/elsewhere/x.png"), None);
    }
}
