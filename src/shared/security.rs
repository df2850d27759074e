use crate::shared::error::IqServerError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum config file size (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum length accepted for an identifier used as a URL path segment or file name
const MAX_SEGMENT_LENGTH: usize = 255;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file no larger than `max_size`
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `max_size` bytes
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(())
}

/// Validates an identifier before it is placed into a URL path or a file name
///
/// Application public IDs and report IDs come from the server, but they end up
/// in request paths and archive file names, so they must stay a single segment.
pub fn validate_path_segment(value: &str, kind: &str) -> std::result::Result<(), IqServerError> {
    let reject = |reason: &str| IqServerError::InvalidPathSegment {
        kind: kind.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(reject("empty"));
    }
    if value.len() > MAX_SEGMENT_LENGTH {
        return Err(reject("too long"));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(reject("contains path separators"));
    }
    if value.contains("..") {
        return Err(reject("contains '..'"));
    }
    if value.chars().any(char::is_control) {
        return Err(reject("contains control characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "test").unwrap();

        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[test]
    fn test_validate_not_symlink_nonexistent() {
        let path = PathBuf::from("/nonexistent/file.txt");
        assert!(validate_not_symlink(&path, "write").is_err());
    }

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.yml");
        fs::write(&file_path, "server_url: https://iq").unwrap();

        assert!(validate_regular_file(&file_path, "config file", MAX_CONFIG_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "config file", MAX_CONFIG_FILE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.yml");
        fs::write(&file_path, "0123456789").unwrap();

        let result = validate_regular_file(&file_path, "config file", 4);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_validate_path_segment_accepts_ids() {
        assert!(validate_path_segment("my-app_01", "publicId").is_ok());
        assert!(validate_path_segment("3f2a9c0d1e", "reportId").is_ok());
    }

    #[test]
    fn test_validate_path_segment_rejects_traversal() {
        assert!(validate_path_segment("../etc", "publicId").is_err());
        assert!(validate_path_segment("a/b", "publicId").is_err());
        assert!(validate_path_segment("a\\b", "publicId").is_err());
        assert!(validate_path_segment("", "reportId").is_err());
    }

    #[test]
    fn test_validate_path_segment_error_message() {
        let err = validate_path_segment("a/b", "reportId").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("reportId"));
        assert!(msg.contains("path separators"));
    }
}
