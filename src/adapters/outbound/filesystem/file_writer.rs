use crate::shared::error::ReportError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates `dir` (and its parents) if needed and rejects symlinked directories
///
/// # Errors
/// Returns `ReportError::OutputDirectoryError` if the directory cannot be
/// created or is not a real directory
pub fn prepare_output_directory(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ReportError::OutputDirectoryError {
        path: dir.to_path_buf(),
        details: e.to_string(),
    })?;

    validate_not_symlink(dir, "write").map_err(|e| ReportError::OutputDirectoryError {
        path: dir.to_path_buf(),
        details: e.to_string(),
    })?;

    if !dir.is_dir() {
        return Err(ReportError::OutputDirectoryError {
            path: dir.to_path_buf(),
            details: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(dir.to_path_buf())
}

/// FileSystemWriter writes one output file with the security checks
/// shared by every file-producing adapter
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(ReportError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects an existing output path that is a symbolic link
    fn validate_output_security(&self) -> Result<()> {
        if fs::symlink_metadata(&self.output_path).is_ok() {
            validate_not_symlink(&self.output_path, "write").map_err(|e| {
                ReportError::FileWriteError {
                    path: self.output_path.clone(),
                    details: e.to_string(),
                }
            })?;
        }
        Ok(())
    }

    /// Writes `content`, replacing any previous file
    pub fn write(&self, content: &[u8]) -> Result<()> {
        self.validate_parent_directory()?;
        self.validate_output_security()?;

        fs::write(&self.output_path, content).map_err(|e| ReportError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        tracing::debug!(path = %self.output_path.display(), bytes = content.len(), "file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.csv");

        let writer = FileSystemWriter::new(output_path.clone());
        writer.write(b"a,b\n1,2\n").unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn test_file_writer_parent_directory_not_found() {
        let writer = FileSystemWriter::new(PathBuf::from("/nonexistent/directory/output.csv"));
        let result = writer.write(b"test content");

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Parent directory does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.csv");
        fs::write(&target, "original").unwrap();
        let link = temp_dir.path().join("link.csv");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = FileSystemWriter::new(link).write(b"overwritten");

        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("symbolic link"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[test]
    fn test_prepare_output_directory_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let prepared = prepare_output_directory(&nested).unwrap();

        assert!(prepared.is_dir());
    }

    #[test]
    fn test_prepare_output_directory_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("file.txt");
        fs::write(&file_path, "x").unwrap();

        let result = prepare_output_directory(&file_path);

        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Cannot prepare output directory"));
    }
}
