//! File Upload Guard
//!
//! Checks a file's size against the client cap before reading it, then reads
//! it once as text.

use std::path::Path;

use thiserror::Error;

/// A file that passed the size check and was read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File {name} is too large ({size} bytes, max {max} bytes)")]
    TooLarge { name: String, size: u64, max: u64 },

    #[error("Failed to read file")]
    Read(#[from] std::io::Error),
}

/// Decimal megabytes with one decimal, e.g. `2_000_000` -> `"2.0 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
}

/// Read `path` as text when its size is at most `max_bytes`.
///
/// The size comes from file metadata, so an oversized file is never read.
/// Invalid UTF-8 is replaced rather than rejected.
pub async fn read_upload(path: &Path, max_bytes: u64) -> Result<UploadedFile, UploadError> {
    let metadata = tokio::fs::metadata(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if metadata.len() > max_bytes {
        return Err(UploadError::TooLarge {
            name,
            size: metadata.len(),
            max: max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(UploadedFile {
        name,
        size: bytes.len() as u64,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CAP: u64 = 2_000_000;

    fn file_of(len: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![b'a'; len]).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_exactly_at_cap_is_accepted() {
        let file = file_of(2_000_000);
        let upload = read_upload(file.path(), CAP).await.unwrap();
        assert_eq!(upload.size, 2_000_000);
        assert_eq!(upload.text.len(), 2_000_000);
    }

    #[tokio::test]
    async fn test_one_byte_over_cap_is_rejected() {
        let file = file_of(2_000_001);
        match read_upload(file.path(), CAP).await {
            Err(UploadError::TooLarge { size, max, .. }) => {
                assert_eq!(size, 2_000_001);
                assert_eq!(max, CAP);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_upload(&dir.path().join("nope.rs"), CAP)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Read(_)));
        assert_eq!(err.to_string(), "Failed to read file");
    }

    #[tokio::test]
    async fn test_name_is_file_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();

        let upload = read_upload(&path, CAP).await.unwrap();
        assert_eq!(upload.name, "main.rs");
        assert_eq!(upload.text, "fn main() {}\n");
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(2_000_000), "2.0 MB");
        assert_eq!(format_megabytes(1_500_000), "1.5 MB");
    }
}
