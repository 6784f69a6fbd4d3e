//! Bpm file persistence
//!
//! The file holds nothing but the decimal text of the value, e.g. `72`.
//! Surrounding whitespace is tolerated on read; writes overwrite the whole
//! file without a trailing newline.

use std::path::PathBuf;
use crate::errors::SyncError;
use crate::Bpm;

/// Parse a bpm value from file contents or a header value.
///
/// Only plain ASCII digits are accepted; a sign of either kind is rejected.
pub fn parse_bpm(text: &str) -> Option<Bpm> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<Bpm>().ok()
}

#[derive(Debug, Clone)]
pub struct BpmFile {
    path: PathBuf,
}

impl BpmFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the current value.
    pub async fn read(&self) -> crate::Result<Bpm> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SyncError::FileAccess {
                path: self.path.clone(),
                source,
            })?;

        parse_bpm(&content).ok_or_else(|| SyncError::InvalidContent {
            path: self.path.clone(),
            content: content.trim().to_string(),
        })
    }

    /// Overwrite the file with `bpm`.
    pub async fn write(&self, bpm: Bpm) -> crate::Result<()> {
        tokio::fs::write(&self.path, bpm.to_string())
            .await
            .map_err(|source| SyncError::Persistence {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bpm() {
        assert_eq!(parse_bpm("72"), Some(72));
        assert_eq!(parse_bpm("  88\r\n"), Some(88));
        assert_eq!(parse_bpm("0"), Some(0));
        assert_eq!(parse_bpm("abc"), None);
        assert_eq!(parse_bpm(""), None);
        assert_eq!(parse_bpm("-5"), None);
        assert_eq!(parse_bpm("7 2"), None);
        assert_eq!(parse_bpm("+5"), None);
        assert_eq!(parse_bpm(" +72\n"), None);
        assert_eq!(parse_bpm("4294967296"), None);
    }

    #[tokio::test]
    async fn test_read_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heartrate.txt");
        std::fs::write(&path, "\n 64 \n").unwrap();

        let file = BpmFile::new(&path);
        assert_eq!(file.read().await.unwrap(), 64);
    }

    #[tokio::test]
    async fn test_read_signed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heartrate.txt");
        std::fs::write(&path, "+5").unwrap();

        let err = BpmFile::new(&path).read().await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidContent { ref content, .. } if content == "+5"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = BpmFile::new(dir.path().join("missing.txt"));

        let err = file.read().await.unwrap_err();
        assert!(matches!(err, SyncError::FileAccess { .. }));
    }

    #[tokio::test]
    async fn test_read_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heartrate.txt");
        std::fs::write(&path, "not a number").unwrap();

        let err = BpmFile::new(&path).read().await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidContent { ref content, .. } if content == "not a number"));
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heartrate.txt");
        std::fs::write(&path, "123456789").unwrap();

        let file = BpmFile::new(&path);
        file.write(75).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "75");
        assert_eq!(file.read().await.unwrap(), 75);
    }

    #[tokio::test]
    async fn test_write_into_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = BpmFile::new(dir.path().join("nope").join("heartrate.txt"));

        let err = file.write(70).await.unwrap_err();
        assert!(matches!(err, SyncError::Persistence { .. }));
    }
}
