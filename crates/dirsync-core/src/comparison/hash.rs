//! File hashing for content verification using SHA-256

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, SyncError};

/// Read chunk size for streaming digests
const CHUNK_SIZE: usize = 8192;

/// SHA-256 digest of a file's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileDigest([u8; 32]);

impl FileDigest {
    /// Raw digest bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// File hasher
pub struct FileHasher;

impl FileHasher {
    /// Compute SHA-256 hash of a file by streaming its contents
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn hash(path: &Path) -> Result<FileDigest> {
        let file = File::open(path).map_err(|e| SyncError::io(path, e))?;

        let mut reader = BufReader::new(file);
        let mut hasher = Sha256::new();
        let mut buffer = [0; CHUNK_SIZE];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| SyncError::io(path, e))?;

            if bytes_read == 0 {
                break;
            }

            hasher.update(&buffer[..bytes_read]);
        }

        Ok(FileDigest(hasher.finalize().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hash_identical_files() {
        let tmp = TempDir::new().unwrap();
        let file1 = tmp.path().join("file1.txt");
        let file2 = tmp.path().join("file2.txt");

        fs::write(&file1, "same content").unwrap();
        fs::write(&file2, "same content").unwrap();

        let hash1 = FileHasher::hash(&file1).unwrap();
        let hash2 = FileHasher::hash(&file2).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_different_files() {
        let tmp = TempDir::new().unwrap();
        let file1 = tmp.path().join("file1.txt");
        let file2 = tmp.path().join("file2.txt");

        fs::write(&file1, "content 1").unwrap();
        fs::write(&file2, "content 2").unwrap();

        let hash1 = FileHasher::hash(&file1).unwrap();
        let hash2 = FileHasher::hash(&file2).unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_spans_multiple_chunks() {
        let tmp = TempDir::new().unwrap();
        let file1 = tmp.path().join("a.bin");
        let file2 = tmp.path().join("b.bin");

        let mut content = vec![7u8; CHUNK_SIZE * 3 + 17];
        fs::write(&file1, &content).unwrap();
        // Differ only in the final partial chunk
        *content.last_mut().unwrap() = 8;
        fs::write(&file2, &content).unwrap();

        assert_ne!(
            FileHasher::hash(&file1).unwrap(),
            FileHasher::hash(&file2).unwrap()
        );
    }

    #[test]
    fn test_empty_file_digest_hex() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("empty.txt");
        fs::write(&file, "").unwrap();

        let digest = FileHasher::hash(&file).unwrap();
        assert_eq!(
            digest.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.txt");

        let err = FileHasher::hash(&missing).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert_eq!(err.path(), missing.as_path());
    }
}
