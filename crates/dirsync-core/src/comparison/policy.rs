//! Update policy for files present on both sides

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::signature::FileSignature;
use crate::error::{Result, SyncError};
use crate::options::SyncOptions;

const CHUNK_SIZE: usize = 8192;

/// Decides whether a common file is copied from the source side of a pass
/// to the target side.
///
/// The pass direction alone picks which side wins. There is no newest-wins
/// arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Always copy
    Force,
    /// Copy when the bytes differ
    Content,
    /// Copy when size or modification time differ.
    ///
    /// Heuristic: misses edits that leave the signature unchanged and
    /// recopies identical files whose timestamps differ.
    Shallow,
}

impl UpdatePolicy {
    /// Pick the policy implied by the options
    #[must_use]
    pub const fn from_options(options: &SyncOptions) -> Self {
        if options.force_copy {
            Self::Force
        } else if options.use_content {
            Self::Content
        } else {
            Self::Shallow
        }
    }

    /// Whether `target` should be overwritten with `source`
    ///
    /// # Errors
    ///
    /// Returns an error if either file's metadata or contents cannot be read.
    pub fn should_update(self, source: &Path, target: &Path) -> Result<bool> {
        match self {
            Self::Force => Ok(true),
            Self::Content => contents_differ(source, target),
            Self::Shallow => {
                Ok(FileSignature::read(source)? != FileSignature::read(target)?)
            }
        }
    }
}

/// Byte-for-byte comparison, short-circuiting on a size difference
fn contents_differ(left: &Path, right: &Path) -> Result<bool> {
    if FileSignature::read(left)?.size != FileSignature::read(right)?.size {
        return Ok(true);
    }

    let mut left_reader =
        BufReader::new(File::open(left).map_err(|e| SyncError::io(left, e))?);
    let mut right_reader =
        BufReader::new(File::open(right).map_err(|e| SyncError::io(right, e))?);

    let mut left_buf = [0u8; CHUNK_SIZE];
    let mut right_buf = [0u8; CHUNK_SIZE];

    loop {
        let n = read_full(&mut left_reader, &mut left_buf).map_err(|e| SyncError::io(left, e))?;
        let m =
            read_full(&mut right_reader, &mut right_buf).map_err(|e| SyncError::io(right, e))?;

        if n != m || left_buf[..n] != right_buf[..m] {
            return Ok(true);
        }
        if n == 0 {
            return Ok(false);
        }
    }
}

/// Fill `buf` as far as the reader allows, so chunk boundaries line up
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
