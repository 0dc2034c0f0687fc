//! Content digests used as rename-resistant file identity.
//!
//! A digest depends on a file's bytes only, never on its name, path or
//! timestamps, so the same bytes under a new name produce the same digest.
//! MD5 is used for speed; collisions within one folder are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read size for streaming large videos through the hasher.
const CHUNK_SIZE: usize = 64 * 1024;

/// Lowercase hex MD5 of a file's content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Compute the digest of in-memory content.
    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{:x}", md5::compute(content)))
    }

    /// Compute the digest of a file, streaming it in fixed-size chunks.
    pub async fn from_file(path: &Path) -> std::io::Result<Self> {
        let mut file = File::open(path).await?;
        let mut context = md5::Context::new();
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            let read = file.read(&mut buf).await?;
            if read == 0 {
                break;
            }
            context.consume(&buf[..read]);
        }

        Ok(Self(format!("{:x}", context.compute())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContentDigest {
    fn from(hex: String) -> Self {
        Self(hex)
    }
}
