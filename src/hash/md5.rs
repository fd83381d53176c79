//! MD5-based content hashing implementation.

use std::io::Read;

use md5::{Digest, Md5};

use crate::buffer::Buffer;
use crate::digest::ContentDigest;
use crate::error::PayloadError;

/// A hasher that computes MD5 digests.
#[derive(Debug, Clone)]
pub struct Md5Hasher {
    state: Md5,
}

impl Md5Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self { state: Md5::new() }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the digest.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest::new(self.state.finalize().into())
    }

    /// Convenience method to hash data in one shot.
    pub fn hash(data: &[u8]) -> ContentDigest {
        ContentDigest::new(Md5::digest(data).into())
    }
}

impl Default for Md5Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashes the full contents of a reader, streaming through a pooled buffer.
///
/// Reads until end-of-source. The buffer returns to the pool on every exit
/// path, including read errors.
pub fn digest_reader<R: Read>(reader: &mut R) -> Result<ContentDigest, PayloadError> {
    let mut buffer = Buffer::take();
    let mut hasher = Md5Hasher::new();

    loop {
        let n = match reader.read(buffer.as_mut_slice()) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buffer.as_slice()[..n]);
    }

    Ok(hasher.finalize())
}
