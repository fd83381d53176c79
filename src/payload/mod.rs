//! The Payload type - a read-many view over binary content.
//!
//! A [`Payload`] wraps either an immutable in-memory buffer or a path to a
//! backing file, and exposes the four operations a packetized uploader
//! needs: a stable content digest, the total size, a lazy
//! [`ChunkSession`], and a direct streaming copy into a sink.
//!
//! # Example
//!
//! ```
//! use payloadrs::Payload;
//!
//! # fn main() -> Result<(), payloadrs::PayloadError> {
//! let payload = Payload::from_bytes(&b"hello world"[..]);
//! assert_eq!(payload.size()?, 11);
//!
//! let mut sink = Vec::new();
//! let written = payload.write_to(&mut sink)?;
//! assert_eq!(written, 11);
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::copy::copy_to_sink;
use crate::digest::ContentDigest;
use crate::error::PayloadError;
use crate::hash::{Md5Hasher, digest_reader};
use crate::session::{ChunkSession, SessionSource};

/// The source variant backing a payload.
#[derive(Debug, Clone)]
enum Inner {
    /// Caller-owned immutable buffer; the digest covers exactly these bytes.
    Bytes { data: Bytes },
    /// Caller-owned path; every operation opens its own read handle.
    File {
        path: PathBuf,
        delete_on_release: bool,
    },
}

/// A reusable view over a byte sequence with a stable content digest.
///
/// Construct one with [`Payload::from_bytes`], [`Payload::from_file`], or
/// [`Payload::from_file_with_digest`]. The digest is fixed at construction
/// and never recomputed; the size of a file-backed payload is a live query
/// against the filesystem.
///
/// Every operation opens its own independent read path, so a payload can
/// be read many times, including concurrently - two simultaneous
/// [`write_to`](Payload::write_to) calls each deliver the full content to
/// their own sink. `Payload` is `Send + Sync` and cheap to clone.
#[derive(Debug, Clone)]
pub struct Payload {
    inner: Inner,
    digest: ContentDigest,
}

impl Payload {
    /// Creates a payload over an in-memory buffer.
    ///
    /// The digest is computed here, once, over the full buffer. The buffer
    /// must not be mutated for the payload's lifetime (enforced by
    /// [`Bytes`] being immutable). There is no resource to release;
    /// closing a session from this payload is a no-op.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let digest = Md5Hasher::hash(&data);
        Self {
            inner: Inner::Bytes { data },
            digest,
        }
    }

    /// Creates a payload over a file, hashing its contents now.
    ///
    /// Opens the file once and streams it through the hasher; each later
    /// operation opens its own independent handle, so the file is read once
    /// for hashing and once per use of the data. If the file is mutated
    /// between those opens, the frozen digest and the streamed bytes can
    /// diverge; this component does not lock against that.
    ///
    /// With `delete_on_release`, closing a chunk session from this payload
    /// also deletes the file.
    ///
    /// # Errors
    ///
    /// [`PayloadError::SourceUnavailable`] if the file cannot be opened,
    /// [`PayloadError::Io`] if hashing fails mid-read.
    pub fn from_file(
        path: impl Into<PathBuf>,
        delete_on_release: bool,
    ) -> Result<Self, PayloadError> {
        let path = path.into();
        let mut file = open_source(&path)?;
        let digest = digest_reader(&mut file)?;
        Ok(Self {
            inner: Inner::File {
                path,
                delete_on_release,
            },
            digest,
        })
    }

    /// Creates a payload over a file whose digest is already known.
    ///
    /// Identical to [`from_file`](Payload::from_file) except that the
    /// supplied digest is trusted as-is and the file is not read here,
    /// saving one full pass when the digest was computed earlier or came
    /// from a cache. No validation against the actual content is
    /// performed.
    pub fn from_file_with_digest(
        path: impl Into<PathBuf>,
        digest: ContentDigest,
        delete_on_release: bool,
    ) -> Self {
        Self {
            inner: Inner::File {
                path: path.into(),
                delete_on_release,
            },
            digest,
        }
    }

    /// Returns the content digest.
    ///
    /// Pure accessor; the value is identical for the payload's lifetime.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Returns the total byte length.
    ///
    /// Constant for byte-backed payloads. For file-backed payloads this
    /// queries the current file length, which may legitimately change if
    /// the file is mutated externally between calls; the digest does not
    /// follow it.
    ///
    /// # Errors
    ///
    /// [`PayloadError::SourceUnavailable`] if the file cannot be queried.
    pub fn size(&self) -> Result<u64, PayloadError> {
        match &self.inner {
            Inner::Bytes { data } => Ok(data.len() as u64),
            Inner::File { path, .. } => {
                let meta = fs::metadata(path).map_err(|e| PayloadError::SourceUnavailable {
                    path: path.clone(),
                    source: e,
                })?;
                Ok(meta.len())
            }
        }
    }

    /// Opens a new chunk session over the full content, starting at offset 0.
    ///
    /// Each call is independent: on a file-backed payload, two calls open
    /// two separate read handles that never interact. The session owns its
    /// handle until [`ChunkSession::close`].
    ///
    /// # Errors
    ///
    /// [`PayloadError::InvalidChunkSize`] if `max_chunk_size` is zero,
    /// [`PayloadError::SourceUnavailable`] if the backing file cannot be
    /// opened now.
    pub fn chunk_session(&self, max_chunk_size: usize) -> Result<ChunkSession, PayloadError> {
        if max_chunk_size == 0 {
            return Err(PayloadError::InvalidChunkSize);
        }
        let source = match &self.inner {
            Inner::Bytes { data } => SessionSource::Bytes(data.clone()),
            Inner::File {
                path,
                delete_on_release,
            } => SessionSource::File {
                reader: open_source(path)?,
                path: path.clone(),
                delete_on_release: *delete_on_release,
            },
        };
        Ok(ChunkSession::new(source, max_chunk_size))
    }

    /// Streams the entire content into `sink` and returns the byte count.
    ///
    /// Opens and fully consumes its own independent read path; an already
    /// open chunk session is unaffected. The sink is flushed once after
    /// the last byte. File-backed payloads are copied through one pooled
    /// buffer, which returns to the pool even when the copy fails.
    ///
    /// # Errors
    ///
    /// [`PayloadError::SourceUnavailable`] if the backing file cannot be
    /// opened, [`PayloadError::Io`] if a read or write fails mid-copy.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<u64, PayloadError> {
        match &self.inner {
            Inner::Bytes { data } => {
                sink.write_all(data)?;
                sink.flush()?;
                Ok(data.len() as u64)
            }
            Inner::File { path, .. } => {
                let mut file = open_source(path)?;
                copy_to_sink(&mut file, sink)
            }
        }
    }

    /// Returns the backing file path, if this payload is file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.inner {
            Inner::Bytes { .. } => None,
            Inner::File { path, .. } => Some(path),
        }
    }

    /// Returns a borrowed view of the backing source.
    #[cfg(feature = "async-io")]
    pub(crate) fn source(&self) -> SourceView<'_> {
        match &self.inner {
            Inner::Bytes { data } => SourceView::Bytes(data),
            Inner::File { path, .. } => SourceView::File(path),
        }
    }
}

/// A borrowed view of a payload's source, for crate-internal read paths.
#[cfg(feature = "async-io")]
pub(crate) enum SourceView<'a> {
    Bytes(&'a Bytes),
    File(&'a Path),
}

/// Opens the backing file, mapping failures to [`PayloadError::SourceUnavailable`].
pub(crate) fn open_source(path: &Path) -> Result<File, PayloadError> {
    File::open(path).map_err(|e| PayloadError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })
}
