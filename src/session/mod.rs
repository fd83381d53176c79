//! Chunk sessions - lazy, scoped chunk production.
//!
//! A [`ChunkSession`] pairs a lazy sequence of [`Chunk`]s with an explicit
//! release operation. For file-backed payloads the session exclusively owns
//! one open read handle for its lifetime; [`ChunkSession::close`] closes
//! that handle and, when the payload was built with delete-on-release,
//! removes the backing file. Byte-backed sessions own nothing and close is
//! a no-op.
//!
//! Sessions are obtained from [`Payload::chunk_session`](crate::Payload::chunk_session).

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::{fs, mem};

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::error::PayloadError;

/// The source a session pulls its bytes from.
#[derive(Debug)]
pub(crate) enum SessionSource {
    /// Immutable in-memory content, sliced without copying.
    Bytes(Bytes),
    /// An exclusively owned read handle over a backing file.
    File {
        reader: File,
        path: PathBuf,
        delete_on_release: bool,
    },
}

/// A scoped producer of an ordered chunk sequence.
///
/// Implements `Iterator<Item = Result<Chunk, PayloadError>>`. Chunks are
/// produced on demand, strictly in increasing offset order, each carrying
/// up to the configured maximum number of bytes; only the final chunk may
/// be shorter. A zero-length source yields no chunks at all. After an I/O
/// error the iterator is fused and yields nothing further.
///
/// # Release
///
/// [`close`](ChunkSession::close) consumes the session, so pulling chunks
/// after release or releasing twice cannot compile. Dropping a session
/// without calling `close` still closes the file handle (when the handle
/// drops), but skips delete-on-release; the skipped deletion is logged at
/// `warn`. Callers wanting the deletion must call `close` on every path.
///
/// # Example
///
/// ```
/// use payloadrs::Payload;
///
/// # fn main() -> Result<(), payloadrs::PayloadError> {
/// let payload = Payload::from_bytes(&b"hello world"[..]);
/// let mut session = payload.chunk_session(4)?;
///
/// let mut assembled = Vec::new();
/// for chunk in &mut session {
///     assembled.extend_from_slice(&chunk?.data);
/// }
/// assert_eq!(assembled, b"hello world");
/// session.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChunkSession {
    source: SessionSource,
    max_chunk_size: usize,
    offset: u64,
    finished: bool,
    released: bool,
}

impl ChunkSession {
    /// Creates a session over a source.
    ///
    /// The chunk size is validated by the caller before the session exists.
    pub(crate) fn new(source: SessionSource, max_chunk_size: usize) -> Self {
        debug_assert!(max_chunk_size > 0);
        Self {
            source,
            max_chunk_size,
            offset: 0,
            finished: false,
            released: false,
        }
    }

    /// Returns the configured maximum chunk size.
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Returns the number of bytes produced so far.
    pub fn bytes_produced(&self) -> u64 {
        self.offset
    }

    /// Releases the session's resources.
    ///
    /// For file-backed sessions this closes the owned read handle and then,
    /// if the payload was constructed with delete-on-release, removes the
    /// backing file. The handle close and the deletion are two sequential
    /// effects: a deletion failure is reported as
    /// [`PayloadError::Deletion`] after the handle is already closed, and
    /// never invalidates chunks read before release. For byte-backed
    /// sessions this is a no-op.
    pub fn close(mut self) -> Result<(), PayloadError> {
        self.released = true;
        let source = mem::replace(&mut self.source, SessionSource::Bytes(Bytes::new()));
        if let SessionSource::File {
            reader,
            path,
            delete_on_release,
        } = source
        {
            // Close before unlink
            drop(reader);
            if delete_on_release {
                match fs::remove_file(&path) {
                    Ok(()) => {
                        log::debug!("deleted {} after chunk session release", path.display());
                    }
                    Err(e) => return Err(PayloadError::Deletion { path, source: e }),
                }
            }
        }
        Ok(())
    }

    /// Reads the next chunk from the file handle, filling up to the chunk
    /// boundary across short reads.
    fn next_file_chunk(reader: &mut File, max: usize) -> Result<Option<Bytes>, PayloadError> {
        let mut buf = vec![0u8; max];
        let mut filled = 0;

        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        buf.truncate(filled);
        Ok(Some(Bytes::from(buf)))
    }
}

impl Iterator for ChunkSession {
    type Item = Result<Chunk, PayloadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match &mut self.source {
            SessionSource::Bytes(data) => {
                let start = self.offset as usize;
                if start >= data.len() {
                    self.finished = true;
                    return None;
                }
                let end = usize::min(start + self.max_chunk_size, data.len());
                let chunk = Chunk::new(data.slice(start..end), self.offset);
                self.offset = end as u64;
                Some(Ok(chunk))
            }
            SessionSource::File { reader, .. } => {
                match Self::next_file_chunk(reader, self.max_chunk_size) {
                    Ok(None) => {
                        self.finished = true;
                        None
                    }
                    Ok(Some(data)) => {
                        let chunk = Chunk::new(data, self.offset);
                        self.offset += chunk.len() as u64;
                        // A short chunk means end-of-file
                        if chunk.len() < self.max_chunk_size {
                            self.finished = true;
                        }
                        Some(Ok(chunk))
                    }
                    Err(e) => {
                        self.finished = true;
                        Some(Err(e))
                    }
                }
            }
        }
    }
}

impl Drop for ChunkSession {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let SessionSource::File {
            path,
            delete_on_release: true,
            ..
        } = &self.source
        {
            log::warn!(
                "chunk session dropped without close; {} will not be deleted",
                path.display()
            );
        }
    }
}
