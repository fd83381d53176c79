//! Async stream adapter for fixed-size chunking.
//!
//! Splits any [`futures_io::AsyncRead`] into in-order, fixed-maximum-size
//! chunks. The stream is lazy; a transport applies backpressure simply by
//! not polling for the next chunk.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::error::PayloadError;

/// Read granularity into the pending buffer.
const READ_SIZE: usize = 8192;

pin_project! {
    /// A stream that yields fixed-size chunks from an async reader.
    ///
    /// Uses `futures_io::AsyncRead`, so it is runtime-agnostic. Chunks are
    /// emitted strictly in increasing offset order; every chunk except
    /// possibly the last carries exactly the configured maximum, and an
    /// empty reader yields no chunks. After an I/O error the stream is
    /// fused.
    ///
    /// # Example
    ///
    /// ```
    /// use futures_util::StreamExt;
    /// use payloadrs::chunk_stream;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), payloadrs::PayloadError> {
    /// let reader: &[u8] = b"hello world";
    /// let mut stream = chunk_stream(reader, 4)?;
    ///
    /// let mut assembled = Vec::new();
    /// while let Some(chunk) = stream.next().await {
    ///     assembled.extend_from_slice(&chunk?.data);
    /// }
    /// assert_eq!(assembled, b"hello world");
    /// # Ok(())
    /// # }
    /// ```
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        max_chunk_size: usize,
        buffer: Vec<u8>,
        pending: Vec<u8>,
        offset: u64,
        finished: bool,
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, PayloadError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            // Emit whole chunks from pending data first
            if this.pending.len() >= *this.max_chunk_size {
                let chunk = emit_chunk(this.pending, this.offset, *this.max_chunk_size);
                return Poll::Ready(Some(Ok(chunk)));
            }

            let buf = &mut this.buffer[..];
            match this.reader.as_mut().poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(PayloadError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    // End of stream - emit the short final chunk if any
                    *this.finished = true;
                    if this.pending.is_empty() {
                        return Poll::Ready(None);
                    }
                    let len = this.pending.len();
                    let chunk = emit_chunk(this.pending, this.offset, len);
                    return Poll::Ready(Some(Ok(chunk)));
                }
                Poll::Ready(Ok(n)) => {
                    this.pending.extend_from_slice(&this.buffer[..n]);
                }
            }
        }
    }
}

/// Extracts the leading `len` bytes of the pending buffer as a chunk and
/// advances the offset.
fn emit_chunk(pending: &mut Vec<u8>, offset: &mut u64, len: usize) -> Chunk {
    let data = Bytes::copy_from_slice(&pending[..len]);
    let chunk_offset = *offset;

    // Keep any remaining data
    if len < pending.len() {
        pending.copy_within(len.., 0);
        pending.truncate(pending.len() - len);
    } else {
        pending.clear();
    }

    *offset += len as u64;
    Chunk::new(data, chunk_offset)
}

/// Creates a fixed-size chunk stream from an async reader.
///
/// # Errors
///
/// [`PayloadError::InvalidChunkSize`] if `max_chunk_size` is zero.
///
/// # Runtime compatibility
///
/// For tokio readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = payloadrs::chunk_stream(file.compat(), 8192)?;
/// ```
pub fn chunk_stream<R: AsyncRead>(
    reader: R,
    max_chunk_size: usize,
) -> Result<ChunkStream<R>, PayloadError> {
    if max_chunk_size == 0 {
        return Err(PayloadError::InvalidChunkSize);
    }
    Ok(ChunkStream {
        reader,
        max_chunk_size,
        buffer: vec![0u8; READ_SIZE],
        pending: Vec::with_capacity(max_chunk_size.min(READ_SIZE)),
        offset: 0,
        finished: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_empty_reader_yields_no_chunks() {
        let reader: &[u8] = &[];
        let stream = chunk_stream(reader, 16).unwrap();
        let chunks: Vec<_> = stream.collect().await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_chunk_sizes_and_order() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();
        let stream = chunk_stream(&data[..], 4096).unwrap();

        let chunks: Vec<Chunk> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 4096);
        assert_eq!(chunks[1].len(), 4096);
        assert_eq!(chunks[2].len(), 10_000 - 2 * 4096);

        let mut assembled = Vec::new();
        for chunk in &chunks {
            assert_eq!(chunk.offset, assembled.len() as u64);
            assembled.extend_from_slice(&chunk.data);
        }
        assert_eq!(assembled, data);
    }

    #[tokio::test]
    async fn test_read_error_fuses_stream() {
        struct FailingReader;

        impl AsyncRead for FailingReader {
            fn poll_read(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
                _buf: &mut [u8],
            ) -> Poll<std::io::Result<usize>> {
                Poll::Ready(Err(std::io::Error::new(std::io::ErrorKind::Other, "boom")))
            }
        }

        let mut stream = chunk_stream(FailingReader, 16).unwrap();

        assert!(matches!(
            stream.next().await,
            Some(Err(PayloadError::Io(_)))
        ));
        assert!(
            stream.next().await.is_none(),
            "stream must yield nothing after an error"
        );
    }

    #[tokio::test]
    async fn test_zero_chunk_size_rejected() {
        let reader: &[u8] = b"data";
        assert!(matches!(
            chunk_stream(reader, 0),
            Err(PayloadError::InvalidChunkSize)
        ));
    }
}
