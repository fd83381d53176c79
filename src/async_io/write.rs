//! Async streaming copy into a `futures-io` sink.

use std::io::Read;

use futures_io::AsyncWrite;
use futures_util::io::AsyncWriteExt;

use crate::buffer::Buffer;
use crate::error::PayloadError;
use crate::payload::{Payload, SourceView, open_source};

impl Payload {
    /// Streams the entire content into an async sink and returns the byte
    /// count.
    ///
    /// Async counterpart of [`write_to`](Payload::write_to): opens its own
    /// independent read path, copies through one pooled buffer, writes in
    /// source order, and flushes the sink once after the last byte. The
    /// pooled buffer returns to the pool even when the copy fails or the
    /// future is dropped between writes.
    ///
    /// For file-backed payloads the source reads are blocking filesystem
    /// reads; run this future where blocking is acceptable (for example
    /// under tokio's `spawn_blocking`/`block_in_place`, or a
    /// blocking-friendly executor) so a slow disk cannot stall unrelated
    /// tasks on a cooperative executor. The sink writes and the final
    /// flush suspend normally.
    ///
    /// # Errors
    ///
    /// [`PayloadError::SourceUnavailable`] if the backing file cannot be
    /// opened, [`PayloadError::Io`] if a read or write fails mid-copy.
    pub async fn write_to_async<W: AsyncWrite + Unpin>(
        &self,
        sink: &mut W,
    ) -> Result<u64, PayloadError> {
        match self.source() {
            SourceView::Bytes(data) => {
                sink.write_all(data).await?;
                sink.flush().await?;
                Ok(data.len() as u64)
            }
            SourceView::File(path) => {
                let mut file = open_source(path)?;
                let mut buffer = Buffer::take();
                let mut copied: u64 = 0;

                loop {
                    let n = match file.read(buffer.as_mut_slice()) {
                        Ok(0) => break,
                        Ok(n) => n,
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    };
                    sink.write_all(&buffer.as_slice()[..n]).await?;
                    copied += n as u64;
                }

                sink.flush().await?;
                Ok(copied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::io::Cursor;

    #[tokio::test]
    async fn test_write_bytes_payload() {
        let payload = Payload::from_bytes(&b"hello async world"[..]);
        let mut sink = Cursor::new(Vec::new());

        let written = payload.write_to_async(&mut sink).await.unwrap();

        assert_eq!(written, 17);
        assert_eq!(sink.into_inner(), b"hello async world");
    }

    #[tokio::test]
    async fn test_write_file_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let data: Vec<u8> = (0..150_000).map(|i| (i % 256) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let payload = Payload::from_file(&path, false).unwrap();
        let mut sink = Cursor::new(Vec::new());

        let written = payload.write_to_async(&mut sink).await.unwrap();

        assert_eq!(written, data.len() as u64);
        assert_eq!(sink.into_inner(), data);
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.bin");
        std::fs::write(&path, b"data").unwrap();
        let payload = Payload::from_file(&path, false).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut sink = Cursor::new(Vec::new());
        assert!(matches!(
            payload.write_to_async(&mut sink).await,
            Err(PayloadError::SourceUnavailable { .. })
        ));
    }
}
