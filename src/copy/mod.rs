//! Internal streaming copy between a reader and a sink.
//!
//! The shared algorithm behind [`Payload::write_to`](crate::Payload::write_to):
//! one pooled buffer, a read/write loop until end-of-source, one flush.
//! It is an implementation detail and not part of the public API.

use std::io::{Read, Write};

use crate::buffer::Buffer;
use crate::error::PayloadError;

/// Copies a reader into a sink through one pooled buffer.
///
/// Writes exactly the bytes read, in source order, stops on a zero read,
/// flushes the sink once, and returns the accumulated byte count. The
/// pooled buffer is released on every exit path, including mid-copy
/// errors.
pub(crate) fn copy_to_sink<R: Read, W: Write>(
    reader: &mut R,
    sink: &mut W,
) -> Result<u64, PayloadError> {
    let mut buffer = Buffer::take();
    let mut copied: u64 = 0;

    loop {
        let n = match reader.read(buffer.as_mut_slice()) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        sink.write_all(&buffer.as_slice()[..n])?;
        copied += n as u64;
    }

    sink.flush()?;
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_round_trip() {
        let data: Vec<u8> = (0..200_000).map(|i| (i % 256) as u8).collect();
        let mut sink = Vec::new();

        let copied = copy_to_sink(&mut Cursor::new(&data), &mut sink).unwrap();

        assert_eq!(copied, data.len() as u64);
        assert_eq!(sink, data);
    }

    #[test]
    fn test_copy_empty() {
        let mut sink = Vec::new();
        let copied = copy_to_sink(&mut Cursor::new(&[] as &[u8]), &mut sink).unwrap();
        assert_eq!(copied, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        struct InterruptingReader {
            data: Cursor<Vec<u8>>,
            interrupts_left: usize,
        }

        impl Read for InterruptingReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.interrupts_left > 0 {
                    self.interrupts_left -= 1;
                    return Err(std::io::Error::from(std::io::ErrorKind::Interrupted));
                }
                self.data.read(buf)
            }
        }

        let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();
        let mut reader = InterruptingReader {
            data: Cursor::new(data.clone()),
            interrupts_left: 3,
        };
        let mut sink = Vec::new();

        let copied = copy_to_sink(&mut reader, &mut sink).unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(sink, data);
    }

    #[test]
    fn test_read_error_propagates() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let mut sink = Vec::new();
        let err = copy_to_sink(&mut FailingReader, &mut sink).unwrap_err();
        assert!(matches!(err, PayloadError::Io(_)));
    }
}
