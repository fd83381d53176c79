//! payloadrs
//!
//! Reusable binary payload abstraction for packetized uploads.
//!
//! `payloadrs` wraps an arbitrary byte source (an in-memory buffer or a
//! file on disk) in a [`Payload`] that a transport can consult and read
//! many times:
//!
//! - a stable 16-byte MD5 [`ContentDigest`] and a 64-bit size, for
//!   protocol negotiation and out-of-band integrity checks
//! - a lazy [`ChunkSession`] emitting fixed-maximum-size [`Chunk`]s for
//!   progressive transmission
//! - a direct streaming copy of the whole content into a sink through a
//!   pooled buffer
//!
//! The crate intentionally:
//! - does NOT decide chunk sizes (the caller supplies them)
//! - does NOT perform network I/O or retries
//! - does NOT encrypt, compress, or frame chunks
//! - does NOT cache content across instances
//!
//! # Sync
//!
//! ```no_run
//! use payloadrs::{Payload, PayloadError};
//!
//! fn main() -> Result<(), PayloadError> {
//!     let payload = Payload::from_file("image.png", false)?;
//!     println!("md5 {} over {} bytes", payload.digest(), payload.size()?);
//!
//!     let mut session = payload.chunk_session(8192)?;
//!     for chunk in &mut session {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes @ {}", chunk.len(), chunk.offset);
//!     }
//!     session.close()?;
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_io::AsyncWrite;
//! use payloadrs::{Payload, PayloadError};
//!
//! async fn upload<W: AsyncWrite + Unpin>(payload: &Payload, sink: &mut W) -> Result<(), PayloadError> {
//!     let written = payload.write_to_async(sink).await?;
//!     assert_eq!(written, payload.size()?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod digest;
mod error;
mod payload;
mod session;

mod buffer; // internal (thread-local reuse)
mod copy; // internal pooled streaming copy
mod hash; // internal md5 impl

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use digest::ContentDigest;
pub use error::PayloadError;
pub use payload::Payload;
pub use session::ChunkSession;

#[cfg(feature = "async-io")]
pub use async_io::{ChunkStream, chunk_stream};
