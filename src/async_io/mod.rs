//! Async adapters for payload streaming.
//!
//! This module provides runtime-agnostic async counterparts to the sync
//! core, built on `futures-io` traits so they work with tokio, async-std,
//! smol, and other runtimes:
//!
//! - [`chunk_stream`] - Fixed-size chunking `Stream` over any async reader
//! - [`Payload::write_to_async`](crate::Payload::write_to_async) - Streaming
//!   copy into any async sink
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;
mod write;

pub use stream::{ChunkStream, chunk_stream};
