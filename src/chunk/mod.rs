//! Chunk types.
//!
//! - [`Chunk`] - An ordered, bounded-size slice of payload content

mod data;

pub use data::Chunk;
