//! Internal buffer management for streaming operations.
//!
//! This module provides a thread-local buffer pool so that hashing,
//! chunk production, and streaming copies do not allocate a fresh scratch
//! buffer per call. It is an implementation detail and not part of the
//! public API.

mod pool;

pub(crate) use pool::Buffer;
