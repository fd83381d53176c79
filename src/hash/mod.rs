//! MD5 hashing for payload identity.
//!
//! This module computes the 16-byte content digest of a payload, either
//! from an in-memory buffer or by streaming a reader through a pooled
//! buffer. It is an implementation detail; callers only see the resulting
//! [`ContentDigest`](crate::ContentDigest).

mod md5;

pub(crate) use md5::{Md5Hasher, digest_reader};
