//! Content digest type.
//!
//! - [`ContentDigest`] - 16-byte MD5 content fingerprint

use std::fmt;
use std::hash::{Hash as StdHash, Hasher};

/// A fixed-size digest identifying the full content of a payload.
///
/// This is a thin wrapper around a 16-byte array (MD5 digest). It is
/// computed at most once per payload and never changes afterwards, even
/// when a file-backed source is mutated externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentDigest([u8; 16]);

impl ContentDigest {
    /// The size of the digest in bytes.
    pub const SIZE: usize = 16;

    /// Creates a new digest from a byte array.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a new digest from a slice.
    ///
    /// Returns `None` if the slice is not exactly 16 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != Self::SIZE {
            return None;
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Returns the digest as a byte slice.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the digest as a hex string.
    pub fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut result = String::with_capacity(Self::SIZE * 2);
        for byte in &self.0 {
            result.push(HEX[(byte >> 4) as usize] as char);
            result.push(HEX[(byte & 0xf) as usize] as char);
        }
        result
    }

    /// Creates a digest from a hex string.
    ///
    /// Returns `None` if the string is not valid hex or not exactly 32
    /// characters.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        if hex_str.len() != Self::SIZE * 2 {
            return None;
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let byte_str = hex_str.get(i * 2..i * 2 + 2)?;
            *byte = u8::from_str_radix(byte_str, 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl AsRef<[u8]> for ContentDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 16]> for ContentDigest {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl StdHash for ContentDigest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.0);
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let bytes = [0u8; 16];
        let digest = ContentDigest::new(bytes);
        assert_eq!(digest.as_bytes(), &bytes);
    }

    #[test]
    fn test_from_slice() {
        let bytes = vec![0u8; 16];
        let digest = ContentDigest::from_slice(&bytes).unwrap();
        assert_eq!(digest.as_bytes().as_ref(), bytes.as_slice());

        // Wrong size
        assert!(ContentDigest::from_slice(&[0u8; 15]).is_none());
        assert!(ContentDigest::from_slice(&[0u8; 17]).is_none());
    }

    #[test]
    fn test_hex_round_trip() {
        let bytes = [0xABu8; 16];
        let digest = ContentDigest::new(bytes);
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 32);
        assert_eq!(ContentDigest::from_hex(&hex), Some(digest));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(ContentDigest::from_hex("zz").is_none());
        assert!(ContentDigest::from_hex(&"g".repeat(32)).is_none());
    }

    #[test]
    fn test_display() {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
        let digest = ContentDigest::new(bytes);
        assert!(digest.to_string().starts_with("0123456789abcdef"));
    }
}
