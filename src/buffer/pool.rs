//! Thread-local buffer pool for efficient memory reuse.

use std::cell::RefCell;

/// Capacity of pooled buffers.
pub const BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable fixed-capacity read scratch buffer.
///
/// Acquired with [`Buffer::take`] and returned to the pool on drop, so a
/// buffer is released on every exit path, including error propagation.
/// Pools are per-thread; concurrent streaming operations never contend.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if let Some(data) = pool.pop() {
                Self { data }
            } else {
                Self {
                    data: vec![0u8; BUFFER_SIZE],
                }
            }
        })
    }

    /// Returns the full buffer as a mutable slice for reads.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the full buffer as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOL_SIZE {
                pool.push(std::mem::take(&mut self.data));
            }
        });
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take() {
        let mut buf = Buffer::take();
        assert_eq!(buf.as_mut_slice().len(), BUFFER_SIZE);
    }

    #[test]
    fn test_buffer_reuse() {
        // Take a buffer, scribble on it, then drop it
        {
            let mut buf = Buffer::take();
            buf.as_mut_slice()[0] = 0xFF;
        }

        // The buffer should come back from the pool at full length
        let buf2 = Buffer::take();
        assert_eq!(buf2.as_slice().len(), BUFFER_SIZE);
    }

    #[test]
    fn test_pool_bounded() {
        let buffers: Vec<Buffer> = (0..MAX_POOL_SIZE + 2).map(|_| Buffer::take()).collect();
        drop(buffers);

        THREAD_BUFFER_POOL.with(|pool| {
            assert!(pool.borrow().len() <= MAX_POOL_SIZE);
        });
    }
}
