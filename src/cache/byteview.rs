use std::fmt;
use std::sync::Arc;

use super::lru::Value;

/// Immutable view over a cached byte payload.
///
/// Cloning a `ByteView` is cheap (the bytes are shared behind an `Arc`), but
/// nothing handed out by this type aliases the stored bytes mutably: callers
/// that need ownership get a fresh copy through [`ByteView::byte_slice`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteView {
    b: Arc<[u8]>,
}

impl ByteView {
    /// Builds a view by copying `bytes`.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            b: Arc::from(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Returns an owned copy of the bytes.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Borrows the bytes without copying.
    pub fn as_bytes(&self) -> &[u8] {
        &self.b
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            b: Arc::from(bytes),
        }
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::copy_from(s.as_bytes())
    }
}

impl Value for ByteView {
    fn len(&self) -> usize {
        self.b.len()
    }
}

/// Lossy UTF-8 rendering of the payload.
impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.b.len()).finish()
    }
}
