//! The immutable byte value carried through the cache.
//!
//! A `ByteView` is the only value type a [`Group`](crate::group::Group) ever
//! hands back to a caller. It is opaque, measurable, and content-immutable
//! once constructed: ingress clones the caller's buffer, egress hands out a
//! copy, and only the cache/Group boundary may share the underlying
//! allocation.

use bytes::Bytes;

/// An opaque, read-only view over a byte sequence.
///
/// Equality compares by content. [`ByteView::len`] reports size in bytes, the
/// same quantity the [`Sized`](crate::byte_view::Sized) capability the store
/// requires exposes. [`ByteView::to_vec`] hands the caller an owned copy;
/// nothing about `ByteView` lets an external consumer observe or mutate the
/// bytes it holds in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteView(Bytes);

impl ByteView {
    /// Clones `bytes` into a new, immutable view.
    pub fn new(bytes: &[u8]) -> Self {
        ByteView(Bytes::copy_from_slice(bytes))
    }

    /// Takes ownership of an already-owned buffer without an extra copy.
    pub fn from_owned(bytes: Vec<u8>) -> Self {
        ByteView(Bytes::from(bytes))
    }

    /// Number of bytes this view holds.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if this view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying bytes without copying.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns a defensive copy of the underlying bytes for a caller that
    /// needs ownership (and might mutate what it gets back).
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Borrows the view as a UTF-8 string, if it is valid UTF-8.
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.0)
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        ByteView::from_owned(bytes)
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        ByteView::new(bytes)
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        ByteView::from_owned(s.into_bytes())
    }
}

/// The capability the store requires of any value it tracks: something that
/// can report its own byte cost. `ByteView` is the only value type the crate
/// ships, but this stays a trait so the store's byte accounting isn't tied to
/// it directly.
pub trait Sized {
    /// Byte cost this value counts against a store's `max_bytes` budget.
    fn len_bytes(&self) -> u64;
}

impl Sized for ByteView {
    fn len_bytes(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_content() {
        assert_eq!(ByteView::new(b"hello"), ByteView::new(b"hello"));
        assert_ne!(ByteView::new(b"hello"), ByteView::new(b"world"));
    }

    #[test]
    fn ingress_clones_the_source_buffer() {
        let mut src = b"abc".to_vec();
        let view = ByteView::new(&src);
        src[0] = b'z';
        assert_eq!(view.as_slice(), b"abc");
    }

    #[test]
    fn to_vec_is_a_defensive_copy() {
        let view = ByteView::new(b"abc");
        let mut copy = view.to_vec();
        copy.push(b'd');
        assert_eq!(view.as_slice(), b"abc");
    }

    #[test]
    fn len_bytes_matches_len() {
        let view = ByteView::new(b"12345");
        assert_eq!(view.len(), 5);
        assert_eq!(view.len_bytes(), 5);
    }
}
