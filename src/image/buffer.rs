//! Image data buffers
//!
//! An [`ImageBuffer`] either shares an owned, reference-counted allocation
//! (`bytes::Bytes`) or borrows caller memory for the lifetime `'a`.
//!
//! ```text
//!   Shared(Bytes) ──clone──► Shared(Bytes)      same allocation, refcount + 1
//!   Borrowed { data: &'a mut [u8], len }        capacity fixed at data.len()
//! ```
//!
//! Borrowed buffers never grow. Receiving more bytes than the borrowed
//! region holds truncates the copy and reports [`Error::CapacityExceeded`].

use bytes::Bytes;

use crate::error::{Error, Result};

/// Raw image bytes, owned or borrowed
#[derive(Debug)]
pub enum ImageBuffer<'a> {
    /// Reference-counted owned bytes
    Shared(Bytes),
    /// Caller-supplied memory
    Borrowed {
        /// The caller's region; its length is the capacity
        data: &'a mut [u8],
        /// Number of valid bytes at the start of `data`
        len: usize,
    },
}

impl<'a> ImageBuffer<'a> {
    /// Create an empty owned buffer
    pub fn new() -> Self {
        ImageBuffer::Shared(Bytes::new())
    }

    /// Wrap caller memory without taking ownership
    ///
    /// The whole region counts as valid data when sending.
    pub fn borrowed(data: &'a mut [u8]) -> Self {
        let len = data.len();
        ImageBuffer::Borrowed { data, len }
    }

    /// Number of valid bytes
    pub fn len(&self) -> usize {
        match self {
            ImageBuffer::Shared(bytes) => bytes.len(),
            ImageBuffer::Borrowed { len, .. } => *len,
        }
    }

    /// Check if the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed capacity of a borrowed buffer, `None` for owned buffers
    pub fn capacity(&self) -> Option<usize> {
        match self {
            ImageBuffer::Shared(_) => None,
            ImageBuffer::Borrowed { data, .. } => Some(data.len()),
        }
    }

    /// Check if this buffer points at caller memory
    pub fn is_borrowed(&self) -> bool {
        matches!(self, ImageBuffer::Borrowed { .. })
    }

    /// View the valid bytes
    pub fn as_slice(&self) -> &[u8] {
        match self {
            ImageBuffer::Shared(bytes) => bytes,
            ImageBuffer::Borrowed { data, len } => &data[..*len],
        }
    }

    /// Mutable view of a borrowed buffer's valid bytes
    ///
    /// Shared buffers are immutable and return `None`.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match self {
            ImageBuffer::Shared(_) => None,
            ImageBuffer::Borrowed { data, len } => Some(&mut data[..*len]),
        }
    }

    /// Produce the bytes to put on the wire
    ///
    /// Shared buffers are handed out by reference count; borrowed memory is
    /// copied once so the caller's region is not referenced after the call.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            ImageBuffer::Shared(bytes) => bytes.clone(),
            ImageBuffer::Borrowed { data, len } => Bytes::copy_from_slice(&data[..*len]),
        }
    }

    /// Detach from any borrowed memory
    pub fn to_shared(&self) -> ImageBuffer<'static> {
        ImageBuffer::Shared(self.to_bytes())
    }

    /// Store an incoming part
    ///
    /// Owned buffers take the part as is. Borrowed buffers copy at most
    /// their capacity and fail if the part was larger.
    pub(crate) fn fill(&mut self, index: usize, part: Bytes) -> Result<()> {
        match self {
            ImageBuffer::Shared(bytes) => {
                *bytes = part;
                Ok(())
            }
            ImageBuffer::Borrowed { data, len } => {
                let capacity = data.len();
                let n = part.len().min(capacity);
                data[..n].copy_from_slice(&part[..n]);
                *len = n;

                if part.len() > capacity {
                    Err(Error::CapacityExceeded {
                        index,
                        capacity,
                        received: part.len(),
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl Default for ImageBuffer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ImageBuffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ImageBuffer<'_> {}

impl From<Bytes> for ImageBuffer<'static> {
    fn from(bytes: Bytes) -> Self {
        ImageBuffer::Shared(bytes)
    }
}

impl From<Vec<u8>> for ImageBuffer<'static> {
    fn from(v: Vec<u8>) -> Self {
        ImageBuffer::Shared(Bytes::from(v))
    }
}

impl From<&'static [u8]> for ImageBuffer<'static> {
    fn from(s: &'static [u8]) -> Self {
        ImageBuffer::Shared(Bytes::from_static(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_clone_shares_allocation() {
        let bytes = Bytes::from(vec![1u8, 2, 3, 4]);
        let buffer = ImageBuffer::from(bytes.clone());

        let wire = buffer.to_bytes();
        assert_eq!(wire.as_ptr(), bytes.as_ptr());
        assert_eq!(buffer.capacity(), None);
        assert!(!buffer.is_borrowed());
    }

    #[test]
    fn test_borrowed_send_copies_once() {
        let mut memory = [9u8; 8];
        let buffer = ImageBuffer::borrowed(&mut memory);

        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.capacity(), Some(8));
        let wire = buffer.to_bytes();
        assert_eq!(&wire[..], &[9u8; 8]);
    }

    #[test]
    fn test_fill_owned_takes_exact_size() {
        let mut buffer = ImageBuffer::new();
        buffer.fill(0, Bytes::from_static(&[1, 2, 3])).unwrap();
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_fill_borrowed_smaller_part() {
        let mut memory = [0u8; 8];
        {
            let mut buffer = ImageBuffer::borrowed(&mut memory);
            buffer.fill(0, Bytes::from_static(&[5, 6, 7])).unwrap();
            assert_eq!(buffer.len(), 3);
            assert_eq!(buffer.capacity(), Some(8));
        }
        assert_eq!(&memory[..3], &[5, 6, 7]);
        assert_eq!(&memory[3..], &[0u8; 5]);
    }

    #[test]
    fn test_fill_borrowed_truncates() {
        let mut memory = [0u8; 4];
        let result = {
            let mut buffer = ImageBuffer::borrowed(&mut memory);
            let result = buffer.fill(2, Bytes::from_static(&[1, 2, 3, 4, 5, 6]));
            assert_eq!(buffer.len(), 4);
            result
        };

        assert_eq!(memory, [1, 2, 3, 4]);
        assert!(matches!(
            result,
            Err(Error::CapacityExceeded {
                index: 2,
                capacity: 4,
                received: 6
            })
        ));
    }

    #[test]
    fn test_mut_slice_only_for_borrowed() {
        let mut owned = ImageBuffer::from(vec![1u8]);
        assert!(owned.as_mut_slice().is_none());

        let mut memory = [0u8; 2];
        let mut borrowed = ImageBuffer::borrowed(&mut memory);
        borrowed.as_mut_slice().unwrap()[1] = 42;
        assert_eq!(borrowed.as_slice(), &[0, 42]);
    }

    #[test]
    fn test_equality_by_content() {
        let mut memory = [1u8, 2, 3];
        let borrowed = ImageBuffer::borrowed(&mut memory);
        let owned = ImageBuffer::from(vec![1u8, 2, 3]);
        assert_eq!(borrowed, owned);
        assert_eq!(borrowed.to_shared(), owned);
    }
}
