//! Owned bytes of a record fragment or an outgoing datagram.
//!
//! [`Buf`] implements `aead::Buffer`, so ciphers seal and open fragments
//! without an extra copy.

use std::fmt;
use std::ops::{Deref, DerefMut};

#[derive(Default, Clone, PartialEq, Eq)]
pub struct Buf(Vec<u8>);

impl Buf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Buf(Vec::with_capacity(capacity))
    }

    /// Copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Buf(data.to_vec())
    }

    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.0.extend_from_slice(other);
    }

    pub fn push(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Grow (padding with `value`) or shrink to `len` bytes.
    pub fn resize(&mut self, len: usize, value: u8) {
        self.0.resize(len, value);
    }
}

impl From<Vec<u8>> for Buf {
    fn from(value: Vec<u8>) -> Self {
        Buf(value)
    }
}

impl From<&[u8]> for Buf {
    fn from(value: &[u8]) -> Self {
        Buf::from_slice(value)
    }
}

impl Deref for Buf {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Buf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for Buf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for Buf {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

// Contents may be key-dependent, only the length is shown.
impl fmt::Debug for Buf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buf({} bytes)", self.0.len())
    }
}

// Tag bytes are appended on seal and cut off on open.
impl aes_gcm::aead::Buffer for Buf {
    fn extend_from_slice(&mut self, other: &[u8]) -> Result<(), aes_gcm::aead::Error> {
        self.0.extend_from_slice(other);
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_gcm::aead::Buffer;

    #[test]
    fn aead_buffer_appends_and_cuts() {
        let mut buf = Buf::from_slice(b"abc");
        Buffer::extend_from_slice(&mut buf, b"tag").unwrap();
        assert_eq!(&*buf, b"abctag");
        Buffer::truncate(&mut buf, 3);
        assert_eq!(&*buf, b"abc");
        assert_eq!(format!("{:?}", buf), "Buf(3 bytes)");
    }
}
