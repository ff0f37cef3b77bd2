//! Per-epoch, per-direction security parameters.
//!
//! A [`SecurityParameters`] is created by the handshake layer once keys for
//! a new epoch are derived. It is immutable afterwards and shared as an
//! `Arc` between everything reading or writing records of that epoch.

use std::fmt;

use zeroize::Zeroizing;

use crate::crypto::rust_crypto::create_cipher;
use crate::crypto::{Cipher, Iv};
use crate::types::CipherSuite;
use crate::Error;

/// Direction of record flow, seen from this endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Records received from the peer.
    Read,
    /// Records sent to the peer.
    Write,
}

/// Negotiated record protection state for one epoch in one direction.
pub struct SecurityParameters {
    epoch: u16,
    cipher_suite: CipherSuite,
    key: Zeroizing<Vec<u8>>,
    iv: Iv,
    cipher: Option<Box<dyn Cipher>>,
}

impl SecurityParameters {
    /// The unprotected parameters of epoch 0.
    pub fn null() -> Self {
        SecurityParameters {
            epoch: 0,
            cipher_suite: CipherSuite::TLS_NULL_WITH_NULL_NULL,
            key: Zeroizing::new(Vec::new()),
            iv: Iv::default(),
            cipher: None,
        }
    }

    /// Parameters for `epoch` using the built-in cipher for `cipher_suite`.
    ///
    /// `key` must match the suite's key length and `iv` is the 4-byte salt.
    pub fn new(
        epoch: u16,
        cipher_suite: CipherSuite,
        key: &[u8],
        iv: &[u8],
    ) -> Result<Self, Error> {
        Self::check(cipher_suite, key)?;
        let cipher = create_cipher(cipher_suite, key).map_err(Error::InvalidKeyMaterial)?;
        Self::build(epoch, cipher_suite, key, iv, cipher)
    }

    /// Parameters for `epoch` using a custom AEAD primitive.
    ///
    /// The primitive must use a 12 byte nonce and the tag length of
    /// `cipher_suite`.
    pub fn with_cipher(
        epoch: u16,
        cipher_suite: CipherSuite,
        key: &[u8],
        iv: &[u8],
        cipher: Box<dyn Cipher>,
    ) -> Result<Self, Error> {
        Self::check(cipher_suite, key)?;
        if cipher_suite.is_null() {
            return Err(Error::InvalidKeyMaterial(
                "The null suite takes no cipher".to_string(),
            ));
        }
        Self::build(epoch, cipher_suite, key, iv, Some(cipher))
    }

    fn check(cipher_suite: CipherSuite, key: &[u8]) -> Result<(), Error> {
        if key.len() != cipher_suite.key_len() {
            return Err(Error::InvalidKeyMaterial(format!(
                "Key for {} must be {} bytes, got {}",
                cipher_suite,
                cipher_suite.key_len(),
                key.len()
            )));
        }
        Ok(())
    }

    fn build(
        epoch: u16,
        cipher_suite: CipherSuite,
        key: &[u8],
        iv: &[u8],
        cipher: Option<Box<dyn Cipher>>,
    ) -> Result<Self, Error> {
        let iv = if cipher_suite.is_null() {
            Iv::default()
        } else {
            Iv::new(iv)?
        };

        Ok(SecurityParameters {
            epoch,
            cipher_suite,
            key: Zeroizing::new(key.to_vec()),
            iv,
            cipher,
        })
    }

    pub fn epoch(&self) -> u16 {
        self.epoch
    }

    pub fn cipher_suite(&self) -> CipherSuite {
        self.cipher_suite
    }

    /// Raw encryption key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The 4-byte implicit nonce salt.
    pub fn iv(&self) -> Iv {
        self.iv
    }

    /// Whether records of this epoch are protected.
    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub(crate) fn cipher(&self) -> Option<&dyn Cipher> {
        self.cipher.as_deref()
    }
}

impl fmt::Debug for SecurityParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.debug_struct("SecurityParameters")
            .field("epoch", &self.epoch)
            .field("cipher_suite", &self.cipher_suite)
            .field("key_len", &self.key.len())
            .finish()
    }
}
