//! AEAD cipher implementations using RustCrypto.
use aes_gcm::aead::consts::{U12, U16, U8};
use aes_gcm::aead::{AeadInPlace, KeyInit, Nonce as AeadNonce};
use aes_gcm::aes::Aes128;
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use ccm::Ccm;

use crate::buffer::Buf;
use crate::crypto::{Aad, Cipher, Nonce};
use crate::types::AeadAlgorithm;

/// AES-128-CCM with 8 byte tag and 12 byte nonce.
type Aes128Ccm8 = Ccm<Aes128, U8, U12>;

/// AES-128-CCM with 16 byte tag and 12 byte nonce.
type Aes128Ccm = Ccm<Aes128, U16, U12>;

/// AES-GCM and AES-CCM cipher implementation using RustCrypto.
pub(super) enum AesAead {
    Aes128Ccm8(Box<Aes128Ccm8>),
    Aes128Ccm(Box<Aes128Ccm>),
    Aes128Gcm(Box<Aes128Gcm>),
    Aes256Gcm(Box<Aes256Gcm>),
}

impl std::fmt::Debug for AesAead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AesAead::Aes128Ccm8(_) => f.debug_tuple("AesAead::Aes128Ccm8").finish(),
            AesAead::Aes128Ccm(_) => f.debug_tuple("AesAead::Aes128Ccm").finish(),
            AesAead::Aes128Gcm(_) => f.debug_tuple("AesAead::Aes128Gcm").finish(),
            AesAead::Aes256Gcm(_) => f.debug_tuple("AesAead::Aes256Gcm").finish(),
        }
    }
}

impl AesAead {
    pub(super) fn new(algorithm: AeadAlgorithm, key: &[u8]) -> Result<Self, String> {
        let invalid = |_| format!("Invalid key size for {:?}: {}", algorithm, key.len());

        let cipher = match algorithm {
            AeadAlgorithm::Aes128Ccm8 => {
                AesAead::Aes128Ccm8(Box::new(Aes128Ccm8::new_from_slice(key).map_err(invalid)?))
            }
            AeadAlgorithm::Aes128Ccm => {
                AesAead::Aes128Ccm(Box::new(Aes128Ccm::new_from_slice(key).map_err(invalid)?))
            }
            AeadAlgorithm::Aes128Gcm => {
                AesAead::Aes128Gcm(Box::new(Aes128Gcm::new_from_slice(key).map_err(invalid)?))
            }
            AeadAlgorithm::Aes256Gcm => {
                AesAead::Aes256Gcm(Box::new(Aes256Gcm::new_from_slice(key).map_err(invalid)?))
            }
            AeadAlgorithm::Null => return Err("No cipher for the null algorithm".to_string()),
        };

        Ok(cipher)
    }
}

fn seal<A: AeadInPlace>(cipher: &A, data: &mut Buf, aad: &Aad, nonce: &Nonce) -> Result<(), ()> {
    // All supported algorithms use 12 byte nonces.
    let nonce = AeadNonce::<A>::from_slice(&nonce.0);
    cipher.encrypt_in_place(nonce, aad, data).map_err(|_| ())
}

fn open<A: AeadInPlace>(cipher: &A, data: &mut Buf, aad: &Aad, nonce: &Nonce) -> Result<(), ()> {
    let nonce = AeadNonce::<A>::from_slice(&nonce.0);
    cipher.decrypt_in_place(nonce, aad, data).map_err(|_| ())
}

impl Cipher for AesAead {
    fn encrypt(&self, data: &mut Buf, aad: &Aad, nonce: &Nonce) -> Result<(), String> {
        let result = match self {
            AesAead::Aes128Ccm8(c) => seal(c.as_ref(), data, aad, nonce),
            AesAead::Aes128Ccm(c) => seal(c.as_ref(), data, aad, nonce),
            AesAead::Aes128Gcm(c) => seal(c.as_ref(), data, aad, nonce),
            AesAead::Aes256Gcm(c) => seal(c.as_ref(), data, aad, nonce),
        };
        result.map_err(|_| format!("{:?} encryption failed", self))
    }

    fn decrypt(&self, data: &mut Buf, aad: &Aad, nonce: &Nonce) -> Result<(), String> {
        // decrypt_in_place verifies and removes the tag, shortening the buffer
        let result = match self {
            AesAead::Aes128Ccm8(c) => open(c.as_ref(), data, aad, nonce),
            AesAead::Aes128Ccm(c) => open(c.as_ref(), data, aad, nonce),
            AesAead::Aes128Gcm(c) => open(c.as_ref(), data, aad, nonce),
            AesAead::Aes256Gcm(c) => open(c.as_ref(), data, aad, nonce),
        };
        result.map_err(|_| format!("{:?} decryption failed", self))
    }
}
