//! RustCrypto based AEAD primitives.
//!
//! Covers AES-CCM (8 and 16 byte tags) via the `ccm` crate and AES-GCM via
//! `aes-gcm`.

mod cipher_suite;

use self::cipher_suite::AesAead;
use super::Cipher;
use crate::types::CipherSuite;

/// Create the cipher for a suite, keyed with `key`.
///
/// Returns `Ok(None)` for the null suite.
pub fn create_cipher(suite: CipherSuite, key: &[u8]) -> Result<Option<Box<dyn Cipher>>, String> {
    if suite.is_null() {
        return Ok(None);
    }
    let cipher = AesAead::new(suite.algorithm(), key)?;
    Ok(Some(Box::new(cipher)))
}
