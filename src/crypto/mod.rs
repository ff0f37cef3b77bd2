//! AEAD record protection: nonce and additional data construction, the
//! cipher seam and the built-in RustCrypto primitives.

use std::ops::Deref;

mod dtls_aead;
mod provider;
pub mod rust_crypto;
pub mod transform;

pub use dtls_aead::{Aad, ExplicitNonce, Iv, Nonce};
pub use dtls_aead::{DTLS_AAD_LEN, DTLS_EXPLICIT_NONCE_LEN, DTLS_FIXED_IV_LEN, DTLS_NONCE_LEN};
pub use provider::{Cipher, CryptoSafe};

impl Deref for Aad {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Nonce {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
