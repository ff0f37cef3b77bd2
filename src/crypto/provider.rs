//! Trait seam between the record layer and the AEAD primitive.
//!
//! The record layer builds nonces and additional data itself and hands the
//! actual encrypt-and-tag / decrypt-and-verify work to a [`Cipher`]. The
//! built-in implementations live in [`rust_crypto`](super::rust_crypto); a
//! custom primitive can be installed through
//! [`SecurityParameters::with_cipher`](crate::SecurityParameters::with_cipher).
//!
//! # Example
//!
//! ```
//! use dtls_record::crypto::{Aad, Cipher, Nonce};
//! use dtls_record::Buf;
//!
//! #[derive(Debug)]
//! struct MyCipher;
//!
//! impl Cipher for MyCipher {
//!     fn encrypt(&self, _: &mut Buf, _: &Aad, _: &Nonce) -> Result<(), String> {
//!         Ok(())
//!     }
//!     fn decrypt(&self, _: &mut Buf, _: &Aad, _: &Nonce) -> Result<(), String> {
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Thread Safety
//!
//! Ciphers are shared between threads decrypting records of the same epoch,
//! so all operations take `&self` and the trait requires [`CryptoSafe`].

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

use crate::buffer::Buf;
use crate::crypto::{Aad, Nonce};

/// Marker trait for types that are safe to use as crypto components.
///
/// This trait combines the common bounds required for trait objects:
/// - [`Send`] + [`Sync`]: Thread-safe
/// - [`Debug`]: Support debugging
/// - [`UnwindSafe`] + [`RefUnwindSafe`]: Panic-safe
pub trait CryptoSafe: Send + Sync + Debug + UnwindSafe + RefUnwindSafe {}

/// Blanket implementation: any type satisfying the bounds implements [`CryptoSafe`].
impl<T: Send + Sync + Debug + UnwindSafe + RefUnwindSafe> CryptoSafe for T {}

/// AEAD cipher for in-place encryption/decryption.
pub trait Cipher: CryptoSafe {
    /// Encrypt plaintext in-place, appending authentication tag.
    fn encrypt(&self, plaintext: &mut Buf, aad: &Aad, nonce: &Nonce) -> Result<(), String>;

    /// Decrypt ciphertext in-place, verifying and removing authentication tag.
    fn decrypt(&self, ciphertext: &mut Buf, aad: &Aad, nonce: &Nonce) -> Result<(), String>;
}
