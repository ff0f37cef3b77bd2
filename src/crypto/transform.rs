//! Record protection for `GenericAEADCipher` fragments.
//!
//! ```text
//! struct {
//!     opaque nonce_explicit[8];
//!     aead-ciphered struct {
//!         opaque content[plaintext_length];
//!     };
//! } GenericAEADCipher;
//! ```
//!
//! Both directions are pure functions of the security parameters, the record
//! metadata and the fragment. Sequence numbers are allocated by the caller.

use crate::buffer::Buf;
use crate::crypto::{Aad, ExplicitNonce, Nonce, DTLS_EXPLICIT_NONCE_LEN};
use crate::security::SecurityParameters;
use crate::types::{ContentType, ProtocolVersion, Sequence};
use crate::Error;

/// Largest plaintext fragment (RFC 6347 §4.1, 2^14).
pub const MAX_PLAINTEXT_LEN: usize = 16_384;

/// Largest protected fragment (RFC 5246 §6.2.3, 2^14 + 2048).
pub const MAX_CIPHERTEXT_LEN: usize = MAX_PLAINTEXT_LEN + 2048;

fn check_epoch(params: &SecurityParameters, sequence: Sequence) -> Result<(), Error> {
    if params.epoch() != sequence.epoch {
        return Err(Error::InvalidEpoch {
            expected: params.epoch(),
            got: sequence.epoch,
        });
    }
    Ok(())
}

/// Protect a plaintext fragment.
///
/// Returns `explicit_nonce || ciphertext || tag`. The null cipher returns the
/// plaintext unchanged. `explicit_nonce` must never repeat under the same key.
pub fn encrypt(
    params: &SecurityParameters,
    content_type: ContentType,
    version: ProtocolVersion,
    sequence: Sequence,
    explicit_nonce: ExplicitNonce,
    plaintext: &[u8],
) -> Result<Buf, Error> {
    check_epoch(params, sequence)?;

    if plaintext.len() > MAX_PLAINTEXT_LEN {
        return Err(Error::FragmentTooLong {
            len: plaintext.len(),
            max: MAX_PLAINTEXT_LEN,
        });
    }

    let Some(cipher) = params.cipher() else {
        return Ok(Buf::from_slice(plaintext));
    };

    let nonce = Nonce::new(params.iv(), explicit_nonce);
    let aad = Aad::new(content_type, version, sequence, plaintext.len() as u16);

    let mut fragment = Buf::with_capacity(plaintext.len() + params.cipher_suite().overhead());
    fragment.extend_from_slice(plaintext);

    // Encrypt in-place, the tag is appended at the end.
    cipher
        .encrypt(&mut fragment, &aad, &nonce)
        .map_err(Error::CryptoError)?;
    let ctext_len = fragment.len();

    // Shift the encrypted data to make space for the nonce and write it
    fragment.resize(DTLS_EXPLICIT_NONCE_LEN + ctext_len, 0);
    fragment.copy_within(0..ctext_len, DTLS_EXPLICIT_NONCE_LEN);
    fragment[..DTLS_EXPLICIT_NONCE_LEN].copy_from_slice(&explicit_nonce.0);

    Ok(fragment)
}

/// Open a protected fragment received in a record with the given header fields.
///
/// The explicit nonce is taken from the fragment itself, never derived from
/// `sequence`. On failure nothing is revealed beyond
/// [`Error::AuthenticationFailed`].
pub fn decrypt(
    params: &SecurityParameters,
    content_type: ContentType,
    version: ProtocolVersion,
    sequence: Sequence,
    fragment: &[u8],
) -> Result<Buf, Error> {
    check_epoch(params, sequence)?;

    let Some(cipher) = params.cipher() else {
        if fragment.len() > MAX_PLAINTEXT_LEN {
            return Err(Error::RecordOverflow(fragment.len()));
        }
        return Ok(Buf::from_slice(fragment));
    };

    if fragment.len() > MAX_CIPHERTEXT_LEN {
        return Err(Error::RecordOverflow(fragment.len()));
    }

    // The plaintext length goes into the AAD, so it must be known before
    // anything is handed to the cipher.
    let suite = params.cipher_suite();
    let min = suite.overhead();
    let plaintext_len = fragment
        .len()
        .checked_sub(min)
        .ok_or(Error::FragmentTooShort {
            len: fragment.len(),
            min,
        })?;

    // unwrap: fragment is at least explicit_nonce_len + tag_len long
    let explicit_nonce = ExplicitNonce::from_fragment(fragment).unwrap();
    let nonce = Nonce::new(params.iv(), explicit_nonce);
    let aad = Aad::new(content_type, version, sequence, plaintext_len as u16);

    let mut plaintext = Buf::from_slice(&fragment[DTLS_EXPLICIT_NONCE_LEN..]);
    cipher
        .decrypt(&mut plaintext, &aad, &nonce)
        .map_err(|_| Error::AuthenticationFailed)?;

    if plaintext.len() > MAX_PLAINTEXT_LEN {
        return Err(Error::RecordOverflow(plaintext.len()));
    }

    Ok(plaintext)
}
