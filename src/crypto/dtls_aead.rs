//! DTLS 1.2 AEAD record formatting types and constants.
//!
//! This module contains the nonce and additional data construction for
//! `GenericAEADCipher` records (RFC 5246 §6.2.3.3, RFC 6347 §4.1.2.1),
//! separate from the pluggable cipher abstraction.

use arrayvec::ArrayVec;

use crate::types::{ContentType, ProtocolVersion, Sequence};
use crate::Error;

/// Explicit nonce length for DTLS AEAD records.
///
/// The explicit nonce is transmitted with each record.
pub const DTLS_EXPLICIT_NONCE_LEN: usize = 8;

/// Length of the fixed ("implicit") IV salt.
pub const DTLS_FIXED_IV_LEN: usize = 4;

/// Length of the complete AEAD nonce.
pub const DTLS_NONCE_LEN: usize = DTLS_FIXED_IV_LEN + DTLS_EXPLICIT_NONCE_LEN;

/// Length of the DTLS 1.2 additional data.
pub const DTLS_AAD_LEN: usize = 13;

/// Fixed IV portion for DTLS AEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Iv(pub [u8; DTLS_FIXED_IV_LEN]);

impl Iv {
    pub fn new(iv: &[u8]) -> Result<Self, Error> {
        let iv = iv.try_into().map_err(|_| {
            Error::InvalidKeyMaterial(format!(
                "IV salt must be {} bytes, got {}",
                DTLS_FIXED_IV_LEN,
                iv.len()
            ))
        })?;
        Ok(Self(iv))
    }
}

/// Explicit part of the nonce, carried at the start of each protected fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplicitNonce(pub [u8; DTLS_EXPLICIT_NONCE_LEN]);

impl ExplicitNonce {
    /// The conventional choice `epoch(2) || sequence_number(6)`.
    ///
    /// Unique for as long as sequence numbers are never reused within an epoch.
    pub fn from_sequence(sequence: Sequence) -> Self {
        Self(sequence.to_bytes())
    }

    /// Read the explicit nonce from the start of a protected fragment.
    pub fn from_fragment(fragment: &[u8]) -> Option<Self> {
        let bytes = fragment.get(..DTLS_EXPLICIT_NONCE_LEN)?;
        // unwrap: slice is exactly DTLS_EXPLICIT_NONCE_LEN long
        Some(Self(bytes.try_into().unwrap()))
    }
}

/// Full AEAD nonce (fixed IV + explicit nonce).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce(pub [u8; DTLS_NONCE_LEN]);

impl Nonce {
    /// Create a new AEAD nonce by combining fixed IV and explicit nonce.
    pub fn new(iv: Iv, explicit_nonce: ExplicitNonce) -> Self {
        let mut nonce = [0u8; DTLS_NONCE_LEN];
        nonce[..DTLS_FIXED_IV_LEN].copy_from_slice(&iv.0);
        nonce[DTLS_FIXED_IV_LEN..].copy_from_slice(&explicit_nonce.0);
        Self(nonce)
    }
}

/// Additional Authenticated Data for DTLS 1.2 records.
///
/// `seq_num(8) || type(1) || version(2) || length(2)` where `seq_num` is the
/// epoch followed by the 48-bit sequence number and `length` is the
/// plaintext length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aad(pub ArrayVec<u8, DTLS_AAD_LEN>);

impl Aad {
    pub fn new(
        content_type: ContentType,
        version: ProtocolVersion,
        sequence: Sequence,
        length: u16,
    ) -> Self {
        let mut aad = ArrayVec::new();

        // Epoch in the first 2 bytes, then the 48-bit sequence number
        aad.extend(sequence.to_bytes());

        // Content type at index 8
        aad.push(content_type.as_u8());

        // Protocol version wire bytes at indexes 9-10
        aad.extend(version.to_wire());

        // Plaintext length (2 bytes) at indexes 11-12
        aad.extend(length.to_be_bytes());

        Aad(aad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_salt_then_explicit() {
        let iv = Iv::new(&[0x55, 0x23, 0x2F, 0xA3]).unwrap();
        let explicit = ExplicitNonce([1, 2, 3, 4, 5, 6, 7, 8]);
        let nonce = Nonce::new(iv, explicit);
        assert_eq!(
            nonce.0,
            [0x55, 0x23, 0x2F, 0xA3, 1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn iv_must_be_four_bytes() {
        assert!(Iv::new(&[1, 2, 3]).is_err());
        assert!(Iv::new(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn aad_layout() {
        let seq = Sequence::with_number(0x0001, 5).unwrap();
        let aad = Aad::new(
            ContentType::ApplicationData,
            ProtocolVersion::DTLS1_2,
            seq,
            50,
        );
        assert_eq!(
            &aad.0[..],
            &[0, 1, 0, 0, 0, 0, 0, 5, 23, 0xFE, 0xFD, 0, 50]
        );
    }

    #[test]
    fn explicit_nonce_from_fragment() {
        assert_eq!(ExplicitNonce::from_fragment(&[1, 2, 3]), None);
        let n = ExplicitNonce::from_fragment(&[9, 8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
        assert_eq!(n.0, [9, 8, 7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn explicit_nonce_from_sequence() {
        let seq = Sequence::with_number(2, 0x0A0B).unwrap();
        let n = ExplicitNonce::from_sequence(seq);
        assert_eq!(n.0, [0, 2, 0, 0, 0, 0, 0x0A, 0x0B]);
    }
}
