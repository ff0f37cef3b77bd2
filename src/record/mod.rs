//! DTLS 1.2 records.
//!
//! ```text
//! struct {
//!     ContentType type;
//!     ProtocolVersion version;
//!     uint16 epoch;
//!     uint48 sequence_number;
//!     uint16 length;
//!     opaque fragment[DTLSPlaintext.length];
//! } DTLSPlaintext;
//! ```

use std::fmt;

use crate::buffer::Buf;
use crate::crypto::transform;
use crate::crypto::ExplicitNonce;
use crate::security::SecurityParameters;
use crate::types::{ContentType, ProtocolVersion, Sequence};
use crate::Error;

mod codec;
pub use codec::{Parsed, HEADER_LEN};

mod records;
pub use records::Records;

/// What the fragment of a [`Record`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentState {
    /// As found on the wire (or as about to be written).
    ///
    /// For the null cipher of epoch 0 this is already cleartext, but the
    /// record is still marked as such until it passes through
    /// [`Record::decrypt`].
    Protected,
    /// Decrypted plaintext.
    Plaintext,
}

/// A single DTLS record.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    content_type: ContentType,
    version: ProtocolVersion,
    sequence: Sequence,
    fragment: Buf,
    state: FragmentState,
}

impl Record {
    /// A record with a fragment in wire form.
    pub fn new(
        content_type: ContentType,
        version: ProtocolVersion,
        sequence: Sequence,
        fragment: impl Into<Buf>,
    ) -> Self {
        Record {
            content_type,
            version,
            sequence,
            fragment: fragment.into(),
            state: FragmentState::Protected,
        }
    }

    /// Protect `plaintext` with `params` into a record ready to serialize.
    ///
    /// The `explicit_nonce` must be unique for the key of `params`.
    pub fn seal(
        params: &SecurityParameters,
        content_type: ContentType,
        version: ProtocolVersion,
        sequence: Sequence,
        explicit_nonce: ExplicitNonce,
        plaintext: &[u8],
    ) -> Result<Self, Error> {
        let fragment = transform::encrypt(
            params,
            content_type,
            version,
            sequence,
            explicit_nonce,
            plaintext,
        )?;

        Ok(Record::new(content_type, version, sequence, fragment))
    }

    /// Decrypt the fragment in place using `params`.
    ///
    /// The fragment is only replaced on success. On error the record is left
    /// exactly as it was.
    pub fn decrypt(&mut self, params: &SecurityParameters) -> Result<(), Error> {
        if self.state == FragmentState::Plaintext {
            return Err(Error::AlreadyDecrypted);
        }

        let plaintext = transform::decrypt(
            params,
            self.content_type,
            self.version,
            self.sequence,
            &self.fragment,
        )?;

        self.fragment = plaintext;
        self.state = FragmentState::Plaintext;

        Ok(())
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    pub fn epoch(&self) -> u16 {
        self.sequence.epoch
    }

    pub fn fragment(&self) -> &[u8] {
        &self.fragment
    }

    pub fn state(&self) -> FragmentState {
        self.state
    }

    pub fn is_decrypted(&self) -> bool {
        self.state == FragmentState::Plaintext
    }

    pub fn into_fragment(self) -> Buf {
        self.fragment
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("content_type", &self.content_type)
            .field("version", &self.version)
            .field("sequence", &self.sequence)
            .field("length", &self.fragment.len())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CipherSuite;

    fn params() -> SecurityParameters {
        SecurityParameters::new(
            1,
            CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
            &[7; 16],
            &[1, 2, 3, 4],
        )
        .unwrap()
    }

    #[test]
    fn seal_then_decrypt() {
        let p = params();
        let seq = Sequence::with_number(1, 3).unwrap();
        let mut record = Record::seal(
            &p,
            ContentType::ApplicationData,
            ProtocolVersion::DTLS1_2,
            seq,
            ExplicitNonce::from_sequence(seq),
            b"ping",
        )
        .unwrap();

        assert_eq!(record.state(), FragmentState::Protected);
        assert_eq!(record.fragment().len(), 8 + 4 + 16);

        record.decrypt(&p).unwrap();
        assert!(record.is_decrypted());
        assert_eq!(record.fragment(), b"ping");

        assert_eq!(record.decrypt(&p).unwrap_err(), Error::AlreadyDecrypted);
    }

    #[test]
    fn failed_decrypt_keeps_fragment() {
        let p = params();
        let seq = Sequence::new(1);
        let record = Record::seal(
            &p,
            ContentType::Handshake,
            ProtocolVersion::DTLS1_2,
            seq,
            ExplicitNonce::from_sequence(seq),
            b"finished",
        )
        .unwrap();

        let mut tampered = record.fragment().to_vec();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;

        let mut record = Record::new(
            ContentType::Handshake,
            ProtocolVersion::DTLS1_2,
            seq,
            tampered.clone(),
        );
        assert_eq!(record.decrypt(&p).unwrap_err(), Error::AuthenticationFailed);
        assert_eq!(record.state(), FragmentState::Protected);
        assert_eq!(record.fragment(), &tampered[..]);
    }

    #[test]
    fn null_epoch_decrypt_marks_plaintext() {
        let mut record = Record::new(
            ContentType::Handshake,
            ProtocolVersion::DTLS1_0,
            Sequence::new(0),
            b"client hello".to_vec(),
        );
        record.decrypt(&SecurityParameters::null()).unwrap();
        assert!(record.is_decrypted());
        assert_eq!(record.fragment(), b"client hello");
    }
}
