//! Reference AES-128-CCM-8 record and explicit nonce handling.

mod record_common;

use dtls_record::crypto::transform;
use dtls_record::crypto::ExplicitNonce;
use dtls_record::{CipherSuite, ContentType, Error, ProtocolVersion, Record, Records, Sequence};
use record_common::*;

const EXPLICIT_NONCE: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

fn fixture_fragment() -> Vec<u8> {
    let plaintext = [0x34u8; 50];
    let aad = aad(APPLICATION_DATA, DTLS1_2, 0, 5, 50);
    ccm8_fragment(&KEY, &IV, &EXPLICIT_NONCE, &aad, &plaintext)
}

#[test]
fn reference_fragment_decrypts() {
    let _ = env_logger::try_init();

    let fragment = fixture_fragment();
    assert_eq!(fragment.len(), 8 + 50 + 8);

    let params = params(0, CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8);
    let plaintext = transform::decrypt(
        &params,
        ContentType::ApplicationData,
        ProtocolVersion::DTLS1_2,
        Sequence::with_number(0, 5).unwrap(),
        &fragment,
    )
    .unwrap();

    assert_eq!(&*plaintext, &[0x34u8; 50][..]);
}

#[test]
fn reference_record_from_datagram() {
    let _ = env_logger::try_init();

    let datagram = frame(APPLICATION_DATA, DTLS1_2, 0, 5, &fixture_fragment());
    let mut records = Records::parse(&datagram, 8).unwrap().into_vec();
    assert_eq!(records.len(), 1);

    let record = &mut records[0];
    assert_eq!(record.epoch(), 0);
    assert_eq!(record.sequence().sequence_number, 5);

    let params = params(0, CipherSuite::TLS_PSK_WITH_AES_128_CCM_8);
    record.decrypt(&params).unwrap();
    assert_eq!(record.fragment(), &[0x34u8; 50][..]);
}

#[test]
fn derived_nonce_does_not_open_reference_fragment() {
    let _ = env_logger::try_init();

    // Replace the carried explicit nonce with epoch || sequence.
    let mut fragment = fixture_fragment();
    let derived = ExplicitNonce::from_sequence(Sequence::with_number(0, 5).unwrap());
    assert_ne!(derived.0, EXPLICIT_NONCE);
    fragment[..8].copy_from_slice(&derived.0);

    let params = params(0, CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8);
    let err = transform::decrypt(
        &params,
        ContentType::ApplicationData,
        ProtocolVersion::DTLS1_2,
        Sequence::with_number(0, 5).unwrap(),
        &fragment,
    )
    .unwrap_err();

    assert_eq!(err, Error::AuthenticationFailed);
}

#[test]
fn carried_nonce_is_authoritative() {
    let _ = env_logger::try_init();

    let params = params(3, CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256);
    let sequence = Sequence::with_number(3, 77).unwrap();
    let explicit = ExplicitNonce([0xA5, 0x5A, 0, 0, 0xFF, 1, 2, 3]);
    assert_ne!(explicit, ExplicitNonce::from_sequence(sequence));

    let sealed = Record::seal(
        &params,
        ContentType::Handshake,
        ProtocolVersion::DTLS1_2,
        sequence,
        explicit,
        b"not derived from the header",
    )
    .unwrap();
    assert_eq!(&sealed.fragment()[..8], &explicit.0);

    let mut record = sealed.clone();
    record.decrypt(&params).unwrap();
    assert_eq!(record.fragment(), b"not derived from the header");

    let mut rewritten = sealed.fragment().to_vec();
    rewritten[..8].copy_from_slice(&ExplicitNonce::from_sequence(sequence).0);
    let mut record = Record::new(
        ContentType::Handshake,
        ProtocolVersion::DTLS1_2,
        sequence,
        rewritten,
    );
    assert_eq!(record.decrypt(&params).unwrap_err(), Error::AuthenticationFailed);
}
