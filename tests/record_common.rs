//! Shared helpers for record layer integration tests.
//!
//! This file has no `#[test]` functions; Cargo compiles it as a no-op binary.
//! Import it from other test files via `mod record_common;`.

#![allow(unused)]

use std::sync::Arc;
use std::time::Instant;

use aes_gcm::aead::consts::{U12, U8};
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes128;

use dtls_record::{CipherSuite, Config, RecordLayer, SecurityParameters};

/// AES-128 key of the reference fixture.
pub const KEY: [u8; 16] = [
    0xC9, 0x0E, 0x6A, 0xA2, 0xEF, 0x60, 0x34, 0x96, 0x90, 0x54, 0xC4, 0x96, 0x65, 0xBA, 0x03, 0x9E,
];

/// IV salt of the reference fixture.
pub const IV: [u8; 4] = [0x55, 0x23, 0x2F, 0xA3];

/// DTLS 1.2 on the wire.
pub const DTLS1_2: [u8; 2] = [0xFE, 0xFD];

pub const CHANGE_CIPHER_SPEC: u8 = 20;
pub const ALERT: u8 = 21;
pub const HANDSHAKE: u8 = 22;
pub const APPLICATION_DATA: u8 = 23;

/// Parameters with the fixture IV and a key of the right size for `suite`.
pub fn params(epoch: u16, suite: CipherSuite) -> SecurityParameters {
    let key: Vec<u8> = KEY.iter().cycle().take(suite.key_len()).copied().collect();
    SecurityParameters::new(epoch, suite, &key, &IV).expect("valid parameters")
}

/// Build a GenericAEADCipher fragment with AES-128-CCM-8 outside of the crate.
pub fn ccm8_fragment(
    key: &[u8; 16],
    iv: &[u8; 4],
    explicit_nonce: &[u8; 8],
    aad: &[u8],
    plaintext: &[u8],
) -> Vec<u8> {
    let cipher = ccm::Ccm::<Aes128, U8, U12>::new_from_slice(key).expect("key size");

    let mut nonce = [0u8; 12];
    nonce[..4].copy_from_slice(iv);
    nonce[4..].copy_from_slice(explicit_nonce);

    let mut body = plaintext.to_vec();
    cipher
        .encrypt_in_place(GenericArray::from_slice(&nonce), aad, &mut body)
        .expect("encrypt");

    let mut fragment = explicit_nonce.to_vec();
    fragment.extend_from_slice(&body);
    fragment
}

/// The 13 bytes of additional data for a record.
pub fn aad(ctype: u8, version: [u8; 2], epoch: u16, seq: u64, len: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(13);
    out.extend_from_slice(&epoch.to_be_bytes());
    out.extend_from_slice(&seq.to_be_bytes()[2..]);
    out.push(ctype);
    out.extend_from_slice(&version);
    out.extend_from_slice(&len.to_be_bytes());
    out
}

/// Frame a fragment into a record.
pub fn frame(ctype: u8, version: [u8; 2], epoch: u16, seq: u64, fragment: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(13 + fragment.len());
    out.push(ctype);
    out.extend_from_slice(&version);
    out.extend_from_slice(&epoch.to_be_bytes());
    out.extend_from_slice(&seq.to_be_bytes()[2..]);
    out.extend_from_slice(&(fragment.len() as u16).to_be_bytes());
    out.extend_from_slice(fragment);
    out
}

/// Client and server record layers with epoch 1 installed client to server.
pub fn connected(suite: CipherSuite, config: Config, now: Instant) -> (RecordLayer, RecordLayer) {
    let config = Arc::new(config);
    let client = RecordLayer::new(Arc::clone(&config));
    let server = RecordLayer::new(config);

    client
        .session()
        .install_write(params(1, suite))
        .expect("install write");
    server
        .session()
        .install_read(params(1, suite), now)
        .expect("install read");

    (client, server)
}
