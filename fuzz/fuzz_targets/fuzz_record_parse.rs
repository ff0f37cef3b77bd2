#![no_main]

//! Fuzz target for datagram parsing and decryption.
//!
//! The raw input is fed as a datagram. It is also wrapped in a well formed
//! epoch 1 header so the decrypt path sees fragments of every length.

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use std::time::Instant;

use dtls_record::{CipherSuite, Config, RecordLayer, Records, SecurityParameters};

/// DTLS record header length
const DTLS_HEADER_LEN: usize = 13;
/// Maximum protected fragment size
const MAX_FRAGMENT_SIZE: usize = 16384 + 2048;

fuzz_target!(|data: &[u8]| {
    let _ = Records::parse(data, 64);

    let layer = RecordLayer::new(Arc::new(Config::default()));
    let now = Instant::now();

    let params = match SecurityParameters::new(
        1,
        CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8,
        &[0x11; 16],
        &[0x22; 4],
    ) {
        Ok(p) => p,
        Err(_) => return,
    };
    if layer.session().install_read(params, now).is_err() {
        return;
    }

    let _ = layer.receive(data, now);

    if !data.is_empty() {
        let frag_len = data.len().min(MAX_FRAGMENT_SIZE);

        let mut record = Vec::with_capacity(DTLS_HEADER_LEN + frag_len);
        record.push(23u8); // ContentType::ApplicationData
        record.extend_from_slice(&[0xFE, 0xFD]); // DTLS 1.2 version
        record.extend_from_slice(&[0, 1]); // epoch 1
        record.extend_from_slice(&[0, 0, 0, 0, 0, 1]); // sequence 1
        record.extend_from_slice(&(frag_len as u16).to_be_bytes());
        record.extend_from_slice(&data[..frag_len]);

        let _ = layer.receive(&record, now);
    }
});
