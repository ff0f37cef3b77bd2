//! Cipher suite definitions and the record protection metadata they imply.

use std::fmt;

/// AEAD algorithm used to protect records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadAlgorithm {
    /// No protection (epoch 0).
    Null,
    /// AES-128-CCM with an 8 byte tag (RFC 6655).
    Aes128Ccm8,
    /// AES-128-CCM with a 16 byte tag (RFC 6655).
    Aes128Ccm,
    /// AES-128-GCM (RFC 5288).
    Aes128Gcm,
    /// AES-256-GCM (RFC 5288).
    Aes256Gcm,
}

/// DTLS 1.2 cipher suites whose record protection is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum CipherSuite {
    /// The initial, unprotected state of epoch 0.
    TLS_NULL_WITH_NULL_NULL, // 0x0000
    /// PSK with AES-128-CCM-8
    TLS_PSK_WITH_AES_128_CCM_8, // 0xC0A8
    /// ECDHE with ECDSA authentication, AES-128-CCM
    TLS_ECDHE_ECDSA_WITH_AES_128_CCM, // 0xC0AC
    /// ECDHE with ECDSA authentication, AES-128-CCM-8
    TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8, // 0xC0AE
    /// ECDHE with ECDSA authentication, AES-128-GCM, SHA-256
    TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256, // 0xC02B
    /// ECDHE with ECDSA authentication, AES-256-GCM, SHA-384
    TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384, // 0xC02C
}

impl CipherSuite {
    /// Convert the 16-bit IANA value to a `CipherSuite`.
    pub fn from_u16(value: u16) -> Option<Self> {
        use CipherSuite::*;
        let suite = match value {
            0x0000 => TLS_NULL_WITH_NULL_NULL,
            0xC0A8 => TLS_PSK_WITH_AES_128_CCM_8,
            0xC0AC => TLS_ECDHE_ECDSA_WITH_AES_128_CCM,
            0xC0AE => TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8,
            0xC02B => TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
            0xC02C => TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
            _ => return None,
        };
        Some(suite)
    }

    /// Return the 16-bit IANA value for this cipher suite.
    pub fn as_u16(&self) -> u16 {
        use CipherSuite::*;
        match self {
            TLS_NULL_WITH_NULL_NULL => 0x0000,
            TLS_PSK_WITH_AES_128_CCM_8 => 0xC0A8,
            TLS_ECDHE_ECDSA_WITH_AES_128_CCM => 0xC0AC,
            TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8 => 0xC0AE,
            TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => 0xC02B,
            TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 => 0xC02C,
        }
    }

    pub fn algorithm(&self) -> AeadAlgorithm {
        use CipherSuite::*;
        match self {
            TLS_NULL_WITH_NULL_NULL => AeadAlgorithm::Null,
            TLS_PSK_WITH_AES_128_CCM_8 | TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8 => {
                AeadAlgorithm::Aes128Ccm8
            }
            TLS_ECDHE_ECDSA_WITH_AES_128_CCM => AeadAlgorithm::Aes128Ccm,
            TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => AeadAlgorithm::Aes128Gcm,
            TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 => AeadAlgorithm::Aes256Gcm,
        }
    }

    pub fn is_null(&self) -> bool {
        self.algorithm() == AeadAlgorithm::Null
    }

    /// Length of the encryption key in bytes.
    pub fn key_len(&self) -> usize {
        match self.algorithm() {
            AeadAlgorithm::Null => 0,
            AeadAlgorithm::Aes128Ccm8 | AeadAlgorithm::Aes128Ccm | AeadAlgorithm::Aes128Gcm => 16,
            AeadAlgorithm::Aes256Gcm => 32,
        }
    }

    /// Length of the implicit (fixed) IV salt in bytes.
    pub fn fixed_iv_len(&self) -> usize {
        if self.is_null() {
            0
        } else {
            4
        }
    }

    /// Length of the explicit nonce carried in each record fragment.
    pub fn explicit_nonce_len(&self) -> usize {
        if self.is_null() {
            0
        } else {
            8
        }
    }

    /// Length of the authentication tag.
    pub fn tag_len(&self) -> usize {
        match self.algorithm() {
            AeadAlgorithm::Null => 0,
            AeadAlgorithm::Aes128Ccm8 => 8,
            AeadAlgorithm::Aes128Ccm | AeadAlgorithm::Aes128Gcm | AeadAlgorithm::Aes256Gcm => 16,
        }
    }

    /// Bytes added to a plaintext by record protection.
    pub fn overhead(&self) -> usize {
        self.explicit_nonce_len() + self.tag_len()
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:04X})", self, self.as_u16())
    }
}
