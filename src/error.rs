use thiserror::Error;

/// Errors produced by the record layer.
///
/// Unknown content types are not represented here. Those records are skipped
/// by the parser without failing the datagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A record header or fragment runs past the end of the datagram.
    #[error("Parse incomplete")]
    ParseIncomplete,

    /// The parser failed for a reason other than running out of input.
    #[error("Parse error: {0:?}")]
    ParseError(nom::error::ErrorKind),

    #[error("Too many records in datagram (max {0})")]
    TooManyRecords(usize),

    /// The fragment does not fit the record (or configured) length limit.
    #[error("Fragment too long: {len} (max {max})")]
    FragmentTooLong { len: usize, max: usize },

    /// The fragment is shorter than the explicit nonce plus the tag.
    #[error("Fragment too short: {len} (min {min})")]
    FragmentTooShort { len: usize, min: usize },

    /// Decrypted plaintext exceeds 2^14 bytes.
    #[error("Record overflow: {0}")]
    RecordOverflow(usize),

    /// AEAD tag verification failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The record was already decrypted.
    #[error("Record already decrypted")]
    AlreadyDecrypted,

    /// No security parameters are installed (or still valid) for the epoch.
    #[error("Unknown epoch {0}")]
    UnknownEpoch(u16),

    #[error("Expected epoch {expected} but got: {got}")]
    InvalidEpoch { expected: u16, got: u16 },

    #[error("Epoch is not allowed to wrap")]
    WrappedEpoch,

    /// The write sequence number for the current epoch reached 2^48.
    #[error("Sequence number exhausted for epoch {0}")]
    SequenceExhausted(u16),

    #[error("Too big dtls sequence field (max 48 bits) {0}")]
    SequenceOutOfRange(u64),

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),
}

impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(value: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match value {
            nom::Err::Incomplete(_) => Error::ParseIncomplete,
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                nom::error::ErrorKind::Eof => Error::ParseIncomplete,
                code => Error::ParseError(code),
            },
        }
    }
}
