//! Value types carried in record headers and security parameters.

mod cipher_suite;
pub use cipher_suite::{AeadAlgorithm, CipherSuite};

mod ctype;
pub use ctype::ContentType;

mod sequence;
pub use sequence::{next_epoch, Sequence, MAX_SEQUENCE_NUMBER};

mod version;
pub use version::ProtocolVersion;
