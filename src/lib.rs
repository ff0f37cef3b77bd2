//! DTLS 1.2 record layer.
//!
//! Turns UDP datagrams into typed, decrypted records and plaintext into
//! protected, framed records ready for the wire.
//!
//! * [`Records::parse`] splits a datagram into [`Record`]s. Records of unknown
//!   content type are skipped, framing errors fail the datagram.
//! * [`Record::decrypt`] and [`Record::seal`] apply the `GenericAEADCipher`
//!   transform: nonce is `iv(4) || explicit_nonce(8)`, with the explicit nonce
//!   always taken from the fragment on read.
//! * [`Session`] holds per-epoch [`SecurityParameters`] for both directions and
//!   hands out unique outgoing sequence numbers.
//! * [`RecordLayer`] ties it together: [`RecordLayer::receive`] and
//!   [`RecordLayer::send`].
//!
//! The handshake, retransmission and socket I/O are not part of this crate.
//! The handshake installs the parameters of each new epoch:
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//! use dtls_record::{Buf, CipherSuite, Config, ContentType, Received};
//! use dtls_record::{RecordLayer, SecurityParameters};
//!
//! let config = Arc::new(Config::default());
//! let client = RecordLayer::new(config.clone());
//! let server = RecordLayer::new(config);
//! let now = Instant::now();
//!
//! let suite = CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256;
//! let key = [0x42; 16];
//! let iv = [1, 2, 3, 4];
//!
//! client
//!     .session()
//!     .install_write(SecurityParameters::new(1, suite, &key, &iv)?)?;
//! server
//!     .session()
//!     .install_read(SecurityParameters::new(1, suite, &key, &iv)?, now)?;
//!
//! let mut datagram = Buf::new();
//! client.send(ContentType::ApplicationData, b"hello", &mut datagram)?;
//!
//! for received in server.receive(&datagram, now)? {
//!     if let Received::Record(record) = received {
//!         assert_eq!(record.fragment(), b"hello");
//!     }
//! }
//! # Ok::<(), dtls_record::Error>(())
//! ```
#![forbid(unsafe_code)]
#![warn(clippy::all)]

#[macro_use]
extern crate log;

mod buffer;
pub use buffer::Buf;

mod config;
pub use config::{Config, ConfigBuilder};

pub mod crypto;

mod error;
pub use error::Error;

mod layer;
pub use layer::{Received, RecordLayer};

mod record;
pub use record::{FragmentState, Parsed, Record, Records, HEADER_LEN};

mod security;
pub use security::{Direction, SecurityParameters};

mod session;
pub use session::{Session, EPOCH_WINDOW};

mod types;
pub use types::{next_epoch, AeadAlgorithm, CipherSuite, ContentType, ProtocolVersion};
pub use types::{Sequence, MAX_SEQUENCE_NUMBER};

mod util;
