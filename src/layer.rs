use std::sync::Arc;
use std::time::Instant;

use crate::buffer::Buf;
use crate::config::Config;
use crate::crypto::ExplicitNonce;
use crate::record::{Record, Records};
use crate::security::SecurityParameters;
use crate::session::Session;
use crate::types::{ContentType, Sequence};
use crate::Error;

/// Outcome for one record of a received datagram.
#[derive(Debug)]
pub enum Received {
    /// Decrypted record, ready for dispatch.
    Record(Record),
    /// Record that could not be opened.
    ///
    /// Typical DTLS policy is to drop these silently and carry on.
    Dropped { sequence: Sequence, reason: Error },
}

/// Record layer of one DTLS 1.2 connection.
///
/// Decodes and decrypts incoming datagrams and protects and frames
/// outgoing data. Handshake, retransmission and I/O live elsewhere; keys
/// for new epochs are installed via [`RecordLayer::session`].
#[derive(Debug)]
pub struct RecordLayer {
    session: Session,
}

impl RecordLayer {
    pub fn new(config: Arc<Config>) -> Self {
        RecordLayer {
            session: Session::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        self.session.config()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Decode a datagram and decrypt every record in it.
    ///
    /// Framing errors fail the whole datagram. Records that can't be
    /// decrypted are reported as [`Received::Dropped`] without affecting
    /// the other records.
    pub fn receive(&self, datagram: &[u8], now: Instant) -> Result<Vec<Received>, Error> {
        let records = Records::parse(datagram, self.config().max_records())?;

        let mut received = Vec::with_capacity(records.len());

        for mut record in records {
            let sequence = record.sequence();

            let result = self
                .session
                .read_parameters(sequence.epoch, now)
                .and_then(|params| record.decrypt(&params));

            match result {
                Ok(()) => received.push(Received::Record(record)),
                Err(reason) => {
                    debug!("Drop record {}: {}", sequence, reason);
                    received.push(Received::Dropped { sequence, reason });
                }
            }
        }

        Ok(received)
    }

    /// Protect `plaintext` under the current write epoch and append the
    /// record to `output`.
    ///
    /// Several records can be appended to the same `output` to form one
    /// datagram. Returns the sequence the record was sent with.
    pub fn send(
        &self,
        content_type: ContentType,
        plaintext: &[u8],
        output: &mut Buf,
    ) -> Result<Sequence, Error> {
        self.check_plaintext_len(plaintext)?;
        let reserved = self.session.reserve_write()?;
        self.seal(reserved, content_type, plaintext, output)
    }

    /// Like [`RecordLayer::send`], but in a given write epoch.
    ///
    /// Used to retransmit a flight of the previous epoch after the next one
    /// was installed. Epochs other than the current and the previous one fail
    /// with [`Error::UnknownEpoch`].
    pub fn send_in_epoch(
        &self,
        epoch: u16,
        content_type: ContentType,
        plaintext: &[u8],
        output: &mut Buf,
    ) -> Result<Sequence, Error> {
        self.check_plaintext_len(plaintext)?;
        let reserved = self.session.reserve_write_in(epoch)?;
        self.seal(reserved, content_type, plaintext, output)
    }

    fn check_plaintext_len(&self, plaintext: &[u8]) -> Result<(), Error> {
        let max = self.config().max_plaintext_len();
        if plaintext.len() > max {
            return Err(Error::FragmentTooLong {
                len: plaintext.len(),
                max,
            });
        }
        Ok(())
    }

    fn seal(
        &self,
        (params, sequence): (Arc<SecurityParameters>, Sequence),
        content_type: ContentType,
        plaintext: &[u8],
        output: &mut Buf,
    ) -> Result<Sequence, Error> {
        let record = Record::seal(
            &params,
            content_type,
            self.config().version(),
            sequence,
            ExplicitNonce::from_sequence(sequence),
            plaintext,
        )?;

        record.serialize(output)?;

        trace!(
            "Send {} record {} ({} bytes)",
            content_type,
            sequence,
            record.encoded_len()
        );

        Ok(sequence)
    }
}
