use std::cmp::Ordering;
use std::fmt;

use crate::Error;

/// Largest value of the 48-bit record sequence number.
pub const MAX_SEQUENCE_NUMBER: u64 = (1 << 48) - 1;

/// Epoch and record sequence number of a DTLS record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    /// The epoch (incremented on key change).
    pub epoch: u16,
    /// The sequence number within the epoch (technically u48).
    pub sequence_number: u64,
}

impl Sequence {
    /// Create a new sequence with the given epoch and sequence number 0.
    pub fn new(epoch: u16) -> Self {
        Self {
            epoch,
            sequence_number: 0,
        }
    }

    /// Create a sequence, checking the 48-bit range of the sequence number.
    pub fn with_number(epoch: u16, sequence_number: u64) -> Result<Self, Error> {
        if sequence_number > MAX_SEQUENCE_NUMBER {
            return Err(Error::SequenceOutOfRange(sequence_number));
        }
        Ok(Self {
            epoch,
            sequence_number,
        })
    }

    /// The 8 bytes `epoch(2) || sequence_number(6)`, big endian.
    ///
    /// This is the `seq_num` used in the AEAD additional data.
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut out = self.sequence_number.to_be_bytes();
        out[..2].copy_from_slice(&self.epoch.to_be_bytes());
        out
    }

    /// Next sequence number in the same epoch, or `None` when 2^48 is reached.
    pub fn next(&self) -> Option<Sequence> {
        // RFC 6347 §4.1: implementations MUST either abandon an association
        // or rehandshake prior to allowing the sequence number to wrap.
        let n = self.sequence_number.checked_add(1)?;
        (n <= MAX_SEQUENCE_NUMBER).then_some(Sequence {
            epoch: self.epoch,
            sequence_number: n,
        })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[epoch: {}, sequence_number: {}]",
            self.epoch, self.sequence_number,
        )
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then(self.sequence_number.cmp(&other.sequence_number))
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Increase the epoch by one and error if it wraps.
pub fn next_epoch(epoch: u16) -> Result<u16, Error> {
    // https://datatracker.ietf.org/doc/html/rfc6347#section-4.1
    //
    // Similarly, implementations MUST NOT allow the epoch to wrap, but
    // instead MUST establish a new association
    epoch.checked_add(1).ok_or(Error::WrappedEpoch)
}
