//! Epoch bookkeeping for one connection.
//!
//! The [`Session`] holds the installed [`SecurityParameters`] for both
//! directions:
//!
//! * **Read**: a small table indexed by `epoch % EPOCH_WINDOW` keeps the
//!   current epoch and the one before it. The previous epoch stays readable for
//!   [`Config::epoch_grace_period`] after being superseded, so late records
//!   still decrypt. Lookups clone an `Arc` under a read lock and decrypt
//!   without holding any lock.
//! * **Write**: the same kind of table. New records go out in the current
//!   epoch, retransmissions may still use the previous one. Each epoch has its
//!   own sequence counter behind a mutex so no two records of an epoch share
//!   one.
//!
//! Installing a new epoch swaps the parameters in one locked step; readers
//! see either the old or the new table, never a partial update.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use crate::config::Config;
use crate::security::{Direction, SecurityParameters};
use crate::types::{next_epoch, Sequence};
use crate::Error;

/// Number of epochs held per direction (current and previous).
pub const EPOCH_WINDOW: usize = 2;

/// Security context of one connection, shared by all threads processing it.
#[derive(Debug)]
pub struct Session {
    config: Arc<Config>,
    read: RwLock<ReadEpochs>,
    write: RwLock<WriteEpochs>,
}

#[derive(Debug)]
struct ReadSlot {
    params: Arc<SecurityParameters>,
    /// Set when the next epoch was installed.
    superseded_at: Option<Instant>,
}

#[derive(Debug)]
struct ReadEpochs {
    current: u16,
    slots: [Option<ReadSlot>; EPOCH_WINDOW],
}

#[derive(Debug)]
struct WriteSlot {
    params: Arc<SecurityParameters>,
    /// `None` once the 48-bit sequence space is used up.
    next: Mutex<Option<Sequence>>,
}

impl WriteSlot {
    fn new(params: Arc<SecurityParameters>) -> Self {
        let next = Mutex::new(Some(Sequence::new(params.epoch())));
        WriteSlot { params, next }
    }
}

#[derive(Debug)]
struct WriteEpochs {
    current: u16,
    slots: [Option<WriteSlot>; EPOCH_WINDOW],
}

impl Session {
    /// Create a session in epoch 0 (null cipher) for both directions.
    pub fn new(config: Arc<Config>) -> Self {
        let null = Arc::new(SecurityParameters::null());

        let read = ReadEpochs {
            current: 0,
            slots: [
                Some(ReadSlot {
                    params: Arc::clone(&null),
                    superseded_at: None,
                }),
                None,
            ],
        };

        let write = WriteEpochs {
            current: 0,
            slots: [Some(WriteSlot::new(null)), None],
        };

        Session {
            config,
            read: RwLock::new(read),
            write: RwLock::new(write),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Install the parameters of the next epoch for `direction`.
    ///
    /// The epoch of `params` must be exactly one more than the current one.
    /// `now` marks the start of the grace period of the superseded read epoch.
    pub fn install(
        &self,
        direction: Direction,
        params: SecurityParameters,
        now: Instant,
    ) -> Result<(), Error> {
        match direction {
            Direction::Read => self.install_read(params, now),
            Direction::Write => self.install_write(params),
        }
    }

    /// Install the read parameters for the next epoch.
    pub fn install_read(&self, params: SecurityParameters, now: Instant) -> Result<(), Error> {
        let mut read = self.read.write().unwrap_or_else(PoisonError::into_inner);

        let expected = next_epoch(read.current)?;
        if params.epoch() != expected {
            return Err(Error::InvalidEpoch {
                expected,
                got: params.epoch(),
            });
        }
        require_protection(&params)?;

        let previous = read.current;
        if let Some(slot) = read.slots[slot_index(previous)].as_mut() {
            slot.superseded_at = Some(now);
        }

        debug!(
            "Install read epoch {} ({}), epoch {} in grace period",
            expected,
            params.cipher_suite(),
            previous
        );

        read.slots[slot_index(expected)] = Some(ReadSlot {
            params: Arc::new(params),
            superseded_at: None,
        });
        read.current = expected;

        Ok(())
    }

    /// Install the write parameters for the next epoch.
    ///
    /// Records reserved with [`Session::reserve_write`] after this use the new
    /// epoch, starting at sequence number 0. The previous epoch keeps its
    /// parameters and counter for retransmissions until the epoch after this
    /// one is installed.
    pub fn install_write(&self, params: SecurityParameters) -> Result<(), Error> {
        let mut write = self.write.write().unwrap_or_else(PoisonError::into_inner);

        let expected = next_epoch(write.current)?;
        if params.epoch() != expected {
            return Err(Error::InvalidEpoch {
                expected,
                got: params.epoch(),
            });
        }
        require_protection(&params)?;

        debug!(
            "Install write epoch {} ({}), epoch {} kept for retransmissions",
            expected,
            params.cipher_suite(),
            write.current
        );

        write.slots[slot_index(expected)] = Some(WriteSlot::new(Arc::new(params)));
        write.current = expected;

        Ok(())
    }

    /// Current read epoch.
    pub fn read_epoch(&self) -> u16 {
        self.read
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
    }

    /// Current write epoch.
    pub fn write_epoch(&self) -> u16 {
        self.write
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
    }

    /// Parameters to decrypt a record of `epoch` received at `now`.
    ///
    /// Fails with [`Error::UnknownEpoch`] for epochs not installed yet, epochs
    /// older than the previous one, and the previous epoch once its grace
    /// period is over.
    pub fn read_parameters(
        &self,
        epoch: u16,
        now: Instant,
    ) -> Result<Arc<SecurityParameters>, Error> {
        let read = self.read.read().unwrap_or_else(PoisonError::into_inner);

        let Some(slot) = read.slots[slot_index(epoch)].as_ref() else {
            return Err(Error::UnknownEpoch(epoch));
        };

        if slot.params.epoch() != epoch {
            return Err(Error::UnknownEpoch(epoch));
        }

        if let Some(superseded_at) = slot.superseded_at {
            if now.saturating_duration_since(superseded_at) > self.config.epoch_grace_period() {
                trace!("Grace period over for epoch {}", epoch);
                return Err(Error::UnknownEpoch(epoch));
            }
        }

        Ok(Arc::clone(&slot.params))
    }

    /// Parameters of the current write epoch.
    pub fn write_parameters(&self) -> Arc<SecurityParameters> {
        let write = self.write.read().unwrap_or_else(PoisonError::into_inner);
        // unwrap: the current epoch always has a slot
        let slot = write.slots[slot_index(write.current)].as_ref().unwrap();
        Arc::clone(&slot.params)
    }

    /// Reserve the next outgoing sequence number of the current write epoch.
    ///
    /// Each call returns a distinct sequence number together with the
    /// parameters it must be protected with.
    pub fn reserve_write(&self) -> Result<(Arc<SecurityParameters>, Sequence), Error> {
        let write = self.write.read().unwrap_or_else(PoisonError::into_inner);
        reserve(&write, write.current)
    }

    /// Reserve the next outgoing sequence number of `epoch`.
    ///
    /// Only the current and the previous write epoch are available. The
    /// previous epoch continues its own numbering, which is what a
    /// retransmitted flight of that epoch needs.
    pub fn reserve_write_in(
        &self,
        epoch: u16,
    ) -> Result<(Arc<SecurityParameters>, Sequence), Error> {
        let write = self.write.read().unwrap_or_else(PoisonError::into_inner);
        reserve(&write, epoch)
    }

    /// Whether records of `epoch` are protected in `direction`.
    ///
    /// Epochs without installed (or still valid) parameters report `false`.
    pub fn is_encrypted(&self, direction: Direction, epoch: u16, now: Instant) -> bool {
        match direction {
            Direction::Read => self
                .read_parameters(epoch, now)
                .map(|p| p.is_encrypted())
                .unwrap_or(false),
            Direction::Write => {
                let write = self.write.read().unwrap_or_else(PoisonError::into_inner);
                write_slot(&write, epoch)
                    .map(|slot| slot.params.is_encrypted())
                    .unwrap_or(false)
            }
        }
    }

    #[cfg(test)]
    fn set_next_write_sequence(&self, sequence_number: u64) {
        let write = self.write.read().unwrap();
        let slot = write_slot(&write, write.current).unwrap();
        let next = Sequence::with_number(write.current, sequence_number).unwrap();
        *slot.next.lock().unwrap() = Some(next);
    }
}

fn write_slot(write: &WriteEpochs, epoch: u16) -> Option<&WriteSlot> {
    write.slots[slot_index(epoch)]
        .as_ref()
        .filter(|slot| slot.params.epoch() == epoch)
}

fn reserve(write: &WriteEpochs, epoch: u16) -> Result<(Arc<SecurityParameters>, Sequence), Error> {
    let Some(slot) = write_slot(write, epoch) else {
        return Err(Error::UnknownEpoch(epoch));
    };

    let mut next = slot.next.lock().unwrap_or_else(PoisonError::into_inner);

    let Some(sequence) = *next else {
        warn!("Write sequence exhausted in epoch {}", epoch);
        return Err(Error::SequenceExhausted(epoch));
    };

    *next = sequence.next();

    Ok((Arc::clone(&slot.params), sequence))
}

// Only epoch 0 is unprotected.
fn require_protection(params: &SecurityParameters) -> Result<(), Error> {
    if !params.is_encrypted() {
        return Err(Error::InvalidKeyMaterial(format!(
            "Epoch {} requires a protecting cipher suite",
            params.epoch()
        )));
    }
    Ok(())
}

fn slot_index(epoch: u16) -> usize {
    epoch as usize % EPOCH_WINDOW
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::{CipherSuite, MAX_SEQUENCE_NUMBER};

    fn params(epoch: u16) -> SecurityParameters {
        SecurityParameters::new(
            epoch,
            CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
            &[epoch as u8; 16],
            &[1, 2, 3, 4],
        )
        .unwrap()
    }

    fn session() -> Session {
        let config = Config::builder()
            .epoch_grace_period(Duration::from_secs(10))
            .build()
            .unwrap();
        Session::new(Arc::new(config))
    }

    #[test]
    fn starts_in_null_epoch() {
        let s = session();
        let now = Instant::now();
        assert_eq!(s.read_epoch(), 0);
        assert_eq!(s.write_epoch(), 0);
        assert!(!s.read_parameters(0, now).unwrap().is_encrypted());
        assert!(!s.is_encrypted(Direction::Write, 0, now));
        assert_eq!(s.read_parameters(1, now).unwrap_err(), Error::UnknownEpoch(1));
    }

    #[test]
    fn write_sequence_is_monotonic() {
        let s = session();
        let (_, a) = s.reserve_write().unwrap();
        let (_, b) = s.reserve_write().unwrap();
        assert_eq!(a, Sequence::new(0));
        assert_eq!(b.sequence_number, 1);

        s.install_write(params(1)).unwrap();
        let (p, c) = s.reserve_write().unwrap();
        assert_eq!(p.epoch(), 1);
        assert_eq!(c, Sequence::new(1));
        assert!(s.is_encrypted(Direction::Write, 1, Instant::now()));
    }

    #[test]
    fn previous_write_epoch_keeps_counting() {
        let s = session();
        s.reserve_write().unwrap();
        s.reserve_write().unwrap();

        s.install_write(params(1)).unwrap();
        let (_, a) = s.reserve_write().unwrap();
        let (p, b) = s.reserve_write_in(0).unwrap();
        let (_, c) = s.reserve_write_in(1).unwrap();

        assert_eq!(a, Sequence::new(1));
        assert_eq!(b, Sequence::with_number(0, 2).unwrap());
        assert!(!p.is_encrypted());
        assert_eq!(c, Sequence::with_number(1, 1).unwrap());
        assert!(!s.is_encrypted(Direction::Write, 0, Instant::now()));

        // Epoch 2 takes over the slot of epoch 0.
        s.install_write(params(2)).unwrap();
        assert_eq!(s.reserve_write_in(0).unwrap_err(), Error::UnknownEpoch(0));
        assert_eq!(s.reserve_write_in(1).unwrap().1.sequence_number, 2);
        assert_eq!(s.reserve_write_in(3).unwrap_err(), Error::UnknownEpoch(3));
        assert_eq!(s.write_epoch(), 2);
    }

    #[test]
    fn write_sequence_exhaustion() {
        let s = session();
        s.set_next_write_sequence(MAX_SEQUENCE_NUMBER);
        let (_, last) = s.reserve_write().unwrap();
        assert_eq!(last.sequence_number, MAX_SEQUENCE_NUMBER);
        assert_eq!(s.reserve_write().unwrap_err(), Error::SequenceExhausted(0));
    }

    #[test]
    fn epochs_must_be_consecutive() {
        let s = session();
        let now = Instant::now();
        assert_eq!(
            s.install_read(params(2), now).unwrap_err(),
            Error::InvalidEpoch {
                expected: 1,
                got: 2
            }
        );
        assert_eq!(
            s.install_write(params(3)).unwrap_err(),
            Error::InvalidEpoch {
                expected: 1,
                got: 3
            }
        );
        let null = SecurityParameters::new(1, CipherSuite::TLS_NULL_WITH_NULL_NULL, &[], &[]);
        assert!(matches!(
            s.install_write(null.unwrap()).unwrap_err(),
            Error::InvalidKeyMaterial(_)
        ));
        s.install(Direction::Read, params(1), now).unwrap();
        assert_eq!(s.read_epoch(), 1);
    }

    #[test]
    fn previous_epoch_within_grace_period() {
        let s = session();
        let t0 = Instant::now();

        s.install_read(params(1), t0).unwrap();
        s.install_read(params(2), t0 + Duration::from_secs(1)).unwrap();

        // Epoch 0 slot was overwritten by epoch 2.
        assert_eq!(
            s.read_parameters(0, t0 + Duration::from_secs(1)).unwrap_err(),
            Error::UnknownEpoch(0)
        );

        let p = s.read_parameters(1, t0 + Duration::from_secs(5)).unwrap();
        assert_eq!(p.epoch(), 1);
        assert!(s.read_parameters(1, t0 + Duration::from_secs(11)).is_ok());

        assert_eq!(
            s.read_parameters(1, t0 + Duration::from_secs(12)).unwrap_err(),
            Error::UnknownEpoch(1)
        );

        // The current epoch has no grace limit.
        assert!(s.read_parameters(2, t0 + Duration::from_secs(1000)).is_ok());
    }

    #[test]
    fn session_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
