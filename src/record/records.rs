use std::ops::Deref;

use super::{Parsed, Record};
use crate::Error;

/// The known records parsed from a single UDP datagram, in wire order.
#[derive(Debug, Default)]
pub struct Records {
    records: Vec<Record>,
}

impl Records {
    /// Split a datagram into records.
    ///
    /// Records of unknown content type are dropped without failing the rest
    /// of the datagram. A header or fragment running past the end of the
    /// datagram fails the whole datagram, as does exceeding `max_records`
    /// (skipped records included).
    pub fn parse(mut datagram: &[u8], max_records: usize) -> Result<Records, Error> {
        let mut records = Vec::new();
        let mut count = 0;

        while !datagram.is_empty() {
            count += 1;
            if count > max_records {
                return Err(Error::TooManyRecords(max_records));
            }

            let (rest, parsed) = Record::parse(datagram)?;

            if let Parsed::Known(record) = parsed {
                records.push(record);
            }

            datagram = rest;
        }

        Ok(Records { records })
    }

    pub fn into_vec(self) -> Vec<Record> {
        self.records
    }
}

impl Deref for Records {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl IntoIterator for Records {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
