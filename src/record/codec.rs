use nom::bytes::complete::take;
use nom::number::complete::be_u16;
use nom::IResult;

use super::Record;
use crate::buffer::Buf;
use crate::types::{ContentType, ProtocolVersion, Sequence};
use crate::util::be_u48;
use crate::Error;

/// DTLS record header length: content_type(1) + version(2) + epoch(2) + seq(6) + length(2)
pub const HEADER_LEN: usize = 13;

/// Outcome of parsing one record.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    /// A record of a known content type.
    Known(Record),
    /// A record with an unknown content type. Its bytes were consumed.
    Skip,
}

impl Record {
    /// Parse one record from the start of `input`.
    ///
    /// The header length must be fully backed by `input`, also for records that
    /// end up skipped. Otherwise there is no way to find the next record.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Parsed> {
        let (input, content_type) = ContentType::parse(input)?; // u8
        let (input, version) = ProtocolVersion::parse(input)?; // u16
        let (input, epoch) = be_u16(input)?; // u16
        let (input, sequence_number) = be_u48(input)?; // u48
        let (input, length) = be_u16(input)?; // u16
        let (rest, fragment) = take(length as usize)(input)?;

        let content_type = match content_type {
            Ok(v) => v,
            Err(code) => {
                trace!(
                    "Skip record with unknown content type {} (epoch {}, length {})",
                    code,
                    epoch,
                    length
                );
                return Ok((rest, Parsed::Skip));
            }
        };

        let sequence = Sequence {
            epoch,
            sequence_number,
        };

        let record = Record::new(content_type, version, sequence, fragment);

        Ok((rest, Parsed::Known(record)))
    }

    /// Append the header and fragment to `output`.
    ///
    /// The length field is taken from the fragment.
    pub fn serialize(&self, output: &mut Buf) -> Result<(), Error> {
        let length: u16 = self
            .fragment
            .len()
            .try_into()
            .map_err(|_| Error::FragmentTooLong {
                len: self.fragment.len(),
                max: u16::MAX as usize,
            })?;

        output.push(self.content_type.as_u8());
        self.version.serialize(output);
        output.extend_from_slice(&self.sequence.epoch.to_be_bytes());
        output.extend_from_slice(&self.sequence.sequence_number.to_be_bytes()[2..]);
        output.extend_from_slice(&length.to_be_bytes());
        output.extend_from_slice(&self.fragment);

        Ok(())
    }

    /// Length of the serialized record.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.fragment.len()
    }
}
