use std::fmt;

use nom::number::complete::be_u8;
use nom::IResult;

use crate::buffer::Buf;

/// Record layer protocol version.
///
/// Holds the nominal `major.minor` numbers. On the wire DTLS stores each
/// number as its one's complement, so DTLS 1.2 is `0xFE 0xFD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    major: u8,
    minor: u8,
}

impl ProtocolVersion {
    pub const DTLS1_0: ProtocolVersion = ProtocolVersion::new(1, 0);
    pub const DTLS1_2: ProtocolVersion = ProtocolVersion::new(1, 2);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    /// Build from the two wire bytes.
    pub fn from_wire(bytes: [u8; 2]) -> Self {
        Self::new(!bytes[0], !bytes[1])
    }

    /// The two wire bytes.
    pub fn to_wire(&self) -> [u8; 2] {
        [!self.major, !self.minor]
    }

    /// Any version is accepted here. The record layer only carries it.
    pub fn parse(input: &[u8]) -> IResult<&[u8], ProtocolVersion> {
        let (input, major) = be_u8(input)?;
        let (input, minor) = be_u8(input)?;
        Ok((input, Self::from_wire([major, minor])))
    }

    pub fn serialize(&self, output: &mut Buf) {
        output.extend_from_slice(&self.to_wire());
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::DTLS1_2
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DTLS {}.{}", self.major, self.minor)
    }
}
