use std::fmt;

use nom::number::complete::be_u8;
use nom::IResult;

/// Record content type (RFC 6347 §4.1).
///
/// This is a closed set. Codes outside it are reported as `None` by
/// [`ContentType::from_u8`] so the parser can skip the record instead of
/// failing the whole datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    ChangeCipherSpec,
    Alert,
    Handshake,
    ApplicationData,
}

impl ContentType {
    /// All known content types.
    pub const ALL: &'static [ContentType] = &[
        ContentType::ChangeCipherSpec,
        ContentType::Alert,
        ContentType::Handshake,
        ContentType::ApplicationData,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            20 => Some(ContentType::ChangeCipherSpec),
            21 => Some(ContentType::Alert),
            22 => Some(ContentType::Handshake),
            23 => Some(ContentType::ApplicationData),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ContentType::ChangeCipherSpec => 20,
            ContentType::Alert => 21,
            ContentType::Handshake => 22,
            ContentType::ApplicationData => 23,
        }
    }

    /// Parse the content type byte. The raw code is kept for unknown types.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Result<ContentType, u8>> {
        let (input, byte) = be_u8(input)?;
        Ok((input, Self::from_u8(byte).ok_or(byte)))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::ChangeCipherSpec => "change_cipher_spec",
            ContentType::Alert => "alert",
            ContentType::Handshake => "handshake",
            ContentType::ApplicationData => "application_data",
        };
        write!(f, "{}({})", name, self.as_u8())
    }
}
