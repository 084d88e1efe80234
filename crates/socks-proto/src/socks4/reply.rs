use socks_types::{decode_address, AddressKind};

use crate::error::ProtocolError;

/// Outcome byte of a SOCKS4 reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReplyCode {
    RequestGranted = 0x5A,
    RequestRejectedOrFailed = 0x5B,
    /// Request failed because the client is not running identd (or not
    /// reachable from the server).
    ConnectionFailed = 0x5C,
    /// Request failed because the client's identd could not confirm the
    /// user ID in the request.
    AuthenticationFailed = 0x5D,
}

impl TryFrom<u8> for ReplyCode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x5A => Ok(Self::RequestGranted),
            0x5B => Ok(Self::RequestRejectedOrFailed),
            0x5C => Ok(Self::ConnectionFailed),
            0x5D => Ok(Self::AuthenticationFailed),
            _ => Err(ProtocolError::UnknownValue {
                context: "SOCKS4 reply",
                field: "reply_code",
                value,
            }),
        }
    }
}

/// A parsed SOCKS4 reply.
///
/// +----+----+----+----+----+----+----+----+
/// | VN | CD | DSTPORT |      DSTIP        |
/// +----+----+----+----+----+----+----+----+
///    1    1      2              4
///
/// VN (the version of the reply) must be 0x00.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub reply_code: ReplyCode,
    pub port: u16,
    pub addr: String,
}

const WIRE_LEN: usize = 8;

impl Reply {
    pub fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() != WIRE_LEN {
            return Err(ProtocolError::UnexpectedLength {
                context: "SOCKS4 reply",
                got: data.len(),
                expected: WIRE_LEN,
            });
        }

        if data[0] != 0x00 {
            return Err(ProtocolError::InvalidField {
                context: "SOCKS4 reply",
                field: "version",
                reason: "must be 0x00",
            });
        }

        let reply_code = ReplyCode::try_from(data[1])?;
        let port = u16::from_be_bytes([data[2], data[3]]);
        let addr = decode_address(AddressKind::Ipv4, &data[4..8])?;

        Ok(Self { reply_code, port, addr })
    }
}
