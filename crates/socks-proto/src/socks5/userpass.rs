use crate::error::{ProtocolError, ProtocolMisuse};

const VERSION: u8 = 0x01;

/// RFC 1929 username/password sub-negotiation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePasswordRequest {
    pub username: Vec<u8>,
    pub password: Vec<u8>,
}

impl UsernamePasswordRequest {
    pub fn new(username: Vec<u8>, password: Vec<u8>) -> Result<Self, ProtocolMisuse> {
        if username.is_empty() || username.len() > 255 {
            return Err(ProtocolMisuse::InvalidCredentialLength {
                field: "username",
                len: username.len(),
            });
        }
        if password.is_empty() || password.len() > 255 {
            return Err(ProtocolMisuse::InvalidCredentialLength {
                field: "password",
                len: password.len(),
            });
        }
        Ok(Self { username, password })
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.push(VERSION);
        out.push(self.username.len() as u8);
        out.extend_from_slice(&self.username);
        out.push(self.password.len() as u8);
        out.extend_from_slice(&self.password);
    }
}

/// RFC 1929 username/password sub-negotiation reply.
///
/// The source checks only for the literal two-byte sequence `0x01 0x00`;
/// this tightens that to validate the version byte and treat byte[1] as a
/// general status (0 = success, anything else = failure), per the spec's
/// documented fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernamePasswordReply {
    pub success: bool,
}

impl UsernamePasswordReply {
    pub fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() != 2 {
            return Err(ProtocolError::UnexpectedLength {
                context: "SOCKS5 username/password reply",
                got: data.len(),
                expected: 2,
            });
        }

        if data[0] != VERSION {
            return Err(ProtocolError::InvalidField {
                context: "SOCKS5 username/password reply",
                field: "version",
                reason: "must be 0x01",
            });
        }

        Ok(Self { success: data[1] == 0x00 })
    }
}
