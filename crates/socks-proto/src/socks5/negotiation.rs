use crate::error::{ProtocolError, ProtocolMisuse};
use crate::socks5::AuthMethod;

const VERSION: u8 = 0x05;

/// The opening `0x05 | N | methods[N]` method-negotiation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationRequest {
    pub methods: Vec<AuthMethod>,
}

impl NegotiationRequest {
    pub fn new(methods: Vec<AuthMethod>) -> Result<Self, ProtocolMisuse> {
        if methods.is_empty() || methods.len() > 255 {
            return Err(ProtocolMisuse::InvalidCredentialLength {
                field: "methods",
                len: methods.len(),
            });
        }
        Ok(Self { methods })
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.push(VERSION);
        out.push(self.methods.len() as u8);
        out.extend(self.methods.iter().map(|m| m.to_u8()));
    }
}

/// The server's chosen method, `0x05 | method`.
///
/// The version byte SHOULD be exactly `0x05`; the source client does not
/// check it, but this core tightens that and rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiationReply {
    pub method: AuthMethod,
}

impl NegotiationReply {
    pub fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() != 2 {
            return Err(ProtocolError::UnexpectedLength {
                context: "SOCKS5 method-negotiation reply",
                got: data.len(),
                expected: 2,
            });
        }

        if data[0] != VERSION {
            return Err(ProtocolError::InvalidField {
                context: "SOCKS5 method-negotiation reply",
                field: "version",
                reason: "must be 0x05",
            });
        }

        Ok(Self {
            method: AuthMethod::from_u8(data[1]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_request() {
        let request = NegotiationRequest::new(vec![AuthMethod::GssApi, AuthMethod::UsernamePassword]).unwrap();
        let mut out = Vec::new();
        request.encode(&mut out);
        assert_eq!(out, vec![0x05, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn rejects_empty_methods() {
        assert!(NegotiationRequest::new(Vec::new()).is_err());
    }

    #[test]
    fn parses_no_acceptable_methods_reply() {
        let reply = NegotiationReply::parse(&[0x05, 0xFF]).unwrap();
        assert_eq!(reply.method, AuthMethod::Other(0xFF));
        assert!(!reply.method.is_acceptable());
    }

    #[test]
    fn rejects_wrong_version() {
        assert!(NegotiationReply::parse(&[0x04, 0x00]).is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(NegotiationReply::parse(&[0x05]).is_err());
    }
}
