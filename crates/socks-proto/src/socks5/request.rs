use socks_types::{encode_address, EncodedAddress, ToHostPort};

use crate::error::{ProtocolMisuse, SocksError};
use crate::socks5::atyp::write_addr;
use crate::socks5::Command;

/// A SOCKS5 CONNECT, BIND, or UDP_ASSOCIATE request.
///
/// `0x05 | CMD | 0x00 | ATYP | ADDR | PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: Command,
    pub addr: EncodedAddress,
    pub port: u16,
}

impl CommandRequest {
    pub fn new(command: Command, addr: EncodedAddress, port: u16) -> Result<Self, ProtocolMisuse> {
        if addr.is_domain() && addr.bytes.len() > 255 {
            return Err(ProtocolMisuse::DomainNameTooLong { len: addr.bytes.len() });
        }
        Ok(Self { command, addr, port })
    }

    pub fn from_address(command: Command, address: impl ToHostPort) -> Result<Self, SocksError> {
        let (host, port) = address.to_host_port().map_err(crate::error::ProtocolError::from)?;
        let addr = encode_address(&host);
        Ok(Self::new(command, addr, port)?)
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.push(0x05);
        out.push(self.command.to_u8());
        out.push(0x00);
        write_addr(out, &self.addr);
        out.extend_from_slice(&self.port.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_connect_to_ipv4() {
        let request = CommandRequest::from_address(Command::Connect, ("127.0.0.1", 1080u16)).unwrap();
        let mut out = Vec::new();
        request.encode(&mut out);
        assert_eq!(out, vec![0x05, 0x01, 0x00, 0x01, 127, 0, 0, 1, 0x04, 0x38]);
    }

    #[test]
    fn encodes_connect_to_domain() {
        let request = CommandRequest::from_address(Command::Connect, ("localhost", 1080u16)).unwrap();
        let mut out = Vec::new();
        request.encode(&mut out);
        assert_eq!(
            out,
            vec![0x05, 0x01, 0x00, 0x03, 9, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't', 0x04, 0x38]
        );
    }
}
