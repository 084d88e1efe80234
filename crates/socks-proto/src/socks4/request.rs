use socks_types::{encode_address, AddressKind, EncodedAddress, ToHostPort};

use crate::error::{ProtocolMisuse, SocksError};
use crate::socks4::Command;

/// A CONNECT or BIND request bound for a SOCKS4 or SOCKS4A server.
///
/// The two wire formats differ only in how the destination address is
/// carried: SOCKS4 demands a literal IPv4 address, SOCKS4A carries the
/// invalid address `0.0.0.1`..`0.0.0.255` followed by the domain name after
/// `user_id`. Modeling both as one enum keeps `send` a single exhaustive
/// match instead of two near-identical request types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Ipv4 {
        command: Command,
        port: u16,
        addr: EncodedAddress,
        user_id: Vec<u8>,
    },
    Domain {
        command: Command,
        port: u16,
        domain: Vec<u8>,
        user_id: Vec<u8>,
    },
}

/// Placeholder SOCKS4A destination address: any value in `0.0.0.1..=0.0.0.255`
/// signals "the real address follows as a domain name". This core emits
/// `0.0.0.255`, matching the reference client.
const SOCKS4A_INVALID_IP: [u8; 4] = [0, 0, 0, 0xFF];

impl Request {
    /// Builds a strict SOCKS4 request: the address must resolve to an IPv4
    /// literal, matching the base protocol which has no way to carry a
    /// domain name.
    pub fn from_address(
        command: Command,
        address: impl ToHostPort,
        user_id: Vec<u8>,
    ) -> Result<Self, SocksError> {
        let (host, port) = address.to_host_port().map_err(crate::error::ProtocolError::from)?;
        let encoded = encode_address(&host);

        if encoded.kind != AddressKind::Ipv4 {
            return Err(ProtocolMisuse::UnsupportedAddressFamily {
                protocol: "SOCKS4",
                kind: encoded.kind,
            }
            .into());
        }

        Ok(Self::Ipv4 {
            command,
            port,
            addr: encoded,
            user_id,
        })
    }

    /// Builds a SOCKS4A request, which additionally allows domain names.
    /// IPv6 is never acceptable: neither wire format has a slot for it.
    pub fn from_address_4a(
        command: Command,
        address: impl ToHostPort,
        user_id: Vec<u8>,
    ) -> Result<Self, SocksError> {
        let (host, port) = address.to_host_port().map_err(crate::error::ProtocolError::from)?;
        let encoded = encode_address(&host);

        match encoded.kind {
            AddressKind::Ipv4 => Ok(Self::Ipv4 {
                command,
                port,
                addr: encoded,
                user_id,
            }),
            AddressKind::Domain => {
                if encoded.bytes.len() > 255 {
                    return Err(ProtocolMisuse::DomainNameTooLong {
                        len: encoded.bytes.len(),
                    }
                    .into());
                }
                Ok(Self::Domain {
                    command,
                    port,
                    domain: encoded.bytes,
                    user_id,
                })
            }
            AddressKind::Ipv6 => Err(ProtocolMisuse::UnsupportedAddressFamily {
                protocol: "SOCKS4A",
                kind: AddressKind::Ipv6,
            }
            .into()),
        }
    }

    pub(crate) fn command(&self) -> Command {
        match self {
            Self::Ipv4 { command, .. } | Self::Domain { command, .. } => *command,
        }
    }

    /// Serializes this request into its wire form, appended to `out`.
    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.push(0x04);
        out.push(self.command().to_u8());

        match self {
            Self::Ipv4 { port, addr, user_id, .. } => {
                out.extend_from_slice(&port.to_be_bytes());
                out.extend_from_slice(&addr.bytes);
                out.extend_from_slice(user_id);
                out.push(0x00);
            }
            Self::Domain { port, domain, user_id, .. } => {
                out.extend_from_slice(&port.to_be_bytes());
                out.extend_from_slice(&SOCKS4A_INVALID_IP);
                out.extend_from_slice(user_id);
                out.push(0x00);
                out.extend_from_slice(domain);
                out.push(0x00);
            }
        }
    }
}
