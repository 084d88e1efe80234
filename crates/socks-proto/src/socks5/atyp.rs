use socks_types::{decode_address, AddressKind, EncodedAddress};

use crate::error::ProtocolError;

/// The SOCKS5 `ATYP` wire tag.
///
/// Kept distinct from [`AddressKind`] (which `socks-types` owns and knows
/// nothing about SOCKS5) so the conversion between the two lives in exactly
/// one place, next to the wire code that needs it, rather than split across
/// both crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Atyp {
    Ipv4 = 0x01,
    Domain = 0x03,
    Ipv6 = 0x04,
}

impl Atyp {
    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Result<Self, ProtocolError> {
        match value {
            0x01 => Ok(Self::Ipv4),
            0x03 => Ok(Self::Domain),
            0x04 => Ok(Self::Ipv6),
            _ => Err(ProtocolError::UnknownValue {
                context: "SOCKS5 address",
                field: "atyp",
                value,
            }),
        }
    }
}

impl From<AddressKind> for Atyp {
    fn from(kind: AddressKind) -> Self {
        match kind {
            AddressKind::Ipv4 => Self::Ipv4,
            AddressKind::Ipv6 => Self::Ipv6,
            AddressKind::Domain => Self::Domain,
        }
    }
}

impl From<Atyp> for AddressKind {
    fn from(atyp: Atyp) -> Self {
        match atyp {
            Atyp::Ipv4 => Self::Ipv4,
            Atyp::Ipv6 => Self::Ipv6,
            Atyp::Domain => Self::Domain,
        }
    }
}

/// Appends `ATYP | ADDR` (and, for `DOMAIN`, the length-prefix byte) to `out`.
pub(crate) fn write_addr(out: &mut Vec<u8>, addr: &EncodedAddress) {
    let atyp = Atyp::from(addr.kind);
    out.push(atyp.to_u8());
    if atyp == Atyp::Domain {
        // Length was already validated not to exceed 255 by the caller.
        out.push(addr.bytes.len() as u8);
    }
    out.extend_from_slice(&addr.bytes);
}

/// Reads `ATYP | ADDR` (and, for `DOMAIN`, its length-prefix byte) from the
/// front of `data`, returning the decoded address string and the number of
/// bytes consumed.
pub(crate) fn read_addr(data: &[u8]) -> Result<(String, usize), ProtocolError> {
    let atyp_byte = *data.first().ok_or(ProtocolError::NotEnoughBytes {
        context: "SOCKS5 address",
        received: data.len(),
        expected: 1,
    })?;
    let atyp = Atyp::from_u8(atyp_byte)?;

    match atyp {
        Atyp::Ipv4 => {
            let body = data.get(1..5).ok_or(ProtocolError::NotEnoughBytes {
                context: "SOCKS5 IPv4 address",
                received: data.len(),
                expected: 5,
            })?;
            Ok((decode_address(AddressKind::Ipv4, body)?, 5))
        }
        Atyp::Ipv6 => {
            let body = data.get(1..17).ok_or(ProtocolError::NotEnoughBytes {
                context: "SOCKS5 IPv6 address",
                received: data.len(),
                expected: 17,
            })?;
            Ok((decode_address(AddressKind::Ipv6, body)?, 17))
        }
        Atyp::Domain => {
            let len = *data.get(1).ok_or(ProtocolError::NotEnoughBytes {
                context: "SOCKS5 domain address",
                received: data.len(),
                expected: 2,
            })? as usize;
            // The length-prefix byte is framing, not part of the domain
            // name: it must not be included in the decoded string.
            let body = data.get(2..2 + len).ok_or(ProtocolError::NotEnoughBytes {
                context: "SOCKS5 domain address",
                received: data.len(),
                expected: 2 + len,
            })?;
            Ok((decode_address(AddressKind::Domain, body)?, 2 + len))
        }
    }
}
