//! Address parsing and wire-form conversion shared by the SOCKS4 and SOCKS5
//! protocol engines.
//!
//! This crate knows nothing about either wire protocol: it only converts
//! between host strings (`"127.0.0.1"`, `"[::1]:1080"`, `"example.com"`) and
//! the three encoded forms SOCKS requests carry on the wire (IPv4, IPv6,
//! domain name).

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Tag identifying which of the three SOCKS address forms an
/// [`EncodedAddress`] carries.
///
/// Kept separate from any particular wire representation (e.g. the SOCKS5
/// `ATYP` byte) so this crate stays usable from both engines; the
/// conversion to/from `ATYP` lives in `socks-proto` next to the SOCKS5 wire
/// types it is about, rather than here or there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    Domain,
}

/// A host address in the byte form SOCKS puts on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAddress {
    pub kind: AddressKind,
    pub bytes: Vec<u8>,
}

impl EncodedAddress {
    pub fn ipv4(addr: Ipv4Addr) -> Self {
        Self {
            kind: AddressKind::Ipv4,
            bytes: addr.octets().to_vec(),
        }
    }

    pub fn ipv6(addr: Ipv6Addr) -> Self {
        Self {
            kind: AddressKind::Ipv6,
            bytes: addr.octets().to_vec(),
        }
    }

    pub fn domain(name: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: AddressKind::Domain,
            bytes: name.into(),
        }
    }

    pub fn is_ipv4(&self) -> bool {
        self.kind == AddressKind::Ipv4
    }

    pub fn is_domain(&self) -> bool {
        self.kind == AddressKind::Domain
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AddressError {
    #[error("invalid host:port string: {input:?}")]
    InvalidHostPort { input: String },

    #[error("domain name too long: {len} bytes, max is 255")]
    DomainTooLong { len: usize },

    #[error("invalid {kind:?} address length: expected {expected} bytes, got {got}")]
    InvalidEncodedLength {
        kind: AddressKind,
        expected: usize,
        got: usize,
    },

    #[error("domain name is not valid UTF-8")]
    InvalidUtf8Domain,
}

/// Converts a host string into its SOCKS wire form.
///
/// Probe order is significant: IPv6 textual form is tried first, then IPv4,
/// falling back to a domain name. This order is mandatory so a dotted IPv4
/// string is never misclassified as a domain name. This function never
/// fails -- a domain-name fallback is always available.
pub fn encode_address(host: &str) -> EncodedAddress {
    if let Ok(addr) = host.parse::<Ipv6Addr>() {
        return EncodedAddress::ipv6(addr);
    }

    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return EncodedAddress::ipv4(addr);
    }

    EncodedAddress::domain(host.as_bytes().to_vec())
}

/// Converts a SOCKS wire-form address back into its string presentation.
///
/// IPv4/IPv6 use the standard (canonical, compressed for IPv6) textual
/// form. Domain names decode as UTF-8.
pub fn decode_address(kind: AddressKind, bytes: &[u8]) -> Result<String, AddressError> {
    match kind {
        AddressKind::Ipv4 => {
            let octets: [u8; 4] = bytes.try_into().map_err(|_| AddressError::InvalidEncodedLength {
                kind,
                expected: 4,
                got: bytes.len(),
            })?;
            Ok(Ipv4Addr::from(octets).to_string())
        }
        AddressKind::Ipv6 => {
            let octets: [u8; 16] = bytes.try_into().map_err(|_| AddressError::InvalidEncodedLength {
                kind,
                expected: 16,
                got: bytes.len(),
            })?;
            Ok(Ipv6Addr::from(octets).to_string())
        }
        AddressKind::Domain => {
            String::from_utf8(bytes.to_vec()).map_err(|_| AddressError::InvalidUtf8Domain)
        }
    }
}

/// Splits a `"host:port"` or bracketed `"[ipv6]:port"` string into its parts.
///
/// Bracketed form is recognized as `[<address>]:<port>` where `<address>`
/// is anything but a closing bracket. Anything else is split on the first
/// colon. The host portion is never validated here; only the port must
/// parse as a decimal integer in `0..=65535`.
pub fn split_address_port(s: &str) -> Result<(String, u16), AddressError> {
    let invalid = || AddressError::InvalidHostPort { input: s.to_owned() };

    if let Some(rest) = s.strip_prefix('[') {
        let close = rest.find(']').ok_or_else(invalid)?;
        let (host, after_bracket) = rest.split_at(close);
        let port_str = after_bracket[1..].strip_prefix(':').ok_or_else(invalid)?;
        let port: u16 = port_str.parse().map_err(|_| invalid())?;
        return Ok((host.to_owned(), port));
    }

    let (host, port_str) = s.split_once(':').ok_or_else(invalid)?;
    let port: u16 = port_str.parse().map_err(|_| invalid())?;
    Ok((host.to_owned(), port))
}

/// Conversion to a `(host, port)` pair, similar in spirit to
/// `std::net::ToSocketAddrs` but without performing any DNS resolution.
pub trait ToHostPort {
    fn to_host_port(&self) -> Result<(String, u16), AddressError>;
}

impl ToHostPort for (&str, u16) {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        Ok((self.0.to_owned(), self.1))
    }
}

impl ToHostPort for (String, u16) {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        Ok((self.0.clone(), self.1))
    }
}

impl ToHostPort for (Ipv4Addr, u16) {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        Ok((self.0.to_string(), self.1))
    }
}

impl ToHostPort for (Ipv6Addr, u16) {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        Ok((self.0.to_string(), self.1))
    }
}

impl ToHostPort for str {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        split_address_port(self)
    }
}

impl ToHostPort for String {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        split_address_port(self)
    }
}

impl<T: ToHostPort + ?Sized> ToHostPort for &T {
    fn to_host_port(&self) -> Result<(String, u16), AddressError> {
        (**self).to_host_port()
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Ipv4 => write!(f, "IPv4"),
            AddressKind::Ipv6 => write!(f, "IPv6"),
            AddressKind::Domain => write!(f, "domain name"),
        }
    }
}
