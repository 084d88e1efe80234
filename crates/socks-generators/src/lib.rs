use proptest::array::{uniform4, uniform16};
use proptest::prelude::*;
use socks_types::{AddressKind, EncodedAddress};

pub fn port() -> impl Strategy<Value = u16> {
    any::<u16>()
}

pub fn ipv4_octets() -> impl Strategy<Value = [u8; 4]> {
    uniform4(any::<u8>())
}

pub fn ipv6_octets() -> impl Strategy<Value = [u8; 16]> {
    uniform16(any::<u8>())
}

pub fn domain_name() -> impl Strategy<Value = String> {
    "[a-z]{1,10}\\.[a-z]{1,5}"
}

pub fn user_id() -> impl Strategy<Value = Vec<u8>> {
    "[a-zA-Z0-9]{0,16}".prop_map(|s| s.into_bytes())
}

/// A SOCKS wire-form address of any kind, already boxed up the way the
/// engines expect.
pub fn encoded_address() -> impl Strategy<Value = EncodedAddress> {
    prop_oneof![
        ipv4_octets().prop_map(|octets| EncodedAddress {
            kind: AddressKind::Ipv4,
            bytes: octets.to_vec(),
        }),
        ipv6_octets().prop_map(|octets| EncodedAddress {
            kind: AddressKind::Ipv6,
            bytes: octets.to_vec(),
        }),
        domain_name().prop_map(|name| EncodedAddress {
            kind: AddressKind::Domain,
            bytes: name.into_bytes(),
        }),
    ]
}

/// An address restricted to IPv4, the only kind SOCKS4 accepts.
pub fn encoded_ipv4_address() -> impl Strategy<Value = EncodedAddress> {
    ipv4_octets().prop_map(|octets| EncodedAddress {
        kind: AddressKind::Ipv4,
        bytes: octets.to_vec(),
    })
}
