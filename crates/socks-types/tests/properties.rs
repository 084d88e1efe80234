#![expect(clippy::unwrap_used, reason = "test code can panic on errors")]

use proptest::prelude::*;
use socks_types::{decode_address, encode_address, split_address_port, AddressKind};

proptest! {
    #[test]
    fn ipv4_round_trips(octets in socks_generators::ipv4_octets()) {
        let s = std::net::Ipv4Addr::from(octets).to_string();
        let encoded = encode_address(&s);
        prop_assert_eq!(encoded.kind, AddressKind::Ipv4);
        let decoded = decode_address(encoded.kind, &encoded.bytes).unwrap();
        prop_assert_eq!(decoded, s);
    }

    #[test]
    fn ipv6_round_trips(octets in socks_generators::ipv6_octets()) {
        let s = std::net::Ipv6Addr::from(octets).to_string();
        let encoded = encode_address(&s);
        prop_assert_eq!(encoded.kind, AddressKind::Ipv6);
        let decoded = decode_address(encoded.kind, &encoded.bytes).unwrap();
        prop_assert_eq!(decoded, s);
    }

    #[test]
    fn domain_round_trips(name in socks_generators::domain_name()) {
        let encoded = encode_address(&name);
        prop_assert_eq!(encoded.kind, AddressKind::Domain);
        let decoded = decode_address(encoded.kind, &encoded.bytes).unwrap();
        prop_assert_eq!(decoded, name);
    }

    #[test]
    fn split_address_port_round_trips_plain_host(octets in socks_generators::ipv4_octets(), port in socks_generators::port()) {
        let host = std::net::Ipv4Addr::from(octets).to_string();
        let combined = format!("{host}:{port}");
        let (got_host, got_port) = split_address_port(&combined).unwrap();
        prop_assert_eq!(got_host, host);
        prop_assert_eq!(got_port, port);
    }

    #[test]
    fn split_address_port_round_trips_bracketed_ipv6(octets in socks_generators::ipv6_octets(), port in socks_generators::port()) {
        let host = std::net::Ipv6Addr::from(octets).to_string();
        let combined = format!("[{host}]:{port}");
        let (got_host, got_port) = split_address_port(&combined).unwrap();
        prop_assert_eq!(got_host, host);
        prop_assert_eq!(got_port, port);
    }
}
