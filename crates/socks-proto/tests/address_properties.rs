#![expect(clippy::unwrap_used, reason = "test code can panic on errors")]

use proptest::prelude::*;
use socks_proto::socks5::{AuthMethod, Command, CommandRequest, Connection, NegotiationRequest};

proptest! {
    #[test]
    fn command_request_always_starts_with_version_and_reserved_byte(
        addr in socks_generators::encoded_address(),
        port in socks_generators::port(),
    ) {
        let request = CommandRequest::new(Command::Connect, addr, port).unwrap();

        let mut conn = Connection::new();
        conn.send(NegotiationRequest::new(vec![AuthMethod::NoAuthRequired]).unwrap()).unwrap();
        conn.data_to_send();
        conn.receive_data(&[0x05, 0x00]).unwrap();

        conn.send(request).unwrap();
        let encoded = conn.data_to_send();

        prop_assert_eq!(encoded[0], 0x05);
        prop_assert_eq!(encoded[2], 0x00);
        prop_assert!(encoded.len() >= 4 + 2);
    }
}
