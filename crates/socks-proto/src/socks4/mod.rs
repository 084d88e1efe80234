//! Sans-I/O SOCKS4 and SOCKS4A client engine.
//!
//! [`Connection`] drives the single-round-trip SOCKS4 handshake: one request
//! out, one 8-byte reply in. There is no negotiation phase and no further
//! state once the reply has been read.

mod command;
mod reply;
mod request;

pub use command::Command;
pub use reply::{Reply, ReplyCode};
pub use request::Request;

use socks_types::ToHostPort;

use crate::error::SocksError;

const REPLY_LEN: usize = 8;

/// A SOCKS4/4A client connection.
///
/// Holds the configured `user_id` and whether domain names (SOCKS4A) are
/// allowed, plus the two byte buffers the embedder drains and fills. Unlike
/// [`crate::socks5::Connection`], the inbound buffer here accumulates across
/// [`Connection::receive_data`] calls until a full 8-byte reply has arrived,
/// since nothing guarantees the embedder hands the reply over in one piece.
#[derive(Debug)]
pub struct Connection {
    user_id: Vec<u8>,
    allow_domain_names: bool,
    outgoing: Vec<u8>,
    incoming: Vec<u8>,
    reply: Option<Reply>,
}

impl Connection {
    pub fn new(user_id: Vec<u8>, allow_domain_names: bool) -> Self {
        Self {
            user_id,
            allow_domain_names,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            reply: None,
        }
    }

    /// Queues a request for sending. Does not itself touch the network;
    /// call [`Connection::data_to_send`] to drain the bytes.
    pub fn send(&mut self, request: &Request) {
        request.encode(&mut self.outgoing);
    }

    /// Builds and queues a request against `address`, choosing the SOCKS4 or
    /// SOCKS4A wire form depending on whether `address` resolves to an IPv4
    /// literal or a domain name, and on `allow_domain_names`.
    pub fn request(&mut self, command: Command, address: impl ToHostPort) -> Result<(), SocksError> {
        let request = if self.allow_domain_names {
            Request::from_address_4a(command, address, self.user_id.clone())?
        } else {
            Request::from_address(command, address, self.user_id.clone())?
        };
        self.send(&request);
        Ok(())
    }

    /// Feeds bytes received from the peer. Once a full 8-byte reply has
    /// accumulated, it is parsed and made available via
    /// [`Connection::reply`].
    pub fn receive_data(&mut self, data: &[u8]) -> Result<(), SocksError> {
        self.incoming.extend_from_slice(data);

        if self.incoming.len() >= REPLY_LEN {
            let reply = Reply::parse(&self.incoming[..REPLY_LEN])?;
            self.incoming.drain(..REPLY_LEN);
            self.reply = Some(reply);
        }

        Ok(())
    }

    /// Returns the reply once [`Connection::receive_data`] has accumulated
    /// a full one.
    pub fn reply(&self) -> Option<&Reply> {
        self.reply.as_ref()
    }

    /// Drains and returns the bytes queued for sending.
    pub fn data_to_send(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outgoing)
    }
}
