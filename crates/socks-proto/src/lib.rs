//! Sans-I/O SOCKS4, SOCKS4A and SOCKS5 client protocol engines.
//!
//! Neither engine in this crate touches a socket. Each exposes `send`,
//! `receive_data`, and `data_to_send` over plain byte buffers; the caller
//! owns the transport and drives the engine from whatever I/O model it
//! likes (blocking sockets, an async runtime, an in-memory test fixture).
//!
//! See [`socks4`] for the single-round-trip SOCKS4/4A handshake and
//! [`socks5`] for the seven-state SOCKS5 handshake.

pub mod error;
pub mod socks4;
pub mod socks5;

pub use error::{ProtocolError, ProtocolMisuse, SocksError};
