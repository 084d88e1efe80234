//! Sans-I/O SOCKS5 client engine: method negotiation, optional
//! username/password sub-negotiation, and the CONNECT/BIND/UDP_ASSOCIATE
//! command exchange.

mod atyp;
mod command;
mod method;
mod negotiation;
mod reply;
mod request;
mod userpass;

pub use command::Command;
pub use method::AuthMethod;
pub use negotiation::{NegotiationReply, NegotiationRequest};
pub use reply::{CommandReply, FailureCode};
pub use request::CommandRequest;
pub use userpass::{UsernamePasswordReply, UsernamePasswordRequest};

use crate::error::{ProtocolMisuse, SocksError};

/// Connection state, numbered to match the ordering guards rely on
/// (`state < State::ClientAuthenticated` etc.). Monotone except for
/// transitions into [`State::MustClose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum State {
    ClientAuthRequired = 1,
    ServerAuthReply = 2,
    ClientAuthenticated = 3,
    TunnelReady = 4,
    ClientWaitingForUsernamePassword = 5,
    ServerVerifyUsernamePassword = 6,
    MustClose = 7,
}

/// A request to hand to [`Connection::send`].
///
/// A single tagged union rather than three overloaded methods, so dispatch
/// is one exhaustive match with no virtual calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Negotiation(NegotiationRequest),
    UsernamePassword(UsernamePasswordRequest),
    Command(CommandRequest),
}

impl From<NegotiationRequest> for Request {
    fn from(request: NegotiationRequest) -> Self {
        Self::Negotiation(request)
    }
}

impl From<UsernamePasswordRequest> for Request {
    fn from(request: UsernamePasswordRequest) -> Self {
        Self::UsernamePassword(request)
    }
}

impl From<CommandRequest> for Request {
    fn from(request: CommandRequest) -> Self {
        Self::Command(request)
    }
}

/// The parsed counterpart handed back from [`Connection::receive_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Negotiation(NegotiationReply),
    UsernamePassword(UsernamePasswordReply),
    Command(CommandReply),
}

/// A SOCKS5 client connection: the seven-state handshake machine.
///
/// Each [`Connection::receive_data`] call is expected to carry exactly one
/// pre-framed message; this core does not reassemble partial reads across
/// calls for SOCKS5 (unlike [`crate::socks4::Connection`]). Callers that
/// front a stream transport are responsible for delivering complete
/// messages, e.g. by reading the ATYP-dependent length before dispatching.
#[derive(Debug)]
pub struct Connection {
    state: State,
    outgoing: Vec<u8>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    pub fn new() -> Self {
        Self {
            state: State::ClientAuthRequired,
            outgoing: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Enqueues `request` for sending, after checking it is legal in the
    /// current state, and advances the state machine.
    pub fn send(&mut self, request: impl Into<Request>) -> Result<(), SocksError> {
        match request.into() {
            Request::Negotiation(request) => {
                if self.state != State::ClientAuthRequired {
                    return Err(ProtocolMisuse::WrongState {
                        expected: "CLIENT_AUTH_REQUIRED",
                    }
                    .into());
                }
                request.encode(&mut self.outgoing);
                self.state = State::ServerAuthReply;
            }
            Request::UsernamePassword(request) => {
                if self.state != State::ClientWaitingForUsernamePassword {
                    return Err(ProtocolMisuse::WrongState {
                        expected: "CLIENT_WAITING_FOR_USERNAME_PASSWORD",
                    }
                    .into());
                }
                request.encode(&mut self.outgoing);
                self.state = State::ServerVerifyUsernamePassword;
            }
            Request::Command(request) => {
                if self.state < State::ClientAuthenticated {
                    return Err(ProtocolMisuse::WrongState {
                        expected: "CLIENT_AUTHENTICATED",
                    }
                    .into());
                }
                request.encode(&mut self.outgoing);
            }
        }
        Ok(())
    }

    /// Parses one pre-framed message according to the current state.
    pub fn receive_data(&mut self, data: &[u8]) -> Result<Event, SocksError> {
        match self.state {
            State::ServerAuthReply => {
                let reply = NegotiationReply::parse(data)?;
                self.state = match reply.method {
                    AuthMethod::NoAuthRequired => State::ClientAuthenticated,
                    AuthMethod::UsernamePassword => State::ClientWaitingForUsernamePassword,
                    // NO_ACCEPTABLE_METHODS, GSSAPI, or anything else: remain
                    // put, the caller should close.
                    AuthMethod::GssApi | AuthMethod::Other(_) => State::ServerAuthReply,
                };
                Ok(Event::Negotiation(reply))
            }
            State::ServerVerifyUsernamePassword => {
                let reply = UsernamePasswordReply::parse(data)?;
                self.state = if reply.success { State::ClientAuthenticated } else { State::MustClose };
                Ok(Event::UsernamePassword(reply))
            }
            State::ClientAuthenticated => {
                let reply = CommandReply::parse(data)?;
                self.state = if reply.reply_code == FailureCode::Succeeded {
                    State::TunnelReady
                } else {
                    State::MustClose
                };
                Ok(Event::Command(reply))
            }
            _ => Err(ProtocolMisuse::WrongState {
                expected: "a state expecting a reply",
            }
            .into()),
        }
    }

    /// Drains and returns the bytes queued for sending.
    pub fn data_to_send(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_success_path_with_username_password() {
        let mut conn = Connection::new();

        conn.send(NegotiationRequest::new(vec![AuthMethod::UsernamePassword]).unwrap())
            .unwrap();
        assert_eq!(conn.data_to_send(), vec![0x05, 0x01, 0x02]);
        assert_eq!(conn.state(), State::ServerAuthReply);

        let event = conn.receive_data(&[0x05, 0x02]).unwrap();
        assert_eq!(event, Event::Negotiation(NegotiationReply { method: AuthMethod::UsernamePassword }));
        assert_eq!(conn.state(), State::ClientWaitingForUsernamePassword);

        conn.send(UsernamePasswordRequest::new(b"username".to_vec(), b"password".to_vec()).unwrap())
            .unwrap();
        assert!(!conn.data_to_send().is_empty());
        assert_eq!(conn.state(), State::ServerVerifyUsernamePassword);

        let event = conn.receive_data(&[0x01, 0x00]).unwrap();
        assert_eq!(event, Event::UsernamePassword(UsernamePasswordReply { success: true }));
        assert_eq!(conn.state(), State::ClientAuthenticated);

        conn.send(CommandRequest::from_address(Command::Connect, ("127.0.0.1", 1080u16)).unwrap())
            .unwrap();
        assert_eq!(conn.data_to_send(), vec![0x05, 0x01, 0x00, 0x01, 127, 0, 0, 1, 0x04, 0x38]);

        let event = conn
            .receive_data(&[0x05, 0x00, 0x00, 0x01, 127, 0, 0, 1, 0x04, 0x38])
            .unwrap();
        assert_eq!(conn.state(), State::TunnelReady);
        match event {
            Event::Command(reply) => assert_eq!(reply.reply_code, FailureCode::Succeeded),
            _ => panic!("expected a command reply"),
        }
    }

    #[test]
    fn no_acceptable_methods_leaves_state_unchanged() {
        let mut conn = Connection::new();
        conn.send(NegotiationRequest::new(vec![AuthMethod::GssApi, AuthMethod::UsernamePassword]).unwrap())
            .unwrap();
        assert_eq!(conn.data_to_send(), vec![0x05, 0x02, 0x01, 0x02]);

        let event = conn.receive_data(&[0x05, 0xFF]).unwrap();
        assert_eq!(event, Event::Negotiation(NegotiationReply { method: AuthMethod::Other(0xFF) }));
        assert_eq!(conn.state(), State::ServerAuthReply);
    }

    #[test]
    fn gssapi_selection_leaves_state_unchanged() {
        let mut conn = Connection::new();
        conn.send(NegotiationRequest::new(vec![AuthMethod::GssApi]).unwrap()).unwrap();
        conn.data_to_send();

        let event = conn.receive_data(&[0x05, 0x01]).unwrap();
        assert_eq!(event, Event::Negotiation(NegotiationReply { method: AuthMethod::GssApi }));
        assert_eq!(conn.state(), State::ServerAuthReply);
    }

    #[test]
    fn command_before_authentication_is_misuse() {
        let mut conn = Connection::new();
        let request = CommandRequest::from_address(Command::Connect, ("127.0.0.1", 1080u16)).unwrap();
        let err = conn.send(request).unwrap_err();
        assert!(matches!(err, SocksError::Misuse(ProtocolMisuse::WrongState { .. })));
    }

    #[test]
    fn username_password_outside_waiting_state_is_misuse() {
        let mut conn = Connection::new();
        let request = UsernamePasswordRequest::new(b"u".to_vec(), b"p".to_vec()).unwrap();
        let err = conn.send(request).unwrap_err();
        assert!(matches!(err, SocksError::Misuse(ProtocolMisuse::WrongState { .. })));
    }

    #[test]
    fn failed_authentication_transitions_to_must_close() {
        let mut conn = Connection::new();
        conn.send(NegotiationRequest::new(vec![AuthMethod::UsernamePassword]).unwrap())
            .unwrap();
        conn.receive_data(&[0x05, 0x02]).unwrap();
        conn.send(UsernamePasswordRequest::new(b"u".to_vec(), b"p".to_vec()).unwrap())
            .unwrap();
        conn.receive_data(&[0x01, 0x01]).unwrap();
        assert_eq!(conn.state(), State::MustClose);
    }

    #[test]
    fn command_request_to_domain_authenticated_directly() {
        let mut conn = Connection::new();
        conn.send(NegotiationRequest::new(vec![AuthMethod::NoAuthRequired]).unwrap())
            .unwrap();
        conn.data_to_send();
        conn.receive_data(&[0x05, 0x00]).unwrap();
        assert_eq!(conn.state(), State::ClientAuthenticated);

        conn.send(CommandRequest::from_address(Command::Connect, ("localhost", 1080u16)).unwrap())
            .unwrap();
        assert_eq!(
            conn.data_to_send(),
            vec![0x05, 0x01, 0x00, 0x03, 9, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't', 0x04, 0x38]
        );
    }
}
