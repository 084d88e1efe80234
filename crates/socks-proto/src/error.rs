use socks_types::AddressKind;

/// Top-level error returned by both engines.
///
/// Kept as a thin umbrella over [`ProtocolError`] and [`ProtocolMisuse`] so
/// callers who don't care about the distinction can match one type, while
/// callers who do can match on the wrapped variant.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SocksError {
    /// The peer sent bytes that do not conform to the wire format, or
    /// contain an enum value this core does not recognize.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The caller invoked the API in an invalid state, or with an invalid
    /// argument.
    #[error(transparent)]
    Misuse(#[from] ProtocolMisuse),
}

/// Peer sent malformed or unrecognized wire data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ProtocolError {
    #[error("not enough bytes to decode {context}: received {received}, expected {expected}")]
    NotEnoughBytes {
        context: &'static str,
        received: usize,
        expected: usize,
    },

    #[error("{context} has unexpected length: got {got} bytes, expected {expected}")]
    UnexpectedLength {
        context: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("invalid `{field}` in {context}: {reason}")]
    InvalidField {
        context: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    #[error("unrecognized {field} value in {context}: 0x{value:02x}")]
    UnknownValue {
        context: &'static str,
        field: &'static str,
        value: u8,
    },

    #[error(transparent)]
    Address(#[from] socks_types::AddressError),
}

/// The caller used the engine API incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ProtocolMisuse {
    #[error("{protocol} does not support {kind} addresses")]
    UnsupportedAddressFamily {
        protocol: &'static str,
        kind: AddressKind,
    },

    #[error("domain name is {len} bytes, which exceeds the 255-byte limit")]
    DomainNameTooLong { len: usize },

    #[error("username/password must be 1 to 255 bytes, got {len}")]
    InvalidCredentialLength { field: &'static str, len: usize },

    #[error("operation requires state {expected}, connection is in a different state")]
    WrongState { expected: &'static str },
}
