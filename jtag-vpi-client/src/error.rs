use std::{
    error::Error,
    fmt::Display,
    io::{self},
};

use jtag_vpi_protocol::error::ReadError;

/// Failure modes of a VPI operation.
///
/// No command is retried internally. Scan operations may shift device state,
/// so a silent retry could corrupt the TAP; recovery is left to the caller.
/// After [`ClientError::Timeout`], [`ClientError::ShortRead`] or
/// [`ClientError::MalformedResponse`] the connection state is indeterminate
/// and the client must be dropped and reconnected.
#[derive(Debug)]
pub enum ClientError {
    /// Caller bug, detected before any I/O: zero bit count or vectors of
    /// the wrong length.
    InvalidArgument(String),
    /// A response frame of unexpected size or shape; the connection has
    /// lost frame alignment.
    MalformedResponse(String),
    /// The transport closed after yielding fewer bytes than the frame
    /// requires.
    ShortRead { expected: usize, got: usize },
    /// The deadline expired while waiting for a reply.
    Timeout,
    /// Any other socket error.
    Io(io::Error),
}

impl From<io::Error> for ClientError {
    fn from(value: io::Error) -> Self {
        ClientError::Io(value)
    }
}

impl From<ReadError> for ClientError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::IoError(error) => ClientError::Io(error),
            other => ClientError::MalformedResponse(other.to_string()),
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::InvalidArgument(message) => write!(f, "Invalid argument: {}", message),
            ClientError::MalformedResponse(message) => {
                write!(f, "Malformed response: {}", message)
            }
            ClientError::ShortRead { expected, got } => {
                write!(
                    f,
                    "Connection closed after {} of {} expected bytes",
                    got, expected
                )
            }
            ClientError::Timeout => write!(f, "Timed out waiting for a reply"),
            ClientError::Io(error) => write!(f, "{}", error),
        }
    }
}

impl Error for ClientError {}
