use std::{
    error::Error,
    fmt::Display,
    io::{self},
};

/// Errors that may occur when decoding a frame from a stream.
#[derive(Debug)]
pub enum ReadError {
    IoError(io::Error),
    InvalidOpcode(u8),
    EmptyVector,
    MalformedResponse { expected: usize, got: usize },
    TooManyBytes { max: usize, got: usize },
}

impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self {
        ReadError::IoError(value)
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::IoError(error) => write!(f, "{}", error),
            ReadError::InvalidOpcode(opcode) => {
                write!(f, "Received command with invalid opcode 0x{:02x}", opcode)
            }
            ReadError::EmptyVector => {
                write!(f, "Received vector command declaring zero bits")
            }
            ReadError::MalformedResponse { expected, got } => {
                write!(
                    f,
                    "Malformed response frame: expected {} bytes, got {}",
                    expected, got
                )
            }
            ReadError::TooManyBytes { max, got } => {
                write!(f, "Vector too large! Maximum is {}, but got {}", max, got)
            }
        }
    }
}

impl Error for ReadError {}
