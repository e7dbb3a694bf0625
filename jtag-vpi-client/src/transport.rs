//! Byte-stream transport underneath a [`VpiClient`](crate::VpiClient).
//!
//! The protocol layer never touches a socket directly; it talks to a
//! [`Transport`], which keeps the client testable against an in-memory peer
//! and concentrates the deadline and disconnect classification in one place.
use std::{
    io::{self, ErrorKind, Read, Write},
    net::{TcpStream, ToSocketAddrs},
};

use crate::{Config, error::ClientError};

/// Reliable, ordered byte-stream transport carrying command and response
/// frames.
///
/// A transport is exclusively owned by one client. Sharing a connection
/// between sessions requires external synchronization; the remote TAP is
/// stateful and interleaved frames would desynchronize it.
pub trait Transport {
    /// Deliver `buf` in full, preserving the order of prior sends.
    fn send(&mut self, buf: &[u8]) -> Result<(), ClientError>;

    /// Fill `buf` completely or fail; a partial read is an error.
    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<(), ClientError>;
}

/// [`Transport`] over a blocking TCP socket.
pub struct TcpTransport {
    tcp: TcpStream,
}

impl TcpTransport {
    /// Connect to a VPI server and apply the configured socket deadlines.
    pub fn connect(addr: impl ToSocketAddrs, config: &Config) -> io::Result<TcpTransport> {
        let tcp = TcpStream::connect(addr)?;
        tcp.set_read_timeout(Some(config.read_write_timeout))?;
        tcp.set_write_timeout(Some(config.read_write_timeout))?;
        Ok(TcpTransport { tcp })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, buf: &[u8]) -> Result<(), ClientError> {
        self.tcp.write_all(buf).map_err(classify)
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<(), ClientError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.tcp.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(ClientError::ShortRead {
                        expected: buf.len(),
                        got: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(classify(error)),
            }
        }
        Ok(())
    }
}

/// Map socket errors onto the protocol failure modes.
/// A read timeout surfaces as `TimedOut` or `WouldBlock` depending on the
/// platform.
fn classify(error: io::Error) -> ClientError {
    match error.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => ClientError::Timeout,
        _ => ClientError::Io(error),
    }
}
