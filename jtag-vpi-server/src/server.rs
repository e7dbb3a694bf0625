use std::{
    io::{ErrorKind, Write},
    net::{TcpListener, TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::VpiTap;
use jtag_vpi_protocol::Command;
use jtag_vpi_protocol::error::ReadError;

#[derive(Debug, Clone)]
pub struct Config {
    pub max_vector_size: u32,
    pub read_write_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_vector_size: 10 * 1024 * 1024,
            read_write_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
pub struct Server<T: VpiTap> {
    tap: T,
    config: Config,
}

/// Builder to create a [Server] instance and modify configuration options
///
/// # Example
///
/// ```ignore
/// use jtag_vpi_server::server::Builder;
/// use std::time::Duration;
///
/// let server = Builder::new()
///     .max_vector_size(1024)
///     .rw_timeout(Duration::from_secs(20))
///     .build(my_tap);
/// ```
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Set the highest vector size that this server is expected to receive.
    pub fn max_vector_size(mut self, size: u32) -> Self {
        self.config.max_vector_size = size;
        self
    }

    /// Set the TCP read and write timeout
    pub fn rw_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_write_timeout = timeout;
        self
    }

    /// Build and return the server
    pub fn build<T: VpiTap>(self, tap: T) -> Server<T> {
        Server::new(tap, self.config)
    }
}

impl<T: VpiTap> Server<T> {
    pub fn new(tap: T, config: Config) -> Server<T> {
        Server { tap, config }
    }

    /// Bind `addr` and serve connections until an unrecoverable error.
    pub fn listen(&self, addr: impl ToSocketAddrs) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr)?;
        self.serve(listener)
    }

    /// Serve connections from an already-bound listener.
    /// Useful for binding port 0 and reading the assigned port back.
    pub fn serve(&self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Server listening for connections");

        for stream in listener.incoming() {
            match stream {
                Ok(tcp) => {
                    let peer_addr = tcp.peer_addr().ok();
                    if let Some(addr) = peer_addr {
                        log::info!("New client connection from {}", addr);
                    }
                    if let Err(e) = self.handle_client(tcp) {
                        log::error!("Client error: {}", e);
                    }
                }
                Err(e) => log::error!("Connection error: {}", e),
            }
        }
        Ok(())
    }

    fn handle_client(&self, mut tcp: TcpStream) -> Result<(), ReadError> {
        tcp.set_read_timeout(Some(self.config.read_write_timeout))?;
        tcp.set_write_timeout(Some(self.config.read_write_timeout))?;

        loop {
            match Command::from_reader(&mut tcp, self.config.max_vector_size as usize) {
                Ok(command) => self.process_command(command, &mut tcp)?,
                Err(ReadError::IoError(err))
                    if err.kind() == ErrorKind::TimedOut || err.kind() == ErrorKind::WouldBlock =>
                {
                    log::error!("Client read timeout, closing connection");
                    break;
                }
                Err(ReadError::IoError(err))
                    if err.kind() == ErrorKind::UnexpectedEof
                        || err.kind() == ErrorKind::ConnectionAborted
                        || err.kind() == ErrorKind::ConnectionReset =>
                {
                    break;
                } // Client disconnected
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Process each command, forwarding the implementation to the TAP
    /// backend.
    fn process_command(&self, command: Command, tcp: &mut TcpStream) -> Result<(), ReadError> {
        match command {
            Command::Reset => {
                log::debug!("Received Reset command");
                let response = self.tap.reset();
                response.write_to(tcp)?;
                log::debug!(
                    "Sent reset response: response={}, tdo={}, mode={}, status={}",
                    response.response,
                    response.tdo,
                    response.mode,
                    response.status
                );
            }
            Command::TmsSeq { num_bits, tms } => {
                log::debug!(
                    "Received TmsSeq command: num_bits={}, tms_len={}",
                    num_bits,
                    tms.len()
                );
                log::trace!("TmsSeq TMS data: {:02x?}", &tms[..]);
                // No reply is defined for this command
                self.tap.tms_seq(num_bits, tms);
            }
            Command::ScanChain { num_bits, tms, tdi } => {
                log::debug!(
                    "Received ScanChain command: num_bits={}, tms_len={}, tdi_len={}",
                    num_bits,
                    tms.len(),
                    tdi.len()
                );
                log::trace!("Scan TMS data: {:02x?}", &tms[..]);
                log::trace!("Scan TDI data: {:02x?}", &tdi[..]);
                let tdo = self.tap.scan(num_bits, tms, tdi);
                log::trace!("Scan result TDO data: {:02x?}", &tdo[..]);
                tcp.write_all(&tdo)?;
            }
        }
        Ok(())
    }
}
