//! # JTAG VPI Client
//!
//! A Rust client library for connecting to JTAG VPI servers and driving a
//! remote JTAG Test Access Port (TAP), typically one living inside a
//! hardware simulation or an FPGA bitstream.
//!
//! ## Overview
//!
//! This crate provides a high-level client interface to VPI servers. It
//! handles command framing, the multi-step scan handshake and failure
//! classification, and exposes each protocol operation as one blocking call
//! with a simple contract.
//!
//! ## Protocol Support
//!
//! This implementation supports the following operations:
//!
//! - **Reset**: Drive the TAP to Test-Logic-Reset and collect the server's
//!   diagnostic response
//! - **TmsSeq**: Clock a TMS-only sequence for TAP navigation
//! - **ScanChain**: Shift TMS/TDI vectors through the scan chain and return
//!   the sampled TDO vector
//!
//! For detailed protocol information, see the `jtag-vpi-protocol` crate.
//!
//! ## Basic Usage
//!
//! ### Connecting to a Server
//!
//! ```ignore
//! use jtag_vpi_client::VpiClient;
//!
//! let mut client = VpiClient::connect("127.0.0.1:3333")?;
//!
//! // Reset the TAP and inspect the diagnostic bytes
//! let response = client.reset()?;
//! println!("response={} tdo={}", response.response, response.tdo);
//! ```
//!
//! ### Performing Scans
//!
//! ```ignore
//! // Shift 32 bits through the chain
//! let num_bits = 32;
//! let tms = vec![0x00; 4]; // Test Mode Select vector
//! let tdi = vec![0x00; 4]; // Test Data In vector
//!
//! let tdo = client.scan(num_bits, &tms, &tdi)?;
//! println!("TDO data: {:?}", tdo);
//! ```
//!
//! The TDO vector is returned exactly as sampled; whether the bits are an
//! instruction register, a data register or an IDCODE is the caller's
//! concern.
//!
//! ## Failure Model
//!
//! Arguments are validated before any I/O
//! ([`ClientError::InvalidArgument`]). Once a command is on the wire, a
//! deadline governs every receive: expiry fails the operation with
//! [`ClientError::Timeout`] and leaves the connection in an indeterminate
//! state, so the client must be dropped and a new connection opened rather
//! than reused. The same applies to [`ClientError::ShortRead`]. Nothing is
//! retried internally; scans shift device state and are not idempotent, so
//! recovery belongs to the caller, who may need to reset the TAP first.
use std::{io, net::ToSocketAddrs, time::Duration};

use jtag_vpi_protocol::{Opcode, RESPONSE_LEN, ResponseHeader, vector_len};

pub mod error;
pub mod transport;

use error::ClientError;
use transport::{TcpTransport, Transport};

/// Connection settings for a [`VpiClient`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Deadline applied to every send and receive on the socket.
    pub read_write_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_write_timeout: Duration::from_secs(30),
        }
    }
}

/// VPI client driving a remote TAP through a [`Transport`].
///
/// One client owns one connection and keeps at most one operation in
/// flight. Operations are blocking round trips and complete strictly in the
/// order issued; the remote TAP is a stateful device, so the client never
/// pipelines or retries on its own.
pub struct VpiClient<T> {
    transport: T,
}

impl VpiClient<TcpTransport> {
    /// Connect to a VPI server with the default configuration.
    pub fn connect(addr: impl ToSocketAddrs) -> io::Result<VpiClient<TcpTransport>> {
        VpiClient::connect_with_config(addr, Config::default())
    }

    /// Connect to a VPI server, applying `config` to the socket.
    pub fn connect_with_config(
        addr: impl ToSocketAddrs,
        config: Config,
    ) -> io::Result<VpiClient<TcpTransport>> {
        Ok(VpiClient {
            transport: TcpTransport::connect(addr, &config)?,
        })
    }
}

impl<T: Transport> VpiClient<T> {
    /// Wrap an already-open transport.
    pub fn new(transport: T) -> VpiClient<T> {
        VpiClient { transport }
    }

    /// Reset the remote TAP.
    ///
    /// Sends the reset command and decodes the four diagnostic bytes the
    /// server replies with. The protocol defines no success values for
    /// them; they are reported exactly as the server sent them.
    pub fn reset(&mut self) -> Result<ResponseHeader, ClientError> {
        log::debug!("reset: sending command");
        self.transport.send(&Opcode::Reset.header(0))?;
        let mut buf = [0u8; RESPONSE_LEN];
        self.transport.recv_exact(&mut buf)?;
        let response = ResponseHeader::from_bytes(&buf)?;
        log::debug!(
            "reset: response={}, tdo={}, mode={}, status={}",
            response.response,
            response.tdo,
            response.mode,
            response.status
        );
        Ok(response)
    }

    /// Clock a TMS-only sequence into the TAP.
    ///
    /// `tms` must be ⌈`num_bits` / 8⌉ bytes. The server sends no reply for
    /// this command.
    pub fn tms_seq(&mut self, num_bits: u32, tms: &[u8]) -> Result<(), ClientError> {
        let num_bytes = expected_vector_len(num_bits)?;
        check_vector("TMS", tms, num_bytes)?;
        log::debug!("tms_seq: num_bits={}", num_bits);
        log::trace!("tms_seq TMS data: {:02x?}", tms);
        self.transport.send(&Opcode::TmsSeq.header(num_bits))?;
        self.transport.send(tms)?;
        Ok(())
    }

    /// Shift `num_bits` through the scan chain.
    ///
    /// The command header, the TMS vector and the TDI vector go out in that
    /// order, each as one contiguous write: the protocol is laid out so a
    /// streaming server can start clocking TMS bits before the TDI vector
    /// has arrived.
    ///
    /// # Arguments
    ///
    /// * `num_bits` - Number of bits to shift; must be non-zero
    /// * `tms` - Test Mode Select vector (length must be ⌈num_bits / 8⌉)
    /// * `tdi` - Test Data In vector (length must be ⌈num_bits / 8⌉)
    ///
    /// # Returns
    ///
    /// The Test Data Out vector of the same length as `tms` and `tdi`,
    /// returned unmodified; bit-level meaning is the caller's concern.
    pub fn scan(&mut self, num_bits: u32, tms: &[u8], tdi: &[u8]) -> Result<Box<[u8]>, ClientError> {
        let num_bytes = expected_vector_len(num_bits)?;
        check_vector("TMS", tms, num_bytes)?;
        check_vector("TDI", tdi, num_bytes)?;
        log::debug!("scan: num_bits={}, num_bytes={}", num_bits, num_bytes);
        log::trace!("scan TMS data: {:02x?}", tms);
        log::trace!("scan TDI data: {:02x?}", tdi);
        self.transport.send(&Opcode::ScanChain.header(num_bits))?;
        self.transport.send(tms)?;
        self.transport.send(tdi)?;
        let mut tdo = vec![0u8; num_bytes];
        self.transport.recv_exact(&mut tdo)?;
        log::trace!("scan TDO data: {:02x?}", &tdo[..]);
        Ok(tdo.into_boxed_slice())
    }
}

fn expected_vector_len(num_bits: u32) -> Result<usize, ClientError> {
    if num_bits == 0 {
        return Err(ClientError::InvalidArgument(
            "scan of zero bits".to_string(),
        ));
    }
    Ok(vector_len(num_bits))
}

fn check_vector(name: &str, vector: &[u8], num_bytes: usize) -> Result<(), ClientError> {
    if vector.len() != num_bytes {
        return Err(ClientError::InvalidArgument(format!(
            "{} vector must be {} bytes, got {}",
            name,
            num_bytes,
            vector.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::VecDeque;

    /// In-memory peer: records every send and plays back scripted replies.
    #[derive(Default)]
    struct MockTransport {
        sent: Vec<Vec<u8>>,
        replies: VecDeque<Result<Vec<u8>, ClientError>>,
    }

    impl MockTransport {
        fn reply(mut self, data: &[u8]) -> MockTransport {
            self.replies.push_back(Ok(data.to_vec()));
            self
        }

        fn fail(mut self, error: ClientError) -> MockTransport {
            self.replies.push_back(Err(error));
            self
        }
    }

    impl Transport for MockTransport {
        fn send(&mut self, buf: &[u8]) -> Result<(), ClientError> {
            self.sent.push(buf.to_vec());
            Ok(())
        }

        fn recv_exact(&mut self, buf: &mut [u8]) -> Result<(), ClientError> {
            match self.replies.pop_front() {
                Some(Ok(data)) => {
                    assert_eq!(data.len(), buf.len(), "scripted reply has the wrong length");
                    buf.copy_from_slice(&data);
                    Ok(())
                }
                Some(Err(error)) => Err(error),
                None => Err(ClientError::Timeout),
            }
        }
    }

    #[test]
    fn scan_sends_header_then_tms_then_tdi() {
        let mut client = VpiClient::new(MockTransport::default().reply(&[0u8; 4]));
        let tdo = client.scan(32, &[0u8; 4], &[0u8; 4]).unwrap();

        assert_eq!(&*tdo, &[0u8; 4]);
        assert_eq!(client.transport.sent.len(), 3);
        assert_eq!(client.transport.sent[0], vec![0x02, 0, 0, 0, 0, 0, 0, 32]);
        assert_eq!(client.transport.sent[1], vec![0u8; 4]);
        assert_eq!(client.transport.sent[2], vec![0u8; 4]);
    }

    #[test]
    fn scan_of_zero_bits_is_rejected_before_io() {
        let mut client = VpiClient::new(MockTransport::default());
        let result = client.scan(0, &[], &[]);
        assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
        assert!(client.transport.sent.is_empty());
    }

    #[test]
    fn scan_with_mismatched_vectors_is_rejected_before_io() {
        let mut client = VpiClient::new(MockTransport::default());
        let result = client.scan(32, &[0u8; 4], &[0u8; 3]);
        assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
        assert!(client.transport.sent.is_empty());
    }

    #[test]
    fn scan_vector_length_must_round_up() {
        let mut client = VpiClient::new(MockTransport::default().reply(&[0u8; 2]));
        // 13 bits round up to 2 bytes
        let tdo = client.scan(13, &[0xAA, 0x02], &[0x55, 0x01]).unwrap();
        assert_eq!(tdo.len(), 2);
        assert_eq!(client.transport.sent[0], vec![0x02, 0, 0, 0, 0, 0, 0, 13]);
    }

    #[test]
    fn scan_timeout_is_propagated() {
        let mut client = VpiClient::new(MockTransport::default().fail(ClientError::Timeout));
        let result = client.scan(8, &[0x00], &[0xA5]);
        assert!(matches!(result, Err(ClientError::Timeout)));
        // The command had already gone out when the reply timed out
        assert_eq!(client.transport.sent.len(), 3);
    }

    #[test]
    fn scan_short_read_is_propagated() {
        let mut client = VpiClient::new(
            MockTransport::default().fail(ClientError::ShortRead {
                expected: 4,
                got: 1,
            }),
        );
        let result = client.scan(32, &[0u8; 4], &[0u8; 4]);
        assert!(matches!(
            result,
            Err(ClientError::ShortRead {
                expected: 4,
                got: 1
            })
        ));
    }

    #[test]
    fn reset_sends_zero_length_header_and_decodes_response() {
        let mut client = VpiClient::new(MockTransport::default().reply(&[0x01, 0x00, 0x01, 0x7F]));
        let response = client.reset().unwrap();

        assert_eq!(client.transport.sent, vec![vec![0u8; 8]]);
        assert_eq!(response.response, 0x01);
        assert_eq!(response.tdo, 0x00);
        assert_eq!(response.mode, 0x01);
        assert_eq!(response.status, 0x7F);
    }

    #[test]
    fn tms_seq_sends_header_and_vector_without_reading() {
        let mut client = VpiClient::new(MockTransport::default());
        client.tms_seq(5, &[0x1F]).unwrap();

        assert_eq!(client.transport.sent.len(), 2);
        assert_eq!(client.transport.sent[0], vec![0x01, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(client.transport.sent[1], vec![0x1F]);
    }

    #[test]
    fn tms_seq_with_short_vector_is_rejected() {
        let mut client = VpiClient::new(MockTransport::default());
        let result = client.tms_seq(9, &[0xFF]);
        assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
        assert!(client.transport.sent.is_empty());
    }
}
