//! # JTAG VPI Server Library
//!
//! This crate provides a foundation for implementing JTAG VPI servers: the
//! peer a remote debugger connects to in order to drive a JTAG TAP that
//! lives inside a simulation or behind a hardware bridge.
//!
//! ## Architecture
//!
//! The crate is built around two main components:
//!
//! - **[`VpiTap`] Trait**: Defines the interface that TAP backends must
//!   implement to handle the low-level JTAG operations (reset, TMS
//!   sequencing and vector shifting)
//! - **[`server::Server`]**: A generic server that handles protocol
//!   communication, command framing, and client connections
//!
//! ## How It Works
//!
//! 1. A backend (e.g., a simulator binding or a software TAP model)
//!    implements the [`VpiTap`] trait
//! 2. The backend is wrapped in a [`server::Server`] instance
//! 3. The server listens for TCP connections and decodes command frames
//! 4. Each command is dispatched to the backend for the actual JTAG
//!    operation
//! 5. The reset response or the sampled TDO vector is sent back to the
//!    client
//!
//! ## Basic Usage
//!
//! ### Implementing a Backend
//!
//! ```ignore
//! use jtag_vpi_protocol::ResponseHeader;
//! use jtag_vpi_server::VpiTap;
//!
//! struct MyTap {
//!     // device-specific fields
//! }
//!
//! impl VpiTap for MyTap {
//!     fn reset(&self) -> ResponseHeader {
//!         // Drive the TAP to Test-Logic-Reset
//!         ResponseHeader::default()
//!     }
//!
//!     fn tms_seq(&self, num_bits: u32, tms: Box<[u8]>) {
//!         // Clock the TMS sequence
//!     }
//!
//!     fn scan(&self, num_bits: u32, tms: Box<[u8]>, tdi: Box<[u8]>) -> Box<[u8]> {
//!         // Shift the vectors and return TDO data
//!         Box::default()
//!     }
//! }
//! ```
//!
//! ### Starting the Server
//!
//! ```ignore
//! use jtag_vpi_server::server::{Config, Server};
//!
//! let server = Server::new(MyTap::new()?, Config::default());
//! server.listen("127.0.0.1:3333")?;
//! ```
//!
//! ## Error Handling
//!
//! The wire protocol has no error channel for scan operations. If a scan
//! fails, backends return an empty vector; the client will observe a short
//! read and discard the connection. Framing errors and I/O errors are
//! propagated as appropriate.
//!
//! ## Logging
//!
//! This crate uses the `log` crate for diagnostics. Configure logging with
//! an implementation like `env_logger`:
//!
//! ```ignore
//! env_logger::init();
//! ```
//!
//! ## Thread Model
//!
//! The server processes each client connection sequentially in a single
//! thread. The remote TAP is a stateful device whose behavior depends on
//! command order, so commands of one connection are never interleaved.
pub mod server;

use jtag_vpi_protocol::ResponseHeader;

/// Trait that TAP backends must implement to provide JTAG functionality.
///
/// This trait defines the interface between the protocol server and the
/// actual TAP: a simulator binding, a hardware bridge, or a software model.
/// Implementors are responsible for translating the decoded commands into
/// signal-level activity.
pub trait VpiTap {
    /// Drive the TAP to its reset state.
    ///
    /// # Returns
    ///
    /// The four diagnostic bytes sent back to the client. The protocol
    /// defines no success or failure values for them; backends with nothing
    /// to report should return `ResponseHeader::default()`.
    fn reset(&self) -> ResponseHeader;

    /// Clock a TMS-only sequence into the TAP.
    ///
    /// The protocol defines no reply for this command, so errors cannot be
    /// reported to the client.
    ///
    /// # Arguments
    ///
    /// * `num_bits` - Number of TCK cycles to perform
    /// * `tms` - Test Mode Select vector (⌈num_bits / 8⌉ bytes)
    fn tms_seq(&self, num_bits: u32, tms: Box<[u8]>);

    /// Shift TMS and TDI vectors through the scan chain and return TDO
    /// data.
    ///
    /// The operation is atomic with respect to the JTAG state machine.
    ///
    /// # Arguments
    ///
    /// * `num_bits` - Number of TCK cycles to perform
    /// * `tms` - Test Mode Select vector (⌈num_bits / 8⌉ bytes)
    /// * `tdi` - Test Data In vector (⌈num_bits / 8⌉ bytes)
    ///
    /// # Returns
    ///
    /// Test Data Out vector of the same size as `tms` and `tdi`. The
    /// protocol has no error channel for scans; implementations should
    /// return an empty box on error rather than panicking.
    fn scan(&self, num_bits: u32, tms: Box<[u8]>, tdi: Box<[u8]>) -> Box<[u8]>;
}
