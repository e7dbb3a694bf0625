//! # JTAG VPI Protocol Library
//!
//! This crate provides a Rust implementation of the JTAG VPI wire protocol:
//! a small binary command protocol used to drive a remote JTAG Test Access
//! Port (TAP) over a TCP socket, typically bridging a software debugger to a
//! hardware simulator.
//!
//! ## Overview
//!
//! The protocol frames every operation as a fixed 8-byte command header,
//! optionally followed by payload vectors whose byte length is derived from
//! the bit count the header declares. This library implements that framing,
//! allowing you to:
//!
//! - Serialize and deserialize command frames and reset responses
//! - Exchange JTAG scan vectors (TMS/TDI/TDO) with a VPI server
//! - Clock TMS-only sequences for TAP navigation
//!
//! ## Protocol Features
//!
//! - **Commands**:
//!   - `Reset`: Drive the TAP to Test-Logic-Reset; answered by a 4-byte
//!     diagnostic response
//!   - `TmsSeq`: Clock a TMS-only bit sequence; no reply
//!   - `ScanChain`: Shift TMS/TDI vectors through the scan chain; answered
//!     by the sampled TDO vector
//!
//! ## Basic Usage
//!
//! ### Writing Commands
//!
//! ```
//! use jtag_vpi_protocol::Command;
//!
//! // Reset the TAP: opcode 0x00, zero reserved bytes, zero length
//! let mut buffer = Vec::new();
//! Command::Reset.write_to(&mut buffer).expect("Writing to vector shouldn't fail");
//! assert_eq!(buffer, [0u8; 8]);
//! ```
//!
//! ### Shifting Scan Vectors
//!
//! ```
//! use jtag_vpi_protocol::Command;
//!
//! let scan = Command::ScanChain {
//!     num_bits: 16,
//!     tms: vec![0x00, 0x03].into_boxed_slice(),
//!     tdi: vec![0xAA, 0x55].into_boxed_slice(),
//! };
//! let mut output = Vec::new();
//! scan.write_to(&mut output).expect("Writing to vector shouldn't fail");
//! assert_eq!(output, b"\x02\x00\x00\x00\x00\x00\x00\x10\x00\x03\xAA\x55");
//! ```
//!
//! ### Reading Commands from a Stream
//!
//! ```
//! use jtag_vpi_protocol::Command;
//! use std::io::Cursor;
//!
//! let frame = b"\x02\x00\x00\x00\x00\x00\x00\x08\xAA\x55";
//! let mut reader = Cursor::new(&frame[..]);
//! match Command::from_reader(&mut reader, 1024).expect("Frame should parse") {
//!     Command::ScanChain { num_bits, tms, tdi } => {
//!         assert_eq!(num_bits, 8);
//!         assert_eq!(&*tms, &[0xAA]);
//!         assert_eq!(&*tdi, &[0x55]);
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## Message Format
//!
//! All commands share an 8-byte binary header:
//!
//! - **Header**: `opcode:u8 | reserved:u8 | reserved:u8 | pad:u8 | length:u32-BE`
//! - **Reset** (`opcode=0x00`): `length` unused, sent as 0; the server
//!   answers with `response:u8 | tdo:u8 | mode:u8 | status:u8`
//! - **TmsSeq** (`opcode=0x01`): `length` = bit count, followed by
//!   `TMS:bytes[⌈bits/8⌉]`
//! - **ScanChain** (`opcode=0x02`): `length` = bit count (not a byte
//!   count), followed by `TMS:bytes[⌈bits/8⌉]`, then `TDI:bytes[⌈bits/8⌉]`;
//!   the server answers with `TDO:bytes[⌈bits/8⌉]`
//!
//! The length field is big-endian (network order) throughout; the remote
//! server is a fixed external implementation with no negotiation.
//!
//! ## Error Handling
//!
//! This library uses the [`error::ReadError`] type for protocol framing
//! errors.
//!
//! ## Tokio Support
//!
//! With the `tokio` feature enabled, the `tokio_codec` module provides a
//! `tokio_util::codec` frame codec for async command streams.
//!
//! ## Thread Safety
//!
//! The types in this library are thread-safe and can be safely shared across
//! threads. However, I/O operations (reading/writing) are not synchronized
//! and require external coordination.

pub mod protocol;
pub use protocol::*;
pub mod codec;
pub mod error;
#[cfg(feature = "tokio")]
pub mod tokio_codec;
