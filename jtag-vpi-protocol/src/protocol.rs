use crate::error::ReadError;

/// Default TCP port a JTAG VPI server embedded in a simulation listens on.
pub const DEFAULT_PORT: u16 = 3333;

/// Size of the fixed command header in bytes.
pub const HEADER_LEN: usize = 8;

/// Size of the reset response frame in bytes.
pub const RESPONSE_LEN: usize = 4;

/// Number of bytes needed to hold a vector of `num_bits` scan bits.
/// The length field of a vector command carries a bit count; every buffer
/// that crosses the wire is this many bytes.
pub fn vector_len(num_bits: u32) -> usize {
    num_bits.div_ceil(8) as usize
}

#[test]
fn vector_len_rounds_up_to_whole_bytes() {
    assert_eq!(vector_len(1), 1);
    assert_eq!(vector_len(7), 1);
    assert_eq!(vector_len(8), 1);
    assert_eq!(vector_len(9), 2);
    assert_eq!(vector_len(32), 4);
}

/// Operation selector carried in the first byte of a command header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Opcode {
    /// Drive the TAP to Test-Logic-Reset.
    Reset = 0x00,
    /// Clock a TMS-only sequence into the TAP.
    TmsSeq = 0x01,
    /// Shift TMS/TDI vectors through the scan chain and sample TDO.
    ScanChain = 0x02,
}

impl TryFrom<u8> for Opcode {
    type Error = ReadError;

    fn try_from(value: u8) -> Result<Opcode, ReadError> {
        match value {
            0x00 => Ok(Opcode::Reset),
            0x01 => Ok(Opcode::TmsSeq),
            0x02 => Ok(Opcode::ScanChain),
            other => Err(ReadError::InvalidOpcode(other)),
        }
    }
}

/// A Command is transfered from the client to the server.
/// The server needs to process each command in the order received; the
/// remote TAP is a stateful device, so reordering would corrupt its state.
/// Only one connection at a time is assumed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Resets the TAP. The server answers with a [`ResponseHeader`].
    Reset,
    /// Clocks a TMS-only sequence into the TAP. The server sends no reply.
    TmsSeq {
        /// the number of TCK toggles needed to clock the sequence out
        num_bits: u32,
        /// a byte sized vector with all the TMS data.
        /// The vector is num_bits and rounds up to the nearest byte.
        tms: Box<[u8]>,
    },
    /// Shifts vectors through the scan chain. After the header the TMS and
    /// TDI vectors follow in that order; the server answers with the TDO
    /// vector of the same byte length.
    ScanChain {
        /// the number of TCK toggles needed to shift the vectors out
        num_bits: u32,
        /// a byte sized vector with all the TMS data.
        /// The vector is num_bits and rounds up to the nearest byte.
        tms: Box<[u8]>,
        /// a byte sized vector with all the TDI data.
        /// The vector is num_bits and rounds up to the nearest byte.
        tdi: Box<[u8]>,
    },
}

impl Command {
    /// The operation selector of this command.
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Reset => Opcode::Reset,
            Command::TmsSeq { .. } => Opcode::TmsSeq,
            Command::ScanChain { .. } => Opcode::ScanChain,
        }
    }

    /// Value of the header length field: the bit count for vector commands,
    /// zero for reset.
    pub fn num_bits(&self) -> u32 {
        match self {
            Command::Reset => 0,
            Command::TmsSeq { num_bits, .. } | Command::ScanChain { num_bits, .. } => *num_bits,
        }
    }
}

/// The four diagnostic bytes a server returns after a reset command.
///
/// The protocol defines no success or failure values for these fields. They
/// are carried through unmodified so the embedding application can interpret
/// them against the server implementation it integrates with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ResponseHeader {
    /// Response code echoed by the server.
    pub response: u8,
    /// TDO sample at the time the reset completed.
    pub tdo: u8,
    /// Active cable mode reported by the server.
    pub mode: u8,
    /// Status byte reported by the server.
    pub status: u8,
}
