//! [`tokio_util::codec`] adapters for the command stream.
//!
//! [`CommandCodec`] frames the server side of a connection: it decodes
//! complete commands (header plus the payload vectors the header declares)
//! out of a byte stream and encodes commands back into one. It can be
//! plugged into `tokio_util::codec::Framed` for async server loops.
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    codec::checked_vector_len,
    error::ReadError,
    protocol::{Command, HEADER_LEN, Opcode},
};

/// Frame codec for command streams.
///
/// The codec itself is stateless; partial frames stay buffered in the
/// `BytesMut` until the declared payload has arrived.
pub struct CommandCodec {
    max_scan_bytes: usize,
}

impl CommandCodec {
    /// Create a codec that rejects vector commands larger than
    /// `max_scan_bytes` per vector.
    pub fn new(max_scan_bytes: usize) -> CommandCodec {
        CommandCodec { max_scan_bytes }
    }
}

impl Default for CommandCodec {
    fn default() -> Self {
        CommandCodec::new(10 * 1024 * 1024)
    }
}

impl Decoder for CommandCodec {
    type Item = Command;
    type Error = ReadError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Command>, ReadError> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }
        let opcode = Opcode::try_from(src[0])?;
        let num_bits = u32::from_be_bytes(src[4..HEADER_LEN].try_into().unwrap());
        let payload_len = match opcode {
            Opcode::Reset => 0,
            Opcode::TmsSeq => checked_vector_len(num_bits, self.max_scan_bytes)?,
            Opcode::ScanChain => 2 * checked_vector_len(num_bits, self.max_scan_bytes)?,
        };
        if src.len() < HEADER_LEN + payload_len {
            src.reserve(HEADER_LEN + payload_len - src.len());
            return Ok(None);
        }
        src.advance(HEADER_LEN);
        let command = match opcode {
            Opcode::Reset => Command::Reset,
            Opcode::TmsSeq => {
                let tms = src.split_to(payload_len).to_vec().into_boxed_slice();
                Command::TmsSeq { num_bits, tms }
            }
            Opcode::ScanChain => {
                let vector_bytes = payload_len / 2;
                let tms = src.split_to(vector_bytes).to_vec().into_boxed_slice();
                let tdi = src.split_to(vector_bytes).to_vec().into_boxed_slice();
                Command::ScanChain { num_bits, tms, tdi }
            }
        };
        Ok(Some(command))
    }
}

impl Encoder<Command> for CommandCodec {
    type Error = ReadError;

    fn encode(&mut self, item: Command, dst: &mut BytesMut) -> Result<(), ReadError> {
        dst.put_slice(&item.opcode().header(item.num_bits()));
        match &item {
            Command::Reset => {}
            Command::TmsSeq { tms, .. } => dst.put_slice(tms),
            Command::ScanChain { tms, tdi, .. } => {
                dst.put_slice(tms);
                dst.put_slice(tdi);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_waits_for_full_frame() {
        let mut codec = CommandCodec::new(1024);
        let mut buf = BytesMut::new();

        let mut frame = Vec::new();
        Command::ScanChain {
            num_bits: 16,
            tms: vec![0x00, 0x03].into_boxed_slice(),
            tdi: vec![0xAA, 0x55].into_boxed_slice(),
        }
        .write_to(&mut frame)
        .unwrap();

        // Header alone is not enough
        buf.extend_from_slice(&frame[..HEADER_LEN]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        // Neither is the header plus one of the two vectors
        buf.extend_from_slice(&frame[HEADER_LEN..HEADER_LEN + 2]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&frame[HEADER_LEN + 2..]);
        match codec.decode(&mut buf).unwrap() {
            Some(Command::ScanChain { num_bits, tms, tdi }) => {
                assert_eq!(num_bits, 16);
                assert_eq!(&*tms, &[0x00, 0x03]);
                assert_eq!(&*tdi, &[0xAA, 0x55]);
            }
            other => panic!("expected ScanChain, got {:?}", other),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_consecutive_commands() {
        let mut codec = CommandCodec::new(1024);
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&Opcode::Reset.header(0));
        buf.extend_from_slice(&Opcode::TmsSeq.header(5));
        buf.extend_from_slice(&[0x1F]);

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Command::Reset));
        match codec.decode(&mut buf).unwrap() {
            Some(Command::TmsSeq { num_bits, tms }) => {
                assert_eq!(num_bits, 5);
                assert_eq!(&*tms, &[0x1F]);
            }
            other => panic!("expected TmsSeq, got {:?}", other),
        }
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn decode_rejects_oversized_vector() {
        let mut codec = CommandCodec::new(4);
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&Opcode::ScanChain.header(64));
        match codec.decode(&mut buf) {
            Err(ReadError::TooManyBytes { max, got }) => {
                assert_eq!(max, 4);
                assert_eq!(got, 8);
            }
            other => panic!("expected TooManyBytes, got {:?}", other),
        }
    }

    #[test]
    fn encode_matches_write_to() {
        let cmd = Command::ScanChain {
            num_bits: 13,
            tms: vec![0xAA, 0x02].into_boxed_slice(),
            tdi: vec![0x55, 0x01].into_boxed_slice(),
        };
        let mut expected = Vec::new();
        cmd.write_to(&mut expected).unwrap();

        let mut codec = CommandCodec::default();
        let mut buf = BytesMut::new();
        codec.encode(cmd, &mut buf).unwrap();
        assert_eq!(&buf[..], &expected[..]);
    }
}
