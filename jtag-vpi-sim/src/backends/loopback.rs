//! # Loopback Backend
//!
//! Returns the TDI vector unchanged as TDO. The most predictable wire-level
//! peer there is: whatever the client shifts in comes straight back, which
//! makes protocol-level problems (framing, ordering, lengths) stand out
//! immediately.
use jtag_vpi_protocol::ResponseHeader;
use jtag_vpi_server::VpiTap;

/// TAP stand-in that echoes every scan.
#[derive(Debug, Default)]
pub struct LoopbackTap;

impl VpiTap for LoopbackTap {
    fn reset(&self) -> ResponseHeader {
        log::debug!("Loopback reset");
        ResponseHeader::default()
    }

    fn tms_seq(&self, num_bits: u32, _tms: Box<[u8]>) {
        log::debug!("Loopback tms_seq: num_bits={} (no effect)", num_bits);
    }

    fn scan(&self, num_bits: u32, _tms: Box<[u8]>, tdi: Box<[u8]>) -> Box<[u8]> {
        log::debug!("Loopback scan: num_bits={}", num_bits);
        tdi
    }
}
