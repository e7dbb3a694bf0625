//! # JTAG VPI Simulation Server
//!
//! Software TAP backends for the JTAG VPI server. A stand-in for a real
//! simulator-side VPI module: it speaks the full wire protocol but answers
//! scans from a software model, which makes it useful for exercising
//! clients and debugger integrations without any HDL tooling.
pub mod backends;

use std::error::Error;
use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use env_logger::Env;
use jtag_vpi_protocol::DEFAULT_PORT;
use jtag_vpi_server::server::{Config, Server};

use crate::backends::{bypass::BypassTap, loopback::LoopbackTap};

#[derive(Parser, Eq, PartialEq, Clone)]
enum TapImpl {
    /// Echo the TDI vector back as TDO unchanged
    Loopback,
    /// Model a TAP whose scan path is the single-bit bypass register
    Bypass,
}

#[derive(Parser)]
#[command(about = "JTAG VPI server backed by a software TAP model", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(short, long, default_value = "127.0.0.1")]
    ip: IpAddr,

    #[clap(subcommand)]
    tap: Option<TapImpl>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("Starting JTAG VPI server");

    let args = Args::parse();
    log::debug!("Parsed arguments: ip={}, port={}", args.ip, args.port);

    let config = Config::default();
    log::debug!("Server config: max_vector_size={}", config.max_vector_size);

    let addr = SocketAddr::new(args.ip, args.port);
    log::info!("Binding to address: {}", addr);

    match args.tap.unwrap_or(TapImpl::Bypass) {
        TapImpl::Loopback => {
            log::info!("Serving the loopback TAP model");
            Server::new(LoopbackTap, config).listen(addr)?;
        }
        TapImpl::Bypass => {
            log::info!("Serving the bypass TAP model");
            Server::new(BypassTap, config).listen(addr)?;
        }
    }
    Ok(())
}
