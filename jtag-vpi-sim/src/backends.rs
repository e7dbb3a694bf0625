pub mod bypass;
pub mod loopback;
