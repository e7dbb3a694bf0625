//! End-to-end tests wiring `jtag-vpi-client` against `jtag-vpi-server`
//! over localhost TCP. See the `tests/` directory.
