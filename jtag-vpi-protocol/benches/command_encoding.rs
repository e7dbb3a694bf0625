use std::hint::black_box;
use std::io::Cursor;

use criterion::{Criterion, criterion_group, criterion_main};
use jtag_vpi_protocol::Command;

fn scan_command(num_bytes: usize) -> Command {
    Command::ScanChain {
        num_bits: (num_bytes * 8) as u32,
        tms: vec![0xAA; num_bytes].into_boxed_slice(),
        tdi: vec![0x55; num_bytes].into_boxed_slice(),
    }
}

fn encode_reset(c: &mut Criterion) {
    c.bench_function("encode_reset", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(8);
            black_box(&Command::Reset).write_to(&mut out).unwrap();
            black_box(out)
        })
    });
}

fn encode_scan_1k(c: &mut Criterion) {
    let cmd = scan_command(1024);
    c.bench_function("encode_scan_1k", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(8 + 2 * 1024);
            black_box(&cmd).write_to(&mut out).unwrap();
            black_box(out)
        })
    });
}

fn decode_scan_1k(c: &mut Criterion) {
    let mut frame = Vec::new();
    scan_command(1024).write_to(&mut frame).unwrap();
    c.bench_function("decode_scan_1k", |b| {
        b.iter(|| {
            let mut reader = Cursor::new(black_box(&frame[..]));
            Command::from_reader(&mut reader, 1 << 20).unwrap()
        })
    });
}

criterion_group!(benches, encode_reset, encode_scan_1k, decode_scan_1k);
criterion_main!(benches);
