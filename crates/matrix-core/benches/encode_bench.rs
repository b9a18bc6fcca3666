//! Criterion benchmarks for the matrix command encoder.
//!
//! Routing bursts are serialized at 50 ms per command on the wire, so the
//! encoder itself has to be negligible next to the pacing delay. These
//! benchmarks keep it honest.
//!
//! Run with:
//! ```bash
//! cargo bench --package matrix-core --bench encode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_core::{encode_wire, InputPort, MatrixCommand, OutputPort, PresetId};

fn make_route() -> MatrixCommand {
    MatrixCommand::Route {
        input: InputPort::new(16).unwrap(),
        output: OutputPort::new(16).unwrap(),
    }
}

fn make_recall() -> MatrixCommand {
    MatrixCommand::RecallPreset(PresetId::new(32).unwrap())
}

fn bench_encode_wire(c: &mut Criterion) {
    c.bench_function("encode_wire/route", |b| {
        b.iter(|| encode_wire(black_box("16V16.")))
    });
    c.bench_function("encode_wire/recall", |b| {
        b.iter(|| encode_wire(black_box("Recall32.")))
    });
}

fn bench_command_encode(c: &mut Criterion) {
    let route = make_route();
    let recall = make_recall();

    c.bench_function("command/route_text_and_encode", |b| {
        b.iter(|| black_box(&route).encode())
    });
    c.bench_function("command/recall_text_and_encode", |b| {
        b.iter(|| black_box(&recall).encode())
    });
}

fn bench_full_sync_payloads(c: &mut Criterion) {
    // A full-state sync encodes one route command per output.
    c.bench_function("command/full_sync_16_payloads", |b| {
        b.iter(|| {
            for o in 1..=16u8 {
                let cmd = MatrixCommand::Route {
                    input: InputPort::new(((o - 1) % 16) + 1).unwrap(),
                    output: OutputPort::new(o).unwrap(),
                };
                black_box(cmd.encode());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_encode_wire,
    bench_command_encode,
    bench_full_sync_payloads
);
criterion_main!(benches);
