//! Benchmarks for the hot paths of a handshake.
//!
//! Run with: `cargo bench --bench auth_bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use pgwire_poolauth::auth::password::{constant_time_eq, md5_credential};
use pgwire_poolauth::protocol::messages::{ErrorFields, parse_error_response};

/// Generate a realistic error response payload
fn make_error_payload() -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"SFATAL\0");
    payload.extend_from_slice(b"VFATAL\0");
    payload.extend_from_slice(b"C28P01\0");
    payload.extend_from_slice(b"Mpassword authentication failed for user \"app\"\0");
    payload.extend_from_slice(b"Fauth.c\0");
    payload.extend_from_slice(b"L335\0");
    payload.extend_from_slice(b"Rauth_failed\0");
    payload.push(0);
    payload
}

fn bench_md5_credential(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_credential");

    for pw_len in [8, 32, 128] {
        let password = "x".repeat(pw_len);
        group.throughput(Throughput::Bytes(pw_len as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pw_len),
            &password,
            |b, password| {
                b.iter(|| {
                    md5_credential(
                        black_box("app"),
                        black_box(password),
                        black_box(&[1, 2, 3, 4]),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_constant_time_eq(c: &mut Criterion) {
    let a = md5_credential("app", "secret", &[1, 2, 3, 4]);
    let b2 = md5_credential("app", "secret", &[1, 2, 3, 4]);

    c.bench_function("constant_time_eq", |b| {
        b.iter(|| constant_time_eq(black_box(a.as_bytes()), black_box(b2.as_bytes())));
    });
}

fn bench_parse_error_response(c: &mut Criterion) {
    let payload = make_error_payload();

    c.bench_function("parse_error_response", |b| {
        b.iter(|| parse_error_response(black_box(&payload)));
    });
}

fn bench_error_fields_parse(c: &mut Criterion) {
    let payload = make_error_payload();

    c.bench_function("ErrorFields::parse", |b| {
        b.iter(|| ErrorFields::parse(black_box(&payload)));
    });
}

criterion_group!(
    benches,
    bench_md5_credential,
    bench_constant_time_eq,
    bench_parse_error_response,
    bench_error_fields_parse,
);
criterion_main!(benches);
