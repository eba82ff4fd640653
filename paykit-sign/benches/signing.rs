use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paykit_sign::{
    canonicalize_payment, sign_ed25519, sign_hmac, verify_ed25519, verify_hmac, PaymentPayload,
};

const HMAC_SECRET: &str = "benchmark-shared-secret";
const PRIVATE_KEY: &str =
    "bv2DsjDN/xvx1Jrpmx1SWNPcVW44lkvWnLgRNlWhKMTYXbpwY3e6OKA2f3e9DhwjdDJ5Pok2x0RTi3+Hx8IhjA==";
const PUBLIC_KEY: &str = "2F26cGN3ujigNn93vQ4cI3QyeT6JNsdEU4t/h8fCIYw=";

fn signing_benchmark(c: &mut Criterion) {
    let payload = PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB")
        .with_title("Benchmark order")
        .with_credit_account_number("1000123456789");

    c.bench_function("canonicalize_payment", |b| {
        b.iter(|| canonicalize_payment(black_box(&payload)));
    });

    c.bench_function("sign_hmac", |b| {
        b.iter(|| sign_hmac(black_box(&payload), HMAC_SECRET));
    });

    let tag = sign_hmac(&payload, HMAC_SECRET).unwrap();
    c.bench_function("verify_hmac", |b| {
        b.iter(|| verify_hmac(black_box(&payload), black_box(&tag), HMAC_SECRET));
    });

    c.bench_function("sign_ed25519", |b| {
        b.iter(|| sign_ed25519(black_box(&payload), PRIVATE_KEY));
    });

    let signature = sign_ed25519(&payload, PRIVATE_KEY).unwrap();
    c.bench_function("verify_ed25519", |b| {
        b.iter(|| verify_ed25519(black_box(&payload), black_box(&signature), PUBLIC_KEY));
    });
}

criterion_group!(benches, signing_benchmark);
criterion_main!(benches);
