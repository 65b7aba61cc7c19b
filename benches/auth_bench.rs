//! Benchmarks for the Gatehouse auth workflow
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gatehouse::*;

fn registration(i: usize) -> RegistrationForm {
    RegistrationForm {
        name: format!("user{}", i),
        email: format!("user{}@example.com", i),
        phone: "1234567890".to_string(),
        password: "Abcd123!".to_string(),
        confirm_password: "Abcd123!".to_string(),
        terms_accepted: true,
    }
}

fn populated_flow(count: usize) -> AuthFlow {
    let mut flow = AuthFlow::new(MemoryStore::shared(), AuthConfig::immediate());
    for i in 0..count {
        flow.register(&registration(i)).unwrap();
    }
    flow
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let form = registration(0);

    group.bench_function("validate_registration", |b| {
        b.iter(|| validate_registration(black_box(&form)).unwrap())
    });

    group.bench_function("password_strength", |b| {
        b.iter(|| PasswordStrength::of(black_box("Abcdefgh123!")))
    });

    group.finish();
}

fn bench_login(c: &mut Criterion) {
    let mut group = c.benchmark_group("login");

    // Every call rereads and rewrites the whole user list
    for size in [10, 100, 1000] {
        let mut flow = populated_flow(size);
        let form = LoginForm {
            identifier: format!("user{}@example.com", size - 1),
            password: "Abcd123!".to_string(),
            remember: false,
        };

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("login_{}_users", size), |b| {
            b.iter(|| flow.login(black_box(&form)).unwrap())
        });
    }

    group.finish();
}

fn bench_check_auth(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let mut flow = populated_flow(100);

    group.bench_function("check_auth_100_users", |b| {
        b.iter(|| flow.check_auth().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_validation, bench_login, bench_check_auth);
criterion_main!(benches);
