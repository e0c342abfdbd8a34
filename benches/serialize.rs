//! Benchmarks for record serialization.
//!
//! Tests encoding performance for:
//! - Layout resolution (cold and cached)
//! - Flat records in Shift_JIS and UTF-8
//! - Nested records
//! - Parallel batch encoding

extern crate fixedtext;

use criterion::{criterion_group, criterion_main, Criterion};
use fixedtext::prelude::*;
use std::{hint::black_box, sync::Arc};

struct Account {
    id: u32,
    holder: String,
    branch: &'static str,
    balance: i64,
    memo: Option<String>,
}

impl FixedText for Account {
    fn declare(layout: &mut LayoutDecl<Self>) {
        layout.numeric("id", |a| a.id.into()).width(10);
        layout.text("holder", |a| (&a.holder).into()).width(40);
        layout.text("branch", |a| a.branch.into()).width(12);
        layout.numeric("balance", |a| a.balance.into()).width(16);
        layout.text("memo", |a| a.memo.as_deref().into()).width(30);
    }
}

struct Transfer {
    sequence: u64,
    from: Account,
    to: Account,
    amount: i64,
}

impl FixedText for Transfer {
    fn declare(layout: &mut LayoutDecl<Self>) {
        layout.numeric("sequence", |t| t.sequence.into()).width(12);
        layout.composite("from", |t| Some(&t.from));
        layout.composite("to", |t| Some(&t.to));
        layout.numeric("amount", |t| t.amount.into()).width(16);
    }
}

fn registry() -> Arc<LayoutRegistry> {
    let registry = Arc::new(LayoutRegistry::new());
    registry.register::<Account>().register::<Transfer>();
    registry
}

fn account(id: u32, holder: &str) -> Account {
    Account {
        id,
        holder: holder.to_string(),
        branch: "東京本店",
        balance: i64::from(id) * 1_000,
        memo: Some("定期預金".to_string()),
    }
}

/// Benchmark resolving a nested layout from scratch.
fn bench_resolve_cold(c: &mut Criterion) {
    let registry = registry();

    c.bench_function("resolve_nested_cold", |b| {
        b.iter(|| {
            registry.clear_cache();
            let schema = registry.resolve::<Transfer>().unwrap();
            black_box(schema)
        });
    });
}

/// Benchmark looking up an already resolved layout.
fn bench_resolve_cached(c: &mut Criterion) {
    let registry = registry();
    registry.resolve::<Transfer>().unwrap();

    c.bench_function("resolve_nested_cached", |b| {
        b.iter(|| {
            let schema = registry.resolve::<Transfer>().unwrap();
            black_box(schema)
        });
    });
}

/// Benchmark a flat record with double-byte text.
fn bench_flat_shift_jis(c: &mut Criterion) {
    let serializer = Serializer::new(registry(), Arc::new(Legacy::shift_jis()));
    let value = account(4711, "山田太郎");

    c.bench_function("serialize_flat_shift_jis", |b| {
        b.iter(|| {
            let record = serializer.serialize(black_box(&value)).unwrap();
            black_box(record)
        });
    });
}

/// Benchmark a flat record with ASCII text.
fn bench_flat_utf8(c: &mut Criterion) {
    let serializer = Serializer::new(registry(), Arc::new(Utf8));
    let mut value = account(4711, "John Doe");
    value.branch = "HQ";
    value.memo = None;

    c.bench_function("serialize_flat_utf8", |b| {
        b.iter(|| {
            let record = serializer.serialize(black_box(&value)).unwrap();
            black_box(record)
        });
    });
}

/// Benchmark a record embedding two nested records.
fn bench_nested_shift_jis(c: &mut Criterion) {
    let serializer = Serializer::new(registry(), Arc::new(Legacy::shift_jis()));
    let value = Transfer {
        sequence: 1,
        from: account(1, "山田太郎"),
        to: account(2, "ﾔﾏﾀﾞﾊﾅｺ"),
        amount: 250_000,
    };

    c.bench_function("serialize_nested_shift_jis", |b| {
        b.iter(|| {
            let record = serializer.serialize(black_box(&value)).unwrap();
            black_box(record)
        });
    });
}

/// Benchmark appending into a reused buffer.
fn bench_serialize_into(c: &mut Criterion) {
    let serializer = Serializer::new(registry(), Arc::new(Legacy::shift_jis()));
    let value = account(4711, "山田太郎");
    let mut out = Vec::with_capacity(serializer.record_width::<Account>().unwrap());

    c.bench_function("serialize_into_reused", |b| {
        b.iter(|| {
            out.clear();
            serializer
                .serialize_into(black_box(&value), &mut out)
                .unwrap();
            black_box(out.len())
        });
    });
}

/// Benchmark encoding a batch of records in parallel.
fn bench_serialize_all(c: &mut Criterion) {
    let serializer = Serializer::new(registry(), Arc::new(Legacy::shift_jis()));
    let values: Vec<_> = (0..10_000).map(|i| account(i, "山田太郎")).collect();

    c.bench_function("serialize_all_10k", |b| {
        b.iter(|| {
            let records = serializer.serialize_all(black_box(&values)).unwrap();
            black_box(records)
        });
    });
}

criterion_group!(
    benches,
    // Resolution
    bench_resolve_cold,
    bench_resolve_cached,
    // Single records
    bench_flat_shift_jis,
    bench_flat_utf8,
    bench_nested_shift_jis,
    bench_serialize_into,
    // Batches
    bench_serialize_all,
);
criterion_main!(benches);
