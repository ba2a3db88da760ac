use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fintrack_core::ledger::{
    category_breakdown, daily_trend, sorted_by_date_descending, totals, CategoryRegistry,
    TransactionDraft, TransactionKind, TransactionLedger,
};
use fintrack_core::storage::{JsonStore, KeyValueStore, TRANSACTIONS_KEY};
use tempfile::tempdir;

fn build_sample_ledger(txn_count: usize, registry: &CategoryRegistry) -> TransactionLedger {
    let mut ledger = TransactionLedger::default();
    let names: Vec<&str> = registry.iter().map(|c| c.name.as_str()).collect();
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

    for idx in 0..txn_count {
        let kind = if idx % 10 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let draft = TransactionDraft::new(5.0 + (idx % 100) as f64, kind, names[idx % names.len()])
            .with_date(start + Duration::hours((idx % 2_000) as i64));
        ledger.add(draft, start).expect("finite amount");
    }
    ledger
}

fn bench_projections(c: &mut Criterion) {
    let registry = CategoryRegistry::with_defaults();
    let ledger = build_sample_ledger(black_box(10_000), &registry);

    c.bench_function("history_sort_10k", |b| {
        b.iter(|| black_box(sorted_by_date_descending(ledger.as_slice())))
    });
    c.bench_function("totals_10k", |b| b.iter(|| black_box(totals(ledger.as_slice()))));
    c.bench_function("category_breakdown_10k", |b| {
        b.iter(|| black_box(category_breakdown(ledger.as_slice(), &registry)))
    });
    c.bench_function("daily_trend_10k", |b| {
        b.iter(|| black_box(daily_trend(ledger.as_slice())))
    });
}

fn bench_persist(c: &mut Criterion) {
    let registry = CategoryRegistry::with_defaults();
    let ledger = build_sample_ledger(10_000, &registry);
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(Some(dir.path().to_path_buf())).expect("store");

    c.bench_function("transactions_persist_10k", |b| {
        b.iter(|| {
            let json = serde_json::to_string(&ledger).expect("serialize");
            store.set(TRANSACTIONS_KEY, &json).expect("write");
        })
    });
}

criterion_group!(benches, bench_projections, bench_persist);
criterion_main!(benches);
