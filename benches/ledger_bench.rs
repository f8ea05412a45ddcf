//! Benchmarks for quota accounting and payload assembly.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use likes_order_form::config::FormConfig;
use likes_order_form::core::{
    ContactInfo, PayloadTemplate, PostCollection, PostId, QuotaLedger, RelayPayload,
};

fn collection(ledger: &QuotaLedger, entries: usize) -> PostCollection {
    let mut posts = PostCollection::with_default(ledger, 1);
    for _ in 1..entries {
        let id = posts.add_entry(ledger, 1).expect("room for entry");
        posts
            .update_url(id, "https://www.instagram.com/p/C1xyZ/")
            .expect("entry exists");
    }
    posts
}

fn bench_propose_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("propose_change");
    let ledger = QuotaLedger::new(2500);
    for entries in [1usize, 10, 100] {
        let posts = collection(&ledger, entries);
        group.bench_with_input(BenchmarkId::from_parameter(entries), &posts, |b, posts| {
            b.iter(|| ledger.propose_change(black_box(posts.entries()), PostId(1), black_box(4000)));
        });
    }
    group.finish();
}

fn bench_payload_build(c: &mut Criterion) {
    let cfg = FormConfig::with_ceiling(2500);
    let ledger = QuotaLedger::new(cfg.ceiling);
    let template = PayloadTemplate::from(&cfg);
    let contact = ContactInfo {
        name: "Sanne".into(),
        email: "sanne@example.nl".into(),
        phone: "0612345678".into(),
    };
    let posts = collection(&ledger, 25);
    c.bench_function("payload_build_25", |b| {
        b.iter(|| RelayPayload::build(&template, &contact, black_box(&posts)));
    });
}

criterion_group!(ledger_benches, bench_propose_change, bench_payload_build);
criterion_main!(ledger_benches);
