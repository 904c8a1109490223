//! Benchmarks for the statistics engine

// Benchmarks are not production code - unwrap is acceptable here
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use trading_stats::stats::{PartialStatsFilter, StatsAccumulator, StatsDriver, TradeFilter};
use trading_stats::Trade;

/// Deterministic journal alternating runs of winners and losers.
fn synthetic_trades(n: usize) -> Vec<Trade> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let entry = start + TimeDelta::minutes(i as i64 * 15);
            let cents = ((i * 7919) % 20_001) as i64 - 9_500;
            let trade = Trade::closed(
                format!("B-{i}"),
                entry,
                entry + TimeDelta::minutes(10),
                Decimal::new(cents, 2),
                Decimal::new(125, 2),
            );
            if i % 3 == 0 { trade.with_tag("momentum") } else { trade }
        })
        .collect()
}

fn bench_accumulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator");

    for n in [100usize, 1_000, 10_000] {
        let trades = synthetic_trades(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("record_build", n), &trades, |b, trades| {
            b.iter(|| {
                let mut acc = StatsAccumulator::new();
                for trade in trades {
                    acc.record(trade);
                }
                black_box(acc.build())
            });
        });
    }

    group.finish();
}

fn bench_driver(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver");
    let trades = synthetic_trades(10_000);
    group.throughput(Throughput::Elements(trades.len() as u64));

    group.bench_function("four_partials", |b| {
        b.iter(|| {
            let keys = vec![
                PartialStatsFilter::new("winners", TradeFilter::Winners),
                PartialStatsFilter::new("losers", TradeFilter::Losers),
                PartialStatsFilter::new("breakeven", TradeFilter::Breakeven),
                PartialStatsFilter::new(
                    "momentum",
                    TradeFilter::Tag {
                        tag: "momentum".to_string(),
                    },
                ),
            ];
            let mut driver = StatsDriver::new(keys).unwrap();
            driver.record_all(&trades);
            black_box(driver.finish())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_accumulator, bench_driver);
criterion_main!(benches);
