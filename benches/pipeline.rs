use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokenboard::prices::{PriceMap, PriceRecord};
use tokenboard::wallet::{compute_display_balances, WalletBalance};

const BLOCKCHAINS: [&str; 7] = ["Osmosis", "Ethereum", "Arbitrum", "Zilliqa", "Neo", "Solana", "Unknown"];

/// Generate a random token symbol
fn random_currency() -> String {
    (0..4).map(|_| fastrand::uppercase()).collect()
}

/// Generate synthetic balances, roughly a fifth of them excluded by blockchain or amount
fn generate_balances(count: usize) -> Vec<WalletBalance> {
    (0..count)
        .map(|_| {
            let amount = if fastrand::u8(..10) == 0 { 0.0 } else { fastrand::f64() * 10_000.0 };
            WalletBalance::new(
                &random_currency(),
                amount,
                BLOCKCHAINS[fastrand::usize(..BLOCKCHAINS.len())],
            )
        })
        .collect()
}

/// Prices for about half of the balances
fn generate_prices(balances: &[WalletBalance]) -> PriceMap {
    PriceMap::from_records(
        balances
            .iter()
            .filter(|_| fastrand::bool())
            .map(|b| PriceRecord::new(&b.currency, serde_json::json!(fastrand::f64() * 2_000.0))),
    )
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_display_balances");

    for count in [10, 100, 1_000, 10_000] {
        let balances = generate_balances(count);
        let prices = generate_prices(&balances);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| compute_display_balances(black_box(&balances), black_box(&prices)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
