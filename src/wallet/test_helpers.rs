use super::balance::{DisplayBalance, WalletBalance};
use crate::prices::{PriceMap, PriceRecord};

pub fn balances(args: &[(&str, f64, &str)]) -> Vec<WalletBalance> {
    args.iter()
        .map(|(currency, amount, blockchain)| WalletBalance::new(currency, *amount, blockchain))
        .collect()
}

pub fn prices(args: &[(&str, f64)]) -> PriceMap {
    PriceMap::from_records(
        args.iter()
            .map(|(currency, price)| PriceRecord::new(currency, serde_json::json!(price))),
    )
}

pub fn currencies(rows: &[DisplayBalance]) -> Vec<&str> {
    rows.iter().map(|row| row.currency.as_str()).collect()
}
