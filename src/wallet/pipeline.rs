/// The balance pipeline: attach priority, filter, sort, format, price.
///
/// Pure and synchronous. The same balances and prices always give the same rows
/// in the same order, so a renderer may re-run it whenever an input changes.
use std::cmp::Ordering;

use super::balance::{DisplayBalance, PrioritizedBalance, UsdValue, WalletBalance};
use super::priority::priority_of;
use crate::prices::PriceMap;
use crate::utils::format::to_fixed;

/// Turns raw wallet balances into ordered, formatted rows ready for display.
///
/// Balances on unmapped blockchains or with a non-positive amount are dropped.
/// Rows are ordered by priority descending, then currency ascending (code point order),
/// then blockchain ascending so the order stays total.
pub fn compute_display_balances(balances: &[WalletBalance], prices: &PriceMap) -> Vec<DisplayBalance> {
    let mut prioritized: Vec<PrioritizedBalance> = balances
        .iter()
        .map(|balance| PrioritizedBalance {
            balance: balance.clone(),
            priority: priority_of(&balance.blockchain),
        })
        .filter(|b| b.priority.is_known() && b.balance.amount > 0.0)
        .collect();

    prioritized.sort_by(compare);

    prioritized
        .into_iter()
        .map(|b| {
            let formatted_amount = format_amount(b.balance.amount);
            let usd_value = usd_value(&b.balance, prices);
            DisplayBalance::new(b, formatted_amount, usd_value)
        })
        .collect()
}

fn compare(lhs: &PrioritizedBalance, rhs: &PrioritizedBalance) -> Ordering {
    rhs.priority
        .cmp(&lhs.priority)
        .then_with(|| lhs.balance.currency.cmp(&rhs.balance.currency))
        .then_with(|| lhs.balance.blockchain.cmp(&rhs.balance.blockchain))
}

fn usd_value(balance: &WalletBalance, prices: &PriceMap) -> UsdValue {
    prices
        .valid_price(&balance.currency)
        .map(|price| price * balance.amount)
        .filter(|value| value.is_finite())
        .map_or(UsdValue::Unavailable, UsdValue::Available)
}

/// Renders an amount with exactly two fractional digits, halves rounded away from zero.
pub fn format_amount(amount: f64) -> String {
    to_fixed(amount, 2)
}

/// Sum of the USD values that are available. Rows without a price are skipped.
pub fn total_usd_value(rows: &[DisplayBalance]) -> f64 {
    rows.iter().filter_map(|row| row.usd_value.amount()).sum()
}
