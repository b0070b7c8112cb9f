pub mod balance;
pub mod pipeline;
pub mod priority;
#[cfg(test)]
pub mod test_helpers;

pub use balance::{BalanceKey, DisplayBalance, PrioritizedBalance, UsdValue, WalletBalance};
pub use pipeline::{compute_display_balances, format_amount, total_usd_value};
pub use priority::{priority_of, Blockchain, Priority};
