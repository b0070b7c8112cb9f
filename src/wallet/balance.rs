use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::priority::Priority;

/// A wallet balance as reported by the balance provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub currency: String,
    pub amount: f64,
    pub blockchain: String,
}

impl WalletBalance {
    pub fn new(currency: &str, amount: f64, blockchain: &str) -> Self {
        Self {
            currency: currency.to_string(),
            amount,
            blockchain: blockchain.to_string(),
        }
    }
}

/// A balance with its priority resolved. Only lives inside one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PrioritizedBalance {
    pub balance: WalletBalance,
    pub priority: Priority,
}

/// Stable identity of a displayed row. Position in the output is not an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[display("{currency}-{blockchain}")]
pub struct BalanceKey {
    pub currency: String,
    pub blockchain: String,
}

/// USD value of a row. A missing or invalid price is `Unavailable`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "value")]
pub enum UsdValue {
    Available(f64),
    Unavailable,
}

impl UsdValue {
    pub const fn amount(self) -> Option<f64> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Display for UsdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(value) => write!(f, "${value:.2}"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A render ready row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBalance {
    pub key: BalanceKey,
    pub currency: String,
    pub amount: f64,
    pub blockchain: String,
    pub priority: i32,
    pub formatted_amount: String,
    pub usd_value: UsdValue,
}

impl DisplayBalance {
    pub fn new(prioritized: PrioritizedBalance, formatted_amount: String, usd_value: UsdValue) -> Self {
        let PrioritizedBalance { balance, priority } = prioritized;
        Self {
            key: BalanceKey {
                currency: balance.currency.clone(),
                blockchain: balance.blockchain.clone(),
            },
            currency: balance.currency,
            amount: balance.amount,
            blockchain: balance.blockchain,
            priority: priority.value(),
            formatted_amount,
            usd_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_key_display() {
        let key = BalanceKey {
            currency: "ETH".to_string(),
            blockchain: "Ethereum".to_string(),
        };
        assert_eq!(key.to_string(), "ETH-Ethereum");
    }

    #[test]
    fn test_wallet_balance_from_json() {
        let balances: Vec<WalletBalance> = serde_json::from_str(
            r#"[{"currency":"ATOM","amount":5.5,"blockchain":"Osmosis"}]"#,
        )
        .unwrap();
        assert_eq!(balances, vec![WalletBalance::new("ATOM", 5.5, "Osmosis")]);
    }

    #[test]
    fn test_usd_value_serializes_unavailable_explicitly() {
        let json = serde_json::to_value(UsdValue::Unavailable).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "unavailable" }));

        let json = serde_json::to_value(UsdValue::Available(50.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "available", "value": 50.0 }));
    }
}
