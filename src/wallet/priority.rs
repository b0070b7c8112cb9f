/// Blockchain priorities decide which balances are shown and in what order.
/// Anything not in the table resolves to `Priority::UNKNOWN` and is never displayed.
use core::fmt::{self, Display};

/// Sort precedence of a blockchain network. Higher comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(i32);

impl Priority {
    /// Sentinel for networks we do not display
    pub const UNKNOWN: Self = Self(-99);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// A balance is eligible for display only when its priority beats the sentinel
    pub const fn is_known(self) -> bool {
        self.0 > Self::UNKNOWN.0
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The networks with a fixed priority. Matching is exact, names are case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Blockchain {
    Osmosis,
    Ethereum,
    Arbitrum,
    Zilliqa,
    Neo,
    Other(String),
}

impl Blockchain {
    pub const fn priority(&self) -> Priority {
        match self {
            Self::Osmosis => Priority(100),
            Self::Ethereum => Priority(50),
            Self::Arbitrum => Priority(30),
            Self::Zilliqa | Self::Neo => Priority(20),
            Self::Other(_) => Priority::UNKNOWN,
        }
    }
}

impl From<&str> for Blockchain {
    fn from(s: &str) -> Self {
        match s {
            "Osmosis" => Self::Osmosis,
            "Ethereum" => Self::Ethereum,
            "Arbitrum" => Self::Arbitrum,
            "Zilliqa" => Self::Zilliqa,
            "Neo" => Self::Neo,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(name) => write!(f, "{name}"),
            known => write!(f, "{known:?}"),
        }
    }
}

/// Priority of a blockchain by name. Total: unmapped names get the sentinel.
pub fn priority_of(blockchain: &str) -> Priority {
    Blockchain::from(blockchain).priority()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_table() {
        for (blockchain, expected) in &[
            ("Osmosis", 100),
            ("Ethereum", 50),
            ("Arbitrum", 30),
            ("Zilliqa", 20),
            ("Neo", 20),
        ] {
            assert_eq!(priority_of(blockchain), Priority::new(*expected));
            assert!(priority_of(blockchain).is_known());
        }
    }

    #[test]
    fn test_unknown_blockchain_gets_sentinel() {
        assert_eq!(priority_of("Unknown"), Priority::UNKNOWN);
        assert_eq!(priority_of(""), Priority::UNKNOWN);
        // names are case sensitive
        assert_eq!(priority_of("osmosis"), Priority::UNKNOWN);
        assert!(!Priority::UNKNOWN.is_known());
    }

    #[test]
    fn test_blockchain_display_round_trips_name() {
        assert_eq!(Blockchain::from("Zilliqa").to_string(), "Zilliqa");
        assert_eq!(Blockchain::from("Solana").to_string(), "Solana");
    }
}
