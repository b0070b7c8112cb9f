/// Price list published as a JSON array of `{currency, date, price}`
pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com/prices.json";

pub const DEFAULT_SLACK_CHANNEL: &str = "#tokenboard";

/// How long a simulated swap takes to settle
pub const DEFAULT_SWAP_DELAY_MS: u64 = 1500;

/// Decimals shown for exchange rates and swap outputs
pub const RATE_DECIMALS: u32 = 6;
