pub mod form;
pub mod quote;

pub use form::SwapForm;
pub use quote::{is_valid_amount_input, parse_amount, quote, ExchangeRate, Side, SwapError, SwapQuote, SwapReceipt};
