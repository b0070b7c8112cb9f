pub mod config;
pub mod notify;
pub mod prices;
pub mod swap;
pub mod utils;
pub mod wallet;
