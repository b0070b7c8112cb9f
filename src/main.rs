use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::{Result, WrapErr};
use tokenboard::config::Config;
use tokenboard::notify::Notifier;
use tokenboard::prices::{format_usd, load_prices, PriceClient, PriceMap};
use tokenboard::swap::{quote, SwapForm};
use tokenboard::utils::logger::setup_logger;
use tokenboard::wallet::{compute_display_balances, total_usd_value, WalletBalance};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tokens with their USD price
    Prices {
        /// Include tokens without a usable price
        #[arg(long)]
        all: bool,
    },
    /// Quote a swap at current prices
    Quote { from: String, to: String, amount: String },
    /// Simulate a swap
    Swap { from: String, to: String, amount: String },
    /// Show wallet balances from a JSON file, ordered by blockchain priority
    Balances {
        file: PathBuf,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
}

async fn fetch_prices(config: &Config, notifier: &Notifier) -> Result<PriceMap> {
    let client = PriceClient::from_config(config)?;
    Ok(load_prices(&client, notifier).await)
}

fn list_prices(prices: &PriceMap, all: bool) {
    let tokens = if all { prices.tokens() } else { prices.valid_tokens() };
    for token in tokens {
        println!("{token:<12} {}", format_usd(prices.raw_price(token)));
    }
}

fn print_quote(prices: &PriceMap, from: &str, to: &str, amount: &str) -> Result<()> {
    let quote = quote(prices, from, to, amount)?;
    println!("Exchange Rate: {}", quote.rate);
    println!("{quote}");
    Ok(())
}

async fn run_swap(config: &Config, notifier: &Notifier, prices: &PriceMap, from: &str, to: &str, amount: &str) -> Result<()> {
    let mut form = SwapForm::prefilled(prices, from, to, amount)?;

    match form.exchange_rate(prices) {
        Some(rate) => println!("Exchange Rate: {rate}"),
        None => println!("Rate not available"),
    }

    let receipt = form.submit(prices, config.swap_delay, notifier).await?;
    println!(
        "Settled {} at {}",
        receipt.quote,
        receipt.settled_at.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

fn show_balances(prices: &PriceMap, file: &Path, json: bool) -> Result<()> {
    let raw = fs::read_to_string(file).wrap_err_with(|| format!("reading {}", file.display()))?;
    let balances: Vec<WalletBalance> =
        serde_json::from_str(&raw).wrap_err_with(|| format!("parsing {}", file.display()))?;

    let rows = compute_display_balances(&balances, prices);
    log::debug!("balances: {} of {} balances displayed", rows.len(), balances.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        println!(
            "{:<24} {:>16} {:>16}",
            row.key.to_string(),
            row.formatted_amount,
            row.usd_value.to_string()
        );
    }
    println!("{:<24} {:>33}", "Total", format!("${:.2}", total_usd_value(&rows)));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::from_env();
    setup_logger(config.log_level)?;

    let cli = Cli::parse();
    let notifier = Notifier::from_config(&config);
    let prices = fetch_prices(&config, &notifier).await?;

    match cli.command {
        Commands::Prices { all } => list_prices(&prices, all),
        Commands::Quote { from, to, amount } => print_quote(&prices, &from, &to, &amount)?,
        Commands::Swap { from, to, amount } => {
            run_swap(&config, &notifier, &prices, &from, &to, &amount).await?;
        }
        Commands::Balances { file, json } => show_balances(&prices, &file, json)?,
    }

    Ok(())
}
