//! Example: Public market data and an optional signed account query
//!
//! Run with: cargo run --example market_data
//!
//! Set BINANCE_API_KEY and BINANCE_SECRET_KEY to also fetch account balances.
//! Use RUST_LOG=binance_rest=debug to see each request as it is signed and sent.

use binance_rest::{BinanceRestClient, CandlestickInterval, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BinanceRestClient::with_config(ClientConfig::from_env()?)?;

    println!("=== Binance Market Data ===\n");

    // ========================================================================
    // Connectivity
    // ========================================================================

    match client.server_time().await {
        Ok(time) => println!(
            "Server time: {} (local delta {} ms)",
            time.server_time,
            time.delta().num_milliseconds()
        ),
        Err(e) => println!("  Error: {}", e),
    }

    // ========================================================================
    // Order Book
    // ========================================================================

    println!("\n--- ETHBTC depth ---");
    match client.depth("ETHBTC", Some(5)).await {
        Ok(depth) => {
            for level in depth.asks.iter().rev() {
                println!("  ask {:>14} x {}", level.price, level.quantity);
            }
            for level in &depth.bids {
                println!("  bid {:>14} x {}", level.price, level.quantity);
            }
            if let Some(spread) = depth.spread() {
                println!("  spread: {}", spread);
            }
        }
        Err(e) => println!("  Error: {}", e),
    }

    // ========================================================================
    // Candlesticks
    // ========================================================================

    println!("\n--- ETHBTC hourly candles ---");
    match client
        .candlesticks("ETHBTC", CandlestickInterval::Hour1, Some(5))
        .await
    {
        Ok(candles) => {
            for candle in candles {
                println!(
                    "  {} O:{} H:{} L:{} C:{} trades:{}",
                    candle.open_time,
                    candle.open,
                    candle.high,
                    candle.low,
                    candle.close,
                    candle.trades
                );
            }
        }
        Err(e) => println!("  Error: {}", e),
    }

    // ========================================================================
    // All Prices
    // ========================================================================

    println!("\n--- Prices ---");
    match client.all_prices().await {
        Ok(prices) => {
            println!("  {} symbols", prices.len());
            for symbol in ["ETHBTC", "LTCBTC", "BNBBTC"] {
                if let Some(price) = prices.price(symbol) {
                    println!("  {}: {}", symbol, price);
                }
            }
        }
        Err(e) => println!("  Error: {}", e),
    }

    // ========================================================================
    // Account (signed)
    // ========================================================================

    if !client.has_credentials() {
        println!("\nNo credentials configured; skipping account query.");
        return Ok(());
    }

    println!("\n--- Account ---");
    match client.account_information().await {
        Ok(account) => {
            println!("  can trade: {}", account.can_trade);
            for (asset, balance) in &account.balances {
                println!(
                    "  {}: free {} locked {}",
                    asset, balance.free, balance.locked
                );
            }
        }
        Err(e) => println!("  Error: {}", e),
    }

    Ok(())
}
