pub mod binance;
pub mod coinalyze;
pub mod coinbase;
mod wire;

pub use binance::BinanceAdapter;
pub use coinalyze::CoinalyzeAdapter;
pub use coinbase::CoinbaseAdapter;
