//! API clients for market data providers

pub mod news;
pub mod yahoo;

pub use news::{NewsSearcher, YahooNewsClient};
pub use yahoo::{PriceFetcher, YahooFinanceClient};

#[cfg(test)]
pub use news::MockNewsSearcher;
#[cfg(test)]
pub use yahoo::MockPriceFetcher;
