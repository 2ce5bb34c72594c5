//! Market data tools exposed to the agents

pub mod news;
pub mod price;

pub use news::NewsSearchTool;
pub use price::StockPriceTool;
