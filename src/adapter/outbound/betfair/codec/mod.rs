//! Text codecs for the exchange's delimiter-encoded payloads.

pub mod compressed;
pub mod removed;
pub mod tokenizer;

pub use compressed::decode_market_prices;
pub use removed::removed_runner_names;
