pub mod holder;
pub mod token;

// Re-export commonly used types
pub use holder::{HolderRecord, TokenHolderSet, TopHolder};
pub use token::{MarketCap, PricePerToken, TokenComparison, TokenInfo, TokenLinks, TokenMetadata};
