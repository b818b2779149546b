use serde::Serialize;

/// One owner's decimal-adjusted balance of a mint, summed over all of the
/// owner's token accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolderRecord {
    pub owner: String,
    pub amount: f64,
}

/// A ranked entry in `TokenHolderSet::top_holders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopHolder {
    pub rank: usize,   // 1-based
    pub owner: String,
    pub amount: f64,
    pub percentage: String, // Share of the aggregated total, two decimals
}

/// Aggregated holder view of a mint, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolderSet {
    pub holder_count: usize,
    pub holders: Vec<String>, // Owner addresses in first-encounter order
    pub top_holders: Vec<TopHolder>,
    pub total_supply: f64, // Sum of aggregated balances, not the mint supply
}
