//! Request parameter and body types.
//!
//! Absent optional fields are skipped during serialization, so they never
//! reach the query string or the signature.

use rust_decimal::Decimal;
use serde::Serialize;

/// Money mode of a listing or wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyMode {
    #[default]
    PlayMoney,
    RealMoney,
}

/// Sort order for market listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketOrdering {
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "-created_on")]
    Newest,
    #[serde(rename = "bet_end_date")]
    BetEndDate,
    #[serde(rename = "-wagers_count")]
    MostWagers,
    #[serde(rename = "-volume")]
    MostVolume,
}

/// Side of a purchase: long bets on the outcome, short against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Position {
    #[default]
    #[serde(rename = "l")]
    Long,
    #[serde(rename = "s")]
    Short,
}

/// Offset pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    /// Number of results to return per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// The initial index from which to return the results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PaginationParams {
    /// Page of `limit` results starting at `offset`.
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RootCategoriesAndMainChildrenParams {
    pub currency_mode: CurrencyMode,
}

/// Filters for `GET /markets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarketListParams {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_mode: Option<CurrencyMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_my_bets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_markets_i_follow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<MarketOrdering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_only: Option<bool>,
    /// At most 100 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// At most 100 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Filters for `GET /bets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BettingListParams {
    /// Only wagers with status purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_mode: Option<CurrencyMode>,
    /// Only bets made by users I follow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Only sold, won, lost or disabled wagers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_bets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Quote for selling part of a position, by amount or by shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartialSellParams {
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub shares: Option<Decimal>,
}

/// Body of `POST /bets/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseBody {
    /// Outcome ID.
    pub outcome: u64,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub shares: Decimal,
    /// At most 11 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Body of `PATCH /bets/{id}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SellBody {
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub shares: Option<Decimal>,
}
