//! Futuur API response types.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Balances per currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Wallet {
    #[serde(rename = "OOM")]
    pub oom: Decimal,
    #[serde(rename = "USDC")]
    pub usdc: Decimal,
}

/// Response from GET /me.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub wallet: Wallet,
    pub username: String,
    pub api_version: String,
    pub date_joined: String,
    pub active_country: String,
    pub public_api_real_money_enabled: bool,
    pub wagers_count_play_money: u64,
    pub wagers_count_real_money: u64,
    pub residence_country: String,
}

/// Parent of a category: either a bare ID or the nested category.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryParent {
    Id(u64),
    Category(Box<Category>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub parent: Option<CategoryParent>,
    pub in_leaderboard: bool,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub page_size: u64,
    pub offset: u64,
}

/// One page of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub pagination: Pagination,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seo {
    pub seo_title_en: String,
    pub seo_title_pt_br: String,
    pub seo_description_en: String,
    pub seo_description_pt_br: String,
    pub seo_image: Option<String>,
    pub seo_image_alt_en: Option<String>,
    pub seo_image_alt_pt_br: Option<String>,
}

/// Response from GET /categories/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub tree: Vec<Category>,
    pub children: Vec<Category>,
    pub seo: Seo,
}

/// A main child category with its wager total.
#[derive(Debug, Clone, Deserialize)]
pub struct MainChildCategory {
    #[serde(flatten)]
    pub category: Category,
    pub wagers_total: Decimal,
}

/// Element of GET /categories/root_and_main_children.
#[derive(Debug, Clone, Deserialize)]
pub struct RootCategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub children: Vec<MainChildCategory>,
}

/// Outcome price per currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Price {
    #[serde(rename = "OOM")]
    pub oom: Decimal,
    #[serde(rename = "BTC")]
    pub btc: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Outcome {
    pub id: u64,
    pub title: String,
    pub disabled: bool,
    pub price: Price,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Market {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub status_display: String,
    pub tags: Vec<Tag>,
    pub bet_end_date: String,
    pub event_start_date: Option<String>,
    pub event_end_date: Option<String>,
    pub resolution: Option<String>,
    pub resolve_date: Option<String>,
    pub real_currency_available: bool,
    pub is_binary: bool,
    pub wagers_count: u64,
    pub wagers_count_canonical: u64,
    pub volume_play_money: Decimal,
    pub volume_real_money: Decimal,
    pub is_following: bool,
    pub category: Category,
    pub outcomes: Vec<Outcome>,
    pub last_wager_real_money: Decimal,
    pub last_wager_play_money: Decimal,
    pub relevance: Option<Decimal>,
    pub hot: bool,
}

/// Response from GET /markets/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDetail {
    #[serde(flatten)]
    pub market: Market,
    pub description: String,
}

/// Element of GET /markets/{id}/related_markets.
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedMarket {
    pub id: u64,
    pub title: String,
    pub wagers_count: u64,
    pub wagers_count_canonical: u64,
    pub volume_play_money: Decimal,
    pub volume_real_money: Decimal,
    pub bet_end_date: String,
    pub event_start_date: Option<String>,
}

/// A purchase or sale leg of a wager.
#[derive(Debug, Clone, Deserialize)]
pub struct WagerAction {
    pub price: Decimal,
    pub action: String,
    pub amount: Decimal,
    pub shares: Decimal,
    pub created: String,
    pub currency: String,
    pub position: String,
}

/// Response from GET /bets/{id}, POST /bets/.
#[derive(Debug, Clone, Deserialize)]
pub struct Bet {
    pub id: u64,
    pub status: String,
    pub status_display: String,
    pub user: User,
    pub question: MarketDetail,
    pub position: String,
    pub active_purchases: Vec<WagerAction>,
    pub last_action: WagerAction,
    pub outcome: Outcome,
}

/// Response from GET /bets/{id}/get_partial_amount_on_sell.
#[derive(Debug, Clone, Deserialize)]
pub struct PartialSellQuote {
    pub amount: Decimal,
    pub shares: Decimal,
    pub price: Decimal,
}

/// Latest exchange rates for one base currency.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyRates {
    /// Rate per quote currency symbol (e.g. "BTC", "USD").
    pub rates: HashMap<String, Decimal>,
    pub currency: String,
    pub last_update: String,
}

/// Response from PATCH /bets/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct SellResponse {
    pub amount: Decimal,
    pub shares: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_parent_forms() {
        let by_id: Category = serde_json::from_str(
            r#"{"id":2,"title":"Soccer","slug":"soccer","parent":1,"in_leaderboard":true,"icon":null}"#,
        )
        .unwrap();
        assert!(matches!(by_id.parent, Some(CategoryParent::Id(1))));

        let nested: Category = serde_json::from_str(
            r#"{"id":2,"title":"Soccer","slug":"soccer","in_leaderboard":false,"icon":"x.png",
                "parent":{"id":1,"title":"Sports","slug":"sports","parent":null,"in_leaderboard":true,"icon":null}}"#,
        )
        .unwrap();
        match nested.parent {
            Some(CategoryParent::Category(parent)) => assert_eq!(parent.slug, "sports"),
            other => panic!("unexpected parent: {other:?}"),
        }
    }

    #[test]
    fn test_paginated_categories() {
        let page: Paginated<Category> = serde_json::from_str(
            r#"{"pagination":{"total":1,"next":null,"previous":null,"page_size":20,"offset":0},
                "results":[{"id":1,"title":"Sports","slug":"sports","parent":null,"in_leaderboard":true,"icon":null}]}"#,
        )
        .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.results[0].title, "Sports");
    }

    #[test]
    fn test_rates_and_quote_decimals() {
        let rates: Vec<CurrencyRates> = serde_json::from_str(
            r#"[{"rates":{"BTC":0.0000153,"USD":1.0},"currency":"USD","last_update":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(rates[0].rates["BTC"], dec!(0.0000153));

        let quote: PartialSellQuote =
            serde_json::from_str(r#"{"amount":10.5,"shares":21,"price":0.5}"#).unwrap();
        assert_eq!(quote.shares, dec!(21));
        assert_eq!(quote.price, dec!(0.5));
    }
}
