//! Futuur REST API client.
//!
//! This crate provides a typed client for the Futuur prediction-market API with:
//!
//! - **Request signing**: every call carries `Key`, `Timestamp` and `HMAC`
//!   headers computed over the merged query and body parameters
//! - **Failure logging**: transport and HTTP errors are logged with the
//!   request that caused them and returned unchanged
//! - **Typed endpoints**: account, categories, markets and bets
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::Credentials;
//! use futuur_rest::{FutuurClient, PaginationParams};
//!
//! let credentials = Credentials::from_env()?;
//! let client = FutuurClient::new(credentials)?;
//!
//! let me = client.me().await?;
//! let markets = client.market_list(None).await?;
//! let categories = client.category_list(Some(&PaginationParams::page(5, 0))).await?;
//! ```

mod client;
mod config;
mod error;
mod params;
mod responses;
mod signing;

pub use client::FutuurClient;
pub use config::{ClientConfig, BASE_URL, BASE_URL_ENV, DEFAULT_TIMEOUT_MS, TIMEOUT_ENV};
pub use error::FutuurError;
pub use params::{
    BettingListParams, CurrencyMode, MarketListParams, MarketOrdering, PaginationParams,
    PartialSellParams, Position, PurchaseBody, RootCategoriesAndMainChildrenParams, SellBody,
};
pub use responses::{
    Bet, Category, CategoryDetail, CategoryParent, CurrencyRates, MainChildCategory, Market,
    MarketDetail, Outcome, Paginated, Pagination, PartialSellQuote, Price, RelatedMarket,
    RootCategoryWithChildren, SellResponse, Seo, Tag, User, Wallet, WagerAction,
};
pub use signing::SigningMiddleware;
