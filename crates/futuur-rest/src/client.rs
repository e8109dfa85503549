//! Futuur REST API client.

use crate::config::ClientConfig;
use crate::error::FutuurError;
use crate::params::{
    BettingListParams, MarketListParams, PaginationParams, PartialSellParams, PurchaseBody,
    RootCategoriesAndMainChildrenParams, SellBody,
};
use crate::responses::{
    Bet, Category, CategoryDetail, CurrencyRates, Market, MarketDetail, Paginated,
    PartialSellQuote, RelatedMarket, RootCategoryWithChildren, SellResponse, User,
};
use crate::signing::SigningMiddleware;
use auth::{Clock, Credentials, SystemClock};
use rest_client::{FailureLogger, RequestDescriptor, RestClient};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Futuur REST API client.
///
/// Every request is signed with the client's credentials; failures are
/// logged and returned without retry. The client is cheap to share across
/// tasks: signing state is read-only.
pub struct FutuurClient {
    client: RestClient,
    config: ClientConfig,
    public_key: String,
}

impl FutuurClient {
    /// Create a client against the production API with the default timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, FutuurError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client from `FUTUUR_*` environment variables.
    ///
    /// # Errors
    /// Returns `FutuurError::Auth` if the credentials are missing or empty.
    pub fn from_env() -> Result<Self, FutuurError> {
        Self::with_config(Credentials::from_env()?, ClientConfig::from_env())
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, FutuurError> {
        Self::with_clock(credentials, config, Arc::new(SystemClock))
    }

    /// Create a client whose signatures use timestamps from `clock`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_clock(
        credentials: Credentials,
        config: ClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FutuurError> {
        let public_key = credentials.public_key().to_string();
        let client = RestClient::new(&config.base_url, config.timeout)?
            .with_middleware(SigningMiddleware::with_clock(credentials, clock))
            .with_middleware(FailureLogger);

        tracing::debug!(
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            "Futuur client created"
        );

        Ok(Self {
            client,
            config,
            public_key,
        })
    }

    /// Get the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the public key (for logging/debugging).
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign and send an arbitrary request.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T, FutuurError> {
        Ok(self.client.execute(request).await?)
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Information about the authenticated user.
    ///
    /// GET /me
    pub async fn me(&self) -> Result<User, FutuurError> {
        self.send(RequestDescriptor::get("/me")).await
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// List categories.
    ///
    /// GET /categories
    pub async fn category_list(
        &self,
        params: Option<&PaginationParams>,
    ) -> Result<Paginated<Category>, FutuurError> {
        self.send(RequestDescriptor::get("/categories").query(&params)?)
            .await
    }

    /// Category detail.
    ///
    /// GET /categories/{id}
    pub async fn category_detail(&self, id: u64) -> Result<CategoryDetail, FutuurError> {
        self.send(RequestDescriptor::get(format!("/categories/{id}")))
            .await
    }

    /// Root categories.
    ///
    /// GET /categories/root
    pub async fn root_categories(&self) -> Result<Vec<Category>, FutuurError> {
        self.send(RequestDescriptor::get("/categories/root")).await
    }

    /// Root categories with their main children.
    ///
    /// GET /categories/root_and_main_children
    pub async fn root_categories_and_main_children(
        &self,
        params: Option<&RootCategoriesAndMainChildrenParams>,
    ) -> Result<Vec<RootCategoryWithChildren>, FutuurError> {
        self.send(RequestDescriptor::get("/categories/root_and_main_children").query(&params)?)
            .await
    }

    // ========================================================================
    // Markets
    // ========================================================================

    /// List markets.
    ///
    /// GET /markets
    pub async fn market_list(
        &self,
        params: Option<&MarketListParams>,
    ) -> Result<Paginated<Market>, FutuurError> {
        self.send(RequestDescriptor::get("/markets").query(&params)?)
            .await
    }

    /// Market detail.
    ///
    /// GET /markets/{id}
    pub async fn market_detail(&self, id: u64) -> Result<MarketDetail, FutuurError> {
        self.send(RequestDescriptor::get(format!("/markets/{id}")))
            .await
    }

    /// Markets related to a market.
    ///
    /// GET /markets/{id}/related_markets
    pub async fn related_markets(&self, id: u64) -> Result<Vec<RelatedMarket>, FutuurError> {
        self.send(RequestDescriptor::get(format!("/markets/{id}/related_markets")))
            .await
    }

    // ========================================================================
    // Bets
    // ========================================================================

    /// List your bets.
    ///
    /// GET /bets
    pub async fn betting_list(
        &self,
        params: &BettingListParams,
    ) -> Result<Paginated<Bet>, FutuurError> {
        self.send(RequestDescriptor::get("/bets").query(params)?)
            .await
    }

    /// Bet detail.
    ///
    /// GET /bets/{id}
    pub async fn bet_detail(&self, id: u64) -> Result<Bet, FutuurError> {
        self.send(RequestDescriptor::get(format!("/bets/{id}"))).await
    }

    /// Quote for selling part of a position.
    ///
    /// GET /bets/{id}/get_partial_amount_on_sell
    pub async fn get_partial_amount_on_sell(
        &self,
        id: u64,
        params: Option<&PartialSellParams>,
    ) -> Result<PartialSellQuote, FutuurError> {
        self.send(
            RequestDescriptor::get(format!("/bets/{id}/get_partial_amount_on_sell"))
                .query(&params)?,
        )
        .await
    }

    /// Latest exchange rates.
    ///
    /// GET /bets/rates
    pub async fn current_rates(&self) -> Result<Vec<CurrencyRates>, FutuurError> {
        self.send(RequestDescriptor::get("/bets/rates")).await
    }

    /// Buy an outcome position.
    ///
    /// POST /bets/
    pub async fn purchase(&self, body: &PurchaseBody) -> Result<Bet, FutuurError> {
        tracing::info!(
            outcome = body.outcome,
            shares = %body.shares,
            position = ?body.position,
            "Placing purchase"
        );

        self.send(RequestDescriptor::post("/bets/").json(body)?)
            .await
    }

    /// Sell a position, entirely when `body` is `None`.
    ///
    /// PATCH /bets/{id}
    pub async fn sell(&self, id: u64, body: Option<&SellBody>) -> Result<SellResponse, FutuurError> {
        let mut request = RequestDescriptor::patch(format!("/bets/{id}"));
        if let Some(body) = body {
            request = request.json(body)?;
        }

        tracing::info!(bet_id = id, "Selling position");
        self.send(request).await
    }
}

impl std::fmt::Debug for FutuurClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FutuurClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("public_key", &self.public_key)
            .finish()
    }
}
