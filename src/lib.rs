//! Client bindings for the Etsy v2 REST API.
//!
//! Covers the listing resource and its satellites: singular and batch
//! listing lookup, shop listing queries (including sold-out listings
//! reconstructed from transaction history), listing images and shop
//! transactions. Every call needs a v2 `api_key`.

pub mod models;

pub use models::{Listing, ListingImage, ShopListingState, Transaction};

use log::info;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP Error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no listing ids were given")]
    NoIds,
    #[error("invalid shop listing state {0:?}: must be one of active, expired, inactive, sold_out, featured")]
    InvalidState(String),
    #[error("configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// The standard v2 envelope. `results` holds either a single record or an
/// array of records depending on the endpoint; `count`, `params` and
/// `type` also come back but nothing here reads them.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    results: Option<OneOrMany<T>>,
}

impl<T> ApiResponse<T> {
    fn into_results(self) -> Vec<T> {
        match self.results {
            None => Vec::new(),
            Some(OneOrMany::One(record)) => vec![record],
            Some(OneOrMany::Many(records)) => records,
        }
    }
}

pub struct EtsyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl EtsyClient {
    const ETSY_BASE_URL: &'static str = "https://openapi.etsy.com/v2";
    const USER_AGENT: &'static str = concat!("etsy-rs/", env!("CARGO_PKG_VERSION"));

    pub fn new(api_key: impl ToString) -> Self {
        Self::with_base_url(api_key, Self::ETSY_BASE_URL)
    }

    /// Client against an alternate host, e.g. a sandbox or a local stub.
    pub fn with_base_url(api_key: impl ToString, base_url: impl ToString) -> Self {
        let client = Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()
            .unwrap();

        EtsyClient {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
        }
    }

    /// Reads `ETSY_API_KEY`, plus `ETSY_API_URL` to override the host.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("ETSY_API_KEY")
            .map_err(|_| Error::Config("ETSY_API_KEY is not set".to_string()))?;
        match std::env::var("ETSY_API_URL") {
            Ok(base_url) => Ok(Self::with_base_url(api_key, base_url)),
            Err(_) => Ok(Self::new(api_key)),
        }
    }

    /// Performs one GET against `<base>/<path>` and hydrates every record
    /// in the response envelope. `params` are appended to the query string
    /// in order, untouched; the `api_key` parameter is always added.
    ///
    /// This is the raw fetch primitive the resource finders are built on;
    /// it also works for endpoints the crate has no model for, given a
    /// matching `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let mut url = self.request_url(path, params)?;
        info!("GET {url}");
        // the key is appended after the log line so it never lands in logs
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }
        let body = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_results())
    }

    fn request_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))?;
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}
