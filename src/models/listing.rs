use chrono::{DateTime, Utc};
use itertools::Itertools;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::image::ListingImage;
use crate::models::transaction::Transaction;
use crate::{Error, EtsyClient};

/// A single marketplace listing, hydrated from one v2 payload record.
///
/// Everything except `listing_id` is optional in the payload: endpoints
/// routinely return partial records (e.g. under a `fields` filter), and
/// missing keys hydrate as `None` or an empty collection.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Listing {
    #[serde(rename = "listing_id")]
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "views")]
    pub view_count: Option<u64>,
    /// Unix seconds.
    #[serde(rename = "creation_tsz")]
    pub created: Option<i64>,
    #[serde(rename = "ending_tsz")]
    pub ending: Option<i64>,
    #[serde(rename = "currency_code")]
    pub currency: Option<String>,
    /// Lifecycle state as reported by the API; compare through the
    /// `is_*` predicates.
    pub state: Option<String>,
    pub url: Option<String>,
    /// Decimal amount carried verbatim as the API's string, e.g. "24.50".
    pub price: Option<String>,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(rename = "Images", skip_serializing_if = "Option::is_none")]
    inline_images: Option<Vec<ListingImage>>,
    #[serde(skip)]
    images: OnceCell<Vec<ListingImage>>,
}

/// States accepted by [`Listing::find_all_by_shop_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopListingState {
    Active,
    Expired,
    Inactive,
    SoldOut,
    Featured,
}

impl ShopListingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopListingState::Active => "active",
            ShopListingState::Expired => "expired",
            ShopListingState::Inactive => "inactive",
            ShopListingState::SoldOut => "sold_out",
            ShopListingState::Featured => "featured",
        }
    }
}

impl FromStr for ShopListingState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "active" => Ok(ShopListingState::Active),
            "expired" => Ok(ShopListingState::Expired),
            "inactive" => Ok(ShopListingState::Inactive),
            "sold_out" => Ok(ShopListingState::SoldOut),
            "featured" => Ok(ShopListingState::Featured),
            other => Err(Error::InvalidState(other.to_string())),
        }
    }
}

impl Listing {
    /// One listing by id. The request is the batch endpoint with a single
    /// id; an id the API resolves to nothing is `Error::NotFound`.
    pub async fn find(
        client: &EtsyClient,
        id: u64,
        params: &[(&str, &str)],
    ) -> Result<Listing, Error> {
        Self::find_many(client, &[id], params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("listing {id}")))
    }

    /// Several listings in one call, ids comma-joined into the path. The
    /// result keeps whatever order the API answered with.
    pub async fn find_many(
        client: &EtsyClient,
        ids: &[u64],
        params: &[(&str, &str)],
    ) -> Result<Vec<Listing>, Error> {
        if ids.is_empty() {
            return Err(Error::NoIds);
        }
        client
            .get(&format!("listings/{}", ids.iter().join(",")), params)
            .await
    }

    /// Listings for one shop, filtered by state. `shop_id` is the numeric
    /// shop id or the shop name; `state` defaults to `active` and must
    /// name one of the [`ShopListingState`] values.
    ///
    /// The v2 API has no sold-out listings endpoint, so `sold_out` is
    /// answered by pulling the shop's transaction history (restricted to
    /// `fields=listing_id`) and fetching those listings in one batch. A
    /// listing with several sales shows up once per sale.
    pub async fn find_all_by_shop_id(
        client: &EtsyClient,
        shop_id: &str,
        state: Option<&str>,
        params: &[(&str, &str)],
    ) -> Result<Vec<Listing>, Error> {
        let state = match state {
            Some(raw) => raw.parse()?,
            None => ShopListingState::Active,
        };
        if state == ShopListingState::SoldOut {
            return Self::find_all_sold_out(client, shop_id, params).await;
        }
        client
            .get(
                &format!("shops/{shop_id}/listings/{}", state.as_str()),
                params,
            )
            .await
    }

    async fn find_all_sold_out(
        client: &EtsyClient,
        shop_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Listing>, Error> {
        // a caller fields selection is replaced for this call only, the
        // reconstruction needs listing_id in every record
        let mut transaction_params = params.to_vec();
        transaction_params.retain(|(key, _)| *key != "fields");
        transaction_params.push(("fields", "listing_id"));
        let transactions =
            Transaction::find_all_by_shop_id(client, shop_id, &transaction_params).await?;
        // ids stay duplicated when a listing sold more than once
        let ids: Vec<u64> = transactions.iter().map(|t| t.listing_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Self::find_many(client, &ids, params).await
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn ending_at(&self) -> Option<DateTime<Utc>> {
        self.ending.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    // state comparison strips underscores on both sides, so "sold_out"
    // and "soldout" payloads are the same state
    fn state_is(&self, normalized: &str) -> bool {
        self.state
            .as_deref()
            .map(|state| state.replace('_', "") == normalized)
            .unwrap_or(false)
    }

    pub fn is_active(&self) -> bool {
        self.state_is("active")
    }

    pub fn is_removed(&self) -> bool {
        self.state_is("removed")
    }

    pub fn is_sold_out(&self) -> bool {
        self.state_is("soldout")
    }

    pub fn is_expired(&self) -> bool {
        self.state_is("expired")
    }

    pub fn is_alchemy(&self) -> bool {
        self.state_is("alchemy")
    }

    /// Images attached to this listing, fetched on first use and cached
    /// for the lifetime of the value. Hydration payloads that already
    /// carry an inline `Images` array (the `includes=Images` shape) are
    /// adopted without a request.
    pub async fn images(&self, client: &EtsyClient) -> Result<&[ListingImage], Error> {
        if let Some(images) = self.images.get() {
            return Ok(images);
        }
        let fetched = match &self.inline_images {
            Some(inline) => inline.clone(),
            None => ListingImage::find_all_by_listing_id(client, self.id, &[]).await?,
        };
        Ok(self.images.get_or_init(|| fetched))
    }

    /// The first image, or `None` for a listing without any.
    pub async fn image(&self, client: &EtsyClient) -> Result<Option<&ListingImage>, Error> {
        Ok(self.images(client).await?.first())
    }
}
