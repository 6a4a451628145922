use serde::{Deserialize, Serialize};

use crate::{Error, EtsyClient};

/// A sale record from a shop's transaction history.
///
/// `listing_id` is the one field the sold-out listings reconstruction
/// relies on, so it is required; everything else may be stripped away by
/// a `fields` filter.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: Option<u64>,
    pub listing_id: u64,
    pub title: Option<String>,
    pub buyer_user_id: Option<u64>,
    pub seller_user_id: Option<u64>,
    /// Unix seconds.
    #[serde(rename = "creation_tsz")]
    pub created: Option<i64>,
    #[serde(rename = "paid_tsz")]
    pub paid: Option<i64>,
    #[serde(rename = "shipped_tsz")]
    pub shipped: Option<i64>,
    pub price: Option<String>,
    #[serde(rename = "currency_code")]
    pub currency: Option<String>,
    pub quantity: Option<u32>,
    pub image_listing_id: Option<u64>,
}

impl Transaction {
    pub async fn find_all_by_shop_id(
        client: &EtsyClient,
        shop_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Transaction>, Error> {
        client
            .get(&format!("shops/{shop_id}/transactions"), params)
            .await
    }
}
