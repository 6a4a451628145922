use serde::{Deserialize, Serialize};

use crate::{Error, EtsyClient};

/// One image attached to a listing, in the API's fixed thumbnail sizes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListingImage {
    #[serde(rename = "listing_image_id")]
    pub id: u64,
    pub listing_id: Option<u64>,
    pub rank: Option<u32>,
    pub hue: Option<i32>,
    pub saturation: Option<i32>,
    pub brightness: Option<i32>,
    pub is_black_and_white: Option<bool>,
    pub url_75x75: Option<String>,
    pub url_170x135: Option<String>,
    #[serde(rename = "url_570xN")]
    pub url_570xn: Option<String>,
    pub url_fullxfull: Option<String>,
}

impl ListingImage {
    pub async fn find_all_by_listing_id(
        client: &EtsyClient,
        listing_id: u64,
        params: &[(&str, &str)],
    ) -> Result<Vec<ListingImage>, Error> {
        client
            .get(&format!("listings/{listing_id}/images"), params)
            .await
    }
}
