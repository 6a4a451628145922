pub mod image;
pub mod listing;
pub mod transaction;

pub use image::ListingImage;
pub use listing::{Listing, ShopListingState};
pub use transaction::Transaction;
