use clap::Parser;
use etsy::{EtsyClient, Listing};

/// Print a shop's listings in a given state.
#[derive(Parser)]
struct Args {
    /// Shop id or shop name
    shop_id: String,
    /// active, expired, inactive, sold_out or featured
    #[arg(long)]
    state: Option<String>,
    #[arg(long, default_value_t = 25)]
    limit: u32,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();
    let client = EtsyClient::from_env().unwrap();
    let limit = args.limit.to_string();
    let listings = Listing::find_all_by_shop_id(
        &client,
        &args.shop_id,
        args.state.as_deref(),
        &[("limit", &limit)],
    )
    .await
    .unwrap();
    for listing in &listings {
        println!(
            "{:>12}  {:>10}  {}",
            listing.id,
            listing.price.as_deref().unwrap_or("-"),
            listing.title.as_deref().unwrap_or("(untitled)")
        );
    }
}
