use clap::Parser;
use etsy::{EtsyClient, Listing};

/// Fetch one listing and print it.
#[derive(Parser)]
struct Args {
    /// Listing id
    id: u64,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();
    let client = EtsyClient::from_env().unwrap();
    let listing = Listing::find(&client, args.id, &[]).await.unwrap();
    println!("{listing:#?}");
    if let Some(created) = listing.created_at() {
        println!("created {created}");
    }
}
