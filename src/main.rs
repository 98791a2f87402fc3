use actix_web::web;
use clap::Parser;
use tracing::info;

mod routes;
mod server;
mod store;

use store::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "localhost")]
    host: String,
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
    /// Number of HTTP worker threads (defaults to one per core)
    #[arg(short, long)]
    workers: Option<usize>,
    /// Initial catalog entry, may be repeated
    #[arg(long = "item", value_name = "NAME=PRICE", value_parser = parse_item)]
    items: Vec<(String, Dollars)>,
    /// Start with no items instead of the default catalog
    #[arg(long, conflicts_with = "items")]
    empty: bool,
}

impl Args {
    fn catalog(&self) -> Vec<(String, Dollars)> {
        if self.empty {
            Vec::new()
        } else if self.items.is_empty() {
            vec![
                ("shoes".to_string(), Dollars::new(50.0)),
                ("socks".to_string(), Dollars::new(5.0)),
            ]
        } else {
            self.items.clone()
        }
    }
}

fn parse_item(arg: &str) -> Result<(String, Dollars), String> {
    let (name, price) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PRICE, got {:?}", arg))?;
    let price = price.parse::<Dollars>().map_err(|e| e.to_string())?;
    Ok((name.to_string(), price))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let catalog = args.catalog();
    info!("Starting with {} items", catalog.len());
    let store = web::Data::new(Store::with_records(catalog));

    let (server, addrs) = server::bind(store, &args.host, args.port, args.workers)?;
    for addr in addrs {
        info!("Listening on {}", addr);
    }

    server.await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let args = Args::parse_from(["price-store"]);
        assert_eq!(args.port, 8000);
        assert_eq!(args.host, "localhost");
        let mut catalog = args.catalog();
        catalog.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            catalog,
            vec![
                ("shoes".to_string(), Dollars::new(50.0)),
                ("socks".to_string(), Dollars::new(5.0)),
            ]
        );
    }

    #[test]
    fn test_items_replace_default_catalog() {
        let args = Args::parse_from(["price-store", "--item", "hats=12.5", "--item", "belts=3"]);
        assert_eq!(
            args.catalog(),
            vec![
                ("hats".to_string(), Dollars::new(12.5)),
                ("belts".to_string(), Dollars::new(3.0)),
            ]
        );
    }

    #[test]
    fn test_empty_catalog() {
        let args = Args::parse_from(["price-store", "--empty", "-p", "9000"]);
        assert_eq!(args.port, 9000);
        assert!(args.catalog().is_empty());
    }

    #[test]
    fn test_bad_item_rejected() {
        assert!(Args::try_parse_from(["price-store", "--item", "hats"]).is_err());
        assert!(Args::try_parse_from(["price-store", "--item", "hats=cheap"]).is_err());
    }
}
