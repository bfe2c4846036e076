//! Walk the public match list page by page.
//!
//! ```sh
//! COURTSIDE_URL=http://localhost:8000 cargo run --example browse_matches
//! ```

use std::sync::Arc;

use anyhow::Result;

use courtside_client::{
    ClientConfig, CourtsideApi, ListController, MatchPageSource, TracingNotify,
};
use shared::request::MatchFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url =
        std::env::var("COURTSIDE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let config = ClientConfig::new(base_url);
    let api = Arc::new(CourtsideApi::from_config(&config)?);

    let list = ListController::new(MatchPageSource::new(api), Arc::new(TracingNotify));
    list.load_first_page(MatchFilter::anonymous(false)).await;

    let mut pages = 1;
    while list.has_more().await && pages < 5 {
        list.load_next_page().await;
        pages += 1;
    }

    for competition in list.items().await {
        let score = competition
            .participants
            .iter()
            .map(|p| format!("{} {}", p.name, p.score))
            .collect::<Vec<_>>()
            .join(" : ");
        println!(
            "#{:<5} {:<30} {:<10} {}",
            competition.id, competition.name, competition.sport, score
        );
    }

    Ok(())
}
