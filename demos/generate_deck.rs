use std::env;
use std::fs;

use dotenvy::dotenv;

use deckgen_tools::{Deck, DeckApiClient, DeckConfig, DeckView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // A missing .env is fine; the defaults point at a local backend.
    if dotenv().is_err() {
        log::debug!("No .env file found");
    }

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --example generate_deck -- <TOPIC> <TEMPLATE_ID> [SLIDE_COUNT]");
        eprintln!("Set DECKGEN_API_URL to point at the generation backend.");
        return Ok(());
    }

    let config = DeckConfig::from_env()?;
    let slide_count = match args.get(3) {
        Some(raw) => raw.parse()?,
        None => config.default_slide_count,
    };
    let client = DeckApiClient::from_config(&config);
    let mut deck = Deck::with_config(config);

    println!("Requesting slides from {}...", client.base_url());
    let request = deck.begin_generate(&args[1], Some(&args[2]), slide_count)?;
    let outcome = client.generate(&request).await;
    deck.finish_generate(outcome)?;

    for thumbnail in deck.thumbnails() {
        let status = if thumbnail.markup.is_some() { "ok" } else { "unrenderable" };
        println!("  slide {}: {} ({})", thumbnail.index + 1, deck.slides()[thumbnail.index].layout, status);
    }
    if let DeckView::Slide { markup, .. } = deck.view()? {
        fs::write("first_slide.html", markup)?;
        println!("Wrote first_slide.html");
    }

    let request = deck.begin_save()?;
    let outcome = client.save(&request).await;
    deck.finish_save(outcome)?;
    if let Some(id) = deck.presentation_id() {
        println!("Saved as presentation {}", id);
    }

    let request = deck.begin_export()?;
    let outcome = client.export(&request).await;
    let download = deck.finish_export(outcome)?;
    fs::write(&download.file_name, &download.bytes)?;
    println!("Exported {} ({} bytes)", download.file_name, download.bytes.len());

    Ok(())
}
