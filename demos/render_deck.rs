use std::env;
use std::fs;

use anyhow::Context;
use deckgen_tools::{models::api::GenerateResponse, render_slide};

fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example render_deck -- <GENERATED_JSON> [TEMPLATE_ID]");
        return Ok(());
    }
    let json_path = &args[1];

    log::info!("Loading generated slides from {}...", json_path);
    let json_string =
        fs::read_to_string(json_path).with_context(|| format!("Failed to read {}", json_path))?;
    let response: GenerateResponse =
        serde_json::from_str(&json_string).context("Failed to deserialize generated slides")?;

    let template_id = args
        .get(2)
        .cloned()
        .or_else(|| response.template.clone())
        .unwrap_or_else(|| "corporate".to_string());
    log::info!(
        "Rendering {} slides with template '{}'",
        response.slides.len(),
        template_id
    );

    for (i, slide) in response.slides.iter().enumerate() {
        match render_slide(slide, &template_id) {
            Ok(html) => {
                let output_path = format!("slide_{}.html", i + 1);
                fs::write(&output_path, html)
                    .with_context(|| format!("Failed to write {}", output_path))?;
                log::info!("Saved slide {} to {}", i + 1, output_path);
            }
            Err(e) => log::error!("Skipping slide {}: {}", i + 1, e),
        }
    }

    Ok(())
}
