use std::{env, fs};

use anyhow::Context;
use htmldeck_tools::{build_deck, parse_slides, slides_to_markdown, DeckConfig, RecordingWriter};

// Usage: cargo run --example html_to_deck -- <input.html> [config.json]
fn main() -> anyhow::Result<()> {
    // This reads the RUST_LOG environment variable to configure logging levels
    env_logger::builder()
        .filter_level(log::LevelFilter::Info) // Set default level
        .parse_default_env() // Allow RUST_LOG override
        .init();

    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "tests/fixtures/quarterly_review.html".to_string());
    let config = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            DeckConfig::from_json_str(&json)?
        }
        None => DeckConfig::default(),
    };

    log::info!("Loading document from {}...", input);
    let html = fs::read_to_string(&input).with_context(|| format!("reading {}", input))?;

    let slides = parse_slides(&html, &config.extraction)?;
    println!("{}", slides_to_markdown(&slides));

    let mut writer = RecordingWriter::new();
    let layout = build_deck(&html, &config, &mut writer)?;
    log::info!(
        "{} logical slide(s) became {} physical page(s)",
        slides.len(),
        layout.page_count()
    );

    let output_path = "deck_commands.json";
    fs::write(output_path, writer.to_json()?)
        .with_context(|| format!("writing {}", output_path))?;
    log::info!("Draw commands saved to {}", output_path);
    Ok(())
}
