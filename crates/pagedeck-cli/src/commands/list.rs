use std::path::Path;

use anyhow::{Context, Result};

use pagedeck_core::{AppConfig, Deck};

pub fn run(config: &AppConfig, path: &Path, json: bool) -> Result<()> {
    let deck = Deck::load(path, &config.markers.section_delimiter)
        .with_context(|| format!("loading deck {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
        return Ok(());
    }

    println!("{} ({} panels):\n", deck.title, deck.len());

    for (index, panel) in deck.panels().iter().enumerate() {
        let title = panel.title.as_deref().unwrap_or("(no title)");
        let lines = panel.body.lines().count();
        println!("  {:>3}. {} - {} [{} lines]", index + 1, panel.id, title, lines);
    }

    Ok(())
}
