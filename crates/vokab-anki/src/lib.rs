mod client;
mod ids;
mod package;
mod source;
mod template;

pub use client::AnkiConnectClient;
pub use ids::{deck_id, model_id, stable_id};
pub use package::{Deck, Note};
pub use source::{deck_from_csv, deck_name, read_rows};
pub use template::{FIELDS, NoteModel};

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Build `<deck>.apkg` in `out_dir` from a word CSV and return its path
pub fn export_csv(csv_path: &Path, out_dir: &Path) -> Result<PathBuf> {
    if !csv_path.exists() {
        anyhow::bail!("File '{}' does not exist.", csv_path.display());
    }

    let deck = deck_from_csv(csv_path)?;
    let output = out_dir.join(format!("{}.apkg", deck.name));
    deck.write_package(&output)?;

    tracing::info!(
        "Anki deck created: {} ({} notes)",
        output.display(),
        deck.notes.len()
    );
    Ok(output)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    pub added: usize,
    /// Notes Anki refused, typically already present
    pub rejected: usize,
}

/// Send a deck to a running Anki, creating its deck and model when missing
pub async fn push_deck(client: &AnkiConnectClient, deck: &Deck) -> Result<PushReport> {
    let version = client.check_connection().await?;
    tracing::debug!("AnkiConnect version {}", version);

    if !client.deck_names().await?.contains(&deck.name) {
        tracing::info!("Creating deck {}", deck.name);
        client.create_deck(&deck.name).await?;
    }

    if !client.model_names().await?.contains(&deck.model.name) {
        tracing::info!("Creating note type {}", deck.model.name);
        client.create_model(&deck.model).await?;
    }

    let ids = client.add_notes(&deck.name, &deck.model, &deck.notes).await?;
    let added = ids.iter().filter(|id| id.is_some()).count();
    let report = PushReport {
        added,
        rejected: ids.len() - added,
    };

    tracing::info!(
        "Pushed {} notes to {} ({} rejected)",
        report.added,
        deck.name,
        report.rejected
    );
    Ok(report)
}
