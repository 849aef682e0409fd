use std::path::Path;

use anyhow::{Context, Result};

use crate::package::{Deck, Note};

/// Deck name for a CSV file: its stem
pub fn deck_name(csv_path: &Path) -> String {
    csv_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string())
}

/// Read `word, translation, sentence` rows. Rows with fewer than three
/// fields are skipped; extra fields are ignored.
pub fn read_rows(csv_path: &Path) -> Result<Vec<[String; 3]>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read {}", csv_path.display()))?;
        if record.len() < 3 {
            tracing::debug!("Skipping short row: {:?}", record);
            continue;
        }
        rows.push([
            record[0].to_string(),
            record[1].to_string(),
            record[2].to_string(),
        ]);
    }

    Ok(rows)
}

/// Build a deck named after the CSV file with one note per row
pub fn deck_from_csv(csv_path: &Path) -> Result<Deck> {
    let mut deck = Deck::new(&deck_name(csv_path));
    for row in read_rows(csv_path)? {
        deck.add_note(Note::new(row));
    }
    Ok(deck)
}
