use vokab_types::WordMap;

use crate::Translator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub translated: usize,
    pub failed: usize,
    /// Entries that already had a translation
    pub skipped: usize,
}

/// Translate every entry with an empty translation, one request at a time.
/// A failed word keeps its empty translation and the batch moves on.
pub async fn fill_missing<T>(translator: &T, words: &mut WordMap, from: &str, to: &str) -> FillReport
where
    T: Translator + ?Sized,
{
    let mut report = FillReport::default();

    for (word, entry) in words.iter_mut() {
        if entry.is_translated() {
            report.skipped += 1;
            continue;
        }

        match translator
            .translate(word, from.to_string(), to.to_string())
            .await
        {
            Ok(translation) => {
                tracing::info!("Translation {} - {}", word, translation.text);
                entry.translation = translation.text;
                report.translated += 1;
            }
            Err(e) => {
                tracing::error!("Error translating {}: {}", word, e);
                report.failed += 1;
            }
        }
    }

    report
}
