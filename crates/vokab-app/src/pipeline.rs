//! Stage wiring: text → candidate words → review → translation.
//!
//! Each stage takes its inputs explicitly so the terminal, OCR and network
//! edges can be swapped out in tests.

use std::fs;
use std::path::Path;

use anyhow::Context;
use vokab_config::Config;
use vokab_config::translator::TranslatorConfig;
use vokab_core::classify::{ClassifyOutcome, DecisionSource, Prompter, classify};
use vokab_core::dictionary::{Dictionary, WordListDictionary};
use vokab_core::extract::WordExtractor;
use vokab_core::store::{
    ClassificationStore, KnownSource, StorePaths, load_unknown_words, save_unknown_words,
    scan_sidecars,
};
use vokab_translator::{FillReport, Translator, fill_missing};
use vokab_types::WordMap;

/// Fail early on a missing input file
pub fn require_file(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("File '{}' does not exist.", path.display());
    }
    Ok(())
}

/// Dictionary words from `text`, first sentence per word
pub fn candidate_words(config: &Config, text: &str) -> anyhow::Result<WordMap> {
    let dictionary = WordListDictionary::load(&config.dictionary).with_context(|| {
        format!("Failed to load dictionary {}", config.dictionary.path.display())
    })?;
    let meta = dictionary.metadata();
    tracing::info!("Dictionary {} with {} entries", meta.name, meta.entry_count);

    let words = WordExtractor::new(&dictionary).extract(text);
    tracing::info!("Extracted {} candidate words", words.len());
    Ok(words)
}

/// Store state and other books' word lists for one document
pub struct Review {
    pub store: ClassificationStore,
    pub sources: Vec<KnownSource>,
}

impl Review {
    pub fn prepare(config: &Config) -> anyhow::Result<Self> {
        let work_dir = &config.store.work_dir;
        fs::create_dir_all(work_dir)
            .with_context(|| format!("Failed to create {}", work_dir.display()))?;

        let paths = StorePaths::for_document(&config.store, &config.ocr.document);
        let sources = scan_sidecars(work_dir, &paths.sidecar())?;
        let store = ClassificationStore::open(paths)?;

        Ok(Self { store, sources })
    }

    pub fn run<I, P>(
        &mut self,
        words: &WordMap,
        input: &mut I,
        prompter: &mut P,
    ) -> anyhow::Result<ClassifyOutcome>
    where
        I: DecisionSource + ?Sized,
        P: Prompter + ?Sized,
    {
        let outcome = classify(words, &mut self.store, &self.sources, input, prompter)?;
        tracing::info!(
            "Reviewed {} words: {} known, {} unknown{}",
            outcome.known + outcome.unknown,
            outcome.known,
            outcome.unknown,
            if outcome.interrupted { " (interrupted)" } else { "" }
        );
        Ok(outcome)
    }

    /// Fill missing translations and persist the unknown words
    pub async fn translate<T>(
        &mut self,
        translator: &T,
        config: &TranslatorConfig,
    ) -> anyhow::Result<FillReport>
    where
        T: Translator + ?Sized,
    {
        let report = translate_words(translator, config, &mut self.store.unknown).await;
        self.store.save_unknown()?;
        Ok(report)
    }
}

pub async fn translate_words<T>(
    translator: &T,
    config: &TranslatorConfig,
    words: &mut WordMap,
) -> FillReport
where
    T: Translator + ?Sized,
{
    let report = fill_missing(translator, words, &config.from_lang, &config.to_lang).await;
    tracing::info!(
        "Translated {} words via {} ({} failed, {} already done)",
        report.translated,
        translator.metadata().name,
        report.failed,
        report.skipped
    );
    report
}

/// Re-run translation over an existing word CSV, rewriting it in place
pub async fn translate_csv<T>(
    translator: &T,
    config: &TranslatorConfig,
    csv_path: &Path,
) -> anyhow::Result<FillReport>
where
    T: Translator + ?Sized,
{
    require_file(csv_path)?;

    let mut words = load_unknown_words(csv_path)?;
    let report = translate_words(translator, config, &mut words).await;
    save_unknown_words(csv_path, &words)?;
    Ok(report)
}
