use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tempfile::TempDir;
use vokab_config::Config;
use vokab_core::classify::DecisionSource;
use vokab_core::error::ClassifyError;
use vokab_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use vokab_types::Decision;

use crate::pipeline::{Review, candidate_words, translate_csv};
use crate::terminal::Screen;

struct Scripted(VecDeque<Decision>);

impl Scripted {
    fn new(decisions: &[Decision]) -> Self {
        Self(decisions.iter().copied().collect())
    }
}

impl DecisionSource for Scripted {
    fn next_decision(&mut self) -> Result<Decision, ClassifyError> {
        Ok(self.0.pop_front().unwrap_or(Decision::Interrupt))
    }
}

/// Prefixes words with `ru:`
struct StubTranslator;

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        Ok(Translation {
            text: format!("{}:{}", to, text),
            from,
            to,
            provider: "stub".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Stub".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

fn test_config(dir: &Path) -> Config {
    let dictionary = dir.join("words.txt");
    fs::write(&dictionary, "quick\nbrown\njumps\nfox\nlazy\n").unwrap();

    let mut config = Config::default();
    config.dictionary.path = dictionary;
    config.ocr.document = dir.join("book.pdf");
    config.store.work_dir = dir.to_path_buf();
    config.store.known_words_file = dir.join(".KNOWN_WORDS.txt");
    config.translator.to_lang = "ru".to_string();
    config
}

const TEXT: &str = "The quick brown fox jumps. Brown leaves fall!";

#[test]
fn test_candidate_words_in_text_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    let words = candidate_words(&config, TEXT).unwrap();
    let keys: Vec<&str> = words.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["quick", "brown", "jumps"]);
    assert_eq!(words["brown"].sentence, "The quick brown fox jumps");
}

#[test]
fn test_candidate_words_missing_dictionary() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.dictionary.path = dir.path().join("missing.txt");

    assert!(candidate_words(&config, TEXT).is_err());
}

#[test]
fn test_review_skips_words_from_other_books() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    fs::write(dir.path().join("other.words"), "brown\n").unwrap();

    let words = candidate_words(&config, TEXT).unwrap();
    let mut review = Review::prepare(&config).unwrap();
    assert_eq!(review.sources.len(), 1);

    let mut input = Scripted::new(&[Decision::Known, Decision::Unknown]);
    let mut screen = Screen::new(Vec::new());
    let outcome = review.run(&words, &mut input, &mut screen).unwrap();

    assert_eq!(outcome.total, 2);
    assert_eq!((outcome.known, outcome.unknown), (1, 1));
    assert!(!outcome.interrupted);

    let known = fs::read_to_string(dir.path().join(".KNOWN_WORDS.txt")).unwrap();
    assert_eq!(known, "quick\n");
    let csv = fs::read_to_string(dir.path().join("book.csv")).unwrap();
    assert_eq!(csv, "\"jumps\",\"\",\"The quick brown fox jumps\"\n");
    let sidecar = fs::read_to_string(dir.path().join("book.words")).unwrap();
    assert_eq!(sidecar, "jumps\n");
}

#[test]
fn test_own_sidecar_is_not_a_source() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    fs::write(dir.path().join("book.words"), "quick\n").unwrap();

    let review = Review::prepare(&config).unwrap();
    assert!(review.sources.is_empty());
}

#[test]
fn test_interrupt_keeps_earlier_decisions() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    let words = candidate_words(&config, TEXT).unwrap();
    let mut review = Review::prepare(&config).unwrap();
    let mut input = Scripted::new(&[Decision::Unknown, Decision::Interrupt]);
    let mut screen = Screen::new(Vec::new());
    let outcome = review.run(&words, &mut input, &mut screen).unwrap();

    assert!(outcome.interrupted);
    assert_eq!(outcome.unknown, 1);

    // A second run only asks about what is left
    let mut review = Review::prepare(&config).unwrap();
    assert!(review.store.unknown.contains_key("quick"));
    let mut input = Scripted::new(&[Decision::Known, Decision::Known]);
    let outcome = review.run(&words, &mut input, &mut screen).unwrap();
    assert_eq!(outcome.total, 2);
    assert_eq!(outcome.known, 2);
}

#[tokio::test]
async fn test_review_translate_persists() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    let words = candidate_words(&config, TEXT).unwrap();
    let mut review = Review::prepare(&config).unwrap();
    let mut input = Scripted::new(&[Decision::Unknown, Decision::Known, Decision::Unknown]);
    let mut screen = Screen::new(Vec::new());
    review.run(&words, &mut input, &mut screen).unwrap();

    let report = review
        .translate(&StubTranslator, &config.translator)
        .await
        .unwrap();
    assert_eq!(report.translated, 2);

    let csv = fs::read_to_string(dir.path().join("book.csv")).unwrap();
    assert!(csv.contains("\"quick\",\"ru:quick\","));
    assert!(csv.contains("\"jumps\",\"ru:jumps\","));
}

#[tokio::test]
async fn test_translate_csv_fills_blanks_only() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let csv = dir.path().join("space.csv");
    fs::write(
        &csv,
        "\"comet\",\"\",\"A comet passed\"\n\"orbit\",\"орбита\",\"Stable orbit\"\n",
    )
    .unwrap();

    let report = translate_csv(&StubTranslator, &config.translator, &csv)
        .await
        .unwrap();
    assert_eq!((report.translated, report.skipped), (1, 1));

    let content = fs::read_to_string(&csv).unwrap();
    assert_eq!(
        content,
        "\"comet\",\"ru:comet\",\"A comet passed\"\n\"orbit\",\"орбита\",\"Stable orbit\"\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("space.words")).unwrap(),
        "comet\norbit\n"
    );
}

#[tokio::test]
async fn test_translate_csv_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    let err = translate_csv(&StubTranslator, &config.translator, &dir.path().join("nope.csv"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
