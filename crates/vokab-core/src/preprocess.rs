use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

pub trait Preprocessor {
    // Default: NFKC only, folds OCR ligatures like "ﬁ" into "fi"
    fn process(&self, text: &str) -> String {
        text.nfkc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Collapse runs of whitespace and newlines into single spaces and trim
pub fn clean_sentence(sentence: &str) -> String {
    WHITESPACE.replace_all(sentence, " ").trim().to_string()
}

/// Strip every character that is neither a word character nor whitespace
pub fn clean_word(word: &str) -> String {
    PUNCTUATION.replace_all(word, "").into_owned()
}
