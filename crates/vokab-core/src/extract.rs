//! Candidate vocabulary extraction from OCR text.

use vokab_types::{WordEntry, WordMap};

use crate::dictionary::Dictionary;
use crate::preprocess::{DefaultPreprocessor, Preprocessor, clean_sentence, clean_word};

const MIN_WORD_LEN: usize = 4;
const MAX_REPEAT_RUN: usize = 4;

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

/// Splits text into sentences and keeps the first sentence for every new word
pub struct WordExtractor<'d, D: Dictionary + ?Sized> {
    dictionary: &'d D,
}

impl<'d, D: Dictionary + ?Sized> WordExtractor<'d, D> {
    pub fn new(dictionary: &'d D) -> Self {
        Self { dictionary }
    }

    pub fn extract(&self, text: &str) -> WordMap {
        let mut words = WordMap::new();

        // Sentences split on the raw text; only tokens are normalized
        for sentence in text.split(['.', '!', '?']) {
            let sentence = clean_sentence(sentence);

            for token in sentence.split_whitespace() {
                let word = clean_word(&DefaultPreprocessor.process(token));
                if !self.is_valid_word(&word) {
                    continue;
                }

                let key = word.to_lowercase();
                if !words.contains_key(&key) {
                    words.insert(key.clone(), WordEntry::new(key, sentence.as_str()));
                }
            }
        }

        tracing::debug!("Extracted {} unique words", words.len());
        words
    }

    pub fn is_valid_word(&self, word: &str) -> bool {
        has_word_shape(word) && self.dictionary.contains(word)
    }
}

/// Every rule except the dictionary lookup
pub fn has_word_shape(word: &str) -> bool {
    let (Some(first), Some(last)) = (word.chars().next(), word.chars().last()) else {
        return false;
    };

    word.chars().count() >= MIN_WORD_LEN
        && !first.is_numeric()
        && !last.is_numeric()
        && !NUMBER_WORDS.contains(&word)
        && !has_repeated_run(word, MAX_REPEAT_RUN)
        && word.chars().all(|c| c.is_ascii_alphabetic())
        && !is_title_case(word)
}

fn has_repeated_run(word: &str, limit: usize) -> bool {
    let mut prev = None;
    let mut run = 0;

    for c in word.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= limit {
            return true;
        }
    }

    false
}

/// Capitalized first letter with everything after it lowercase, i.e. a likely name
fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| !c.is_alphabetic() || c.is_lowercase()),
        _ => false,
    }
}
