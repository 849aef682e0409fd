//! File-backed word stores.
//!
//! Three artifacts make up the classification state:
//! - the global known words list, one word per line, sorted
//! - the per-document unknown words CSV: `"word","translation","sentence"`, no header
//! - the per-document `.words` sidecar mirroring the CSV keys, read by other
//!   documents to avoid asking about the same word twice
//!
//! Loads treat a missing file as empty. Saves overwrite the whole file.

use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use vokab_config::store::StoreConfig;
use vokab_types::{WordEntry, WordMap};

use crate::error::StoreError;

pub type KnownWords = BTreeSet<String>;

const SIDECAR_EXTENSION: &str = "words";

pub fn load_known_words(path: &Path) -> Result<KnownWords, StoreError> {
    Ok(read_word_lines(path)?.into_iter().collect())
}

pub fn save_known_words(path: &Path, words: &KnownWords) -> Result<(), StoreError> {
    write_word_lines(path, words.iter())
}

pub fn load_unknown_words(path: &Path) -> Result<WordMap, StoreError> {
    let mut words = WordMap::new();
    if !path.exists() {
        return Ok(words);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(StoreError::csv(path))?;

    for record in reader.records() {
        let record = record.map_err(StoreError::csv(path))?;
        if record.len() < 3 {
            continue;
        }

        let entry = WordEntry {
            word: record[0].to_string(),
            translation: record[1].to_string(),
            sentence: record[2].to_string(),
        };
        words.insert(entry.word.clone(), entry);
    }

    Ok(words)
}

/// Write the CSV and refresh its `.words` sidecar
pub fn save_unknown_words(path: &Path, words: &WordMap) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)
        .map_err(StoreError::csv(path))?;

    for (word, entry) in words {
        writer
            .write_record([
                word.as_str(),
                entry.translation.as_str(),
                entry.sentence.as_str(),
            ])
            .map_err(StoreError::csv(path))?;
    }
    writer.flush().map_err(StoreError::io(path))?;

    let mut sorted: Vec<&String> = words.keys().collect();
    sorted.sort();
    write_word_lines(&sidecar_path(path), sorted)
}

/// `<stem>.words` next to the CSV
pub fn sidecar_path(unknown_words_file: &Path) -> PathBuf {
    unknown_words_file.with_extension(SIDECAR_EXTENSION)
}

fn read_word_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![]),
        Err(e) => Err(StoreError::io(path)(e)),
    }
}

fn write_word_lines<'a>(
    path: &Path,
    words: impl IntoIterator<Item = &'a String>,
) -> Result<(), StoreError> {
    let file = fs::File::create(path).map_err(StoreError::io(path))?;
    let mut writer = BufWriter::new(file);
    for word in words {
        writeln!(writer, "{word}").map_err(StoreError::io(path))?;
    }
    writer.flush().map_err(StoreError::io(path))
}

/// Words already classified somewhere else, e.g. in another book's sidecar
#[derive(Debug, Clone)]
pub struct KnownSource {
    pub name: String,
    words: HashSet<String>,
}

impl KnownSource {
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, read_word_lines(path)?))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Every `.words` sidecar in `dir` except `exclude`, sorted by file name
pub fn scan_sidecars(dir: &Path, exclude: &Path) -> Result<Vec<KnownSource>, StoreError> {
    let exclude_name = exclude.file_name();
    let mut sources = Vec::new();

    for entry in fs::read_dir(dir).map_err(StoreError::io(dir))? {
        let path = entry.map_err(StoreError::io(dir))?.path();
        if path.extension() != Some(OsStr::new(SIDECAR_EXTENSION)) || !path.is_file() {
            continue;
        }
        if path.file_name() == exclude_name {
            continue;
        }

        let source = KnownSource::from_file(&path)?;
        tracing::info!("Found {} words from other file: {}", source.len(), source.name);
        sources.push(source);
    }

    sources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sources)
}

/// Where one document's session reads and writes its state
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub known_words: PathBuf,
    pub unknown_words: PathBuf,
}

impl StorePaths {
    pub fn for_document(config: &StoreConfig, document: &Path) -> Self {
        Self {
            known_words: config.known_words_file.clone(),
            unknown_words: config.unknown_words_file(document),
        }
    }

    pub fn sidecar(&self) -> PathBuf {
        sidecar_path(&self.unknown_words)
    }
}

/// In-memory known/unknown state for one document
#[derive(Debug)]
pub struct ClassificationStore {
    paths: StorePaths,
    pub known: KnownWords,
    pub unknown: WordMap,
}

impl ClassificationStore {
    pub fn open(paths: StorePaths) -> Result<Self, StoreError> {
        let known = load_known_words(&paths.known_words)?;
        let unknown = load_unknown_words(&paths.unknown_words)?;
        tracing::info!(
            "Loaded {} known and {} unknown words",
            known.len(),
            unknown.len()
        );

        Ok(Self {
            paths,
            known,
            unknown,
        })
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn is_classified(&self, word: &str) -> bool {
        self.known.contains(word) || self.unknown.contains_key(word)
    }

    pub fn mark_known(&mut self, word: &str) {
        debug_assert!(!self.unknown.contains_key(word));
        self.known.insert(word.to_string());
    }

    /// Record as unknown with the translation left for the translator
    pub fn mark_unknown(&mut self, word: &str, sentence: &str) {
        debug_assert!(!self.known.contains(word));
        self.unknown
            .insert(word.to_string(), WordEntry::new(word, sentence));
    }

    pub fn save(&self) -> Result<(), StoreError> {
        save_known_words(&self.paths.known_words, &self.known)?;
        self.save_unknown()
    }

    pub fn save_unknown(&self) -> Result<(), StoreError> {
        save_unknown_words(&self.paths.unknown_words, &self.unknown)
    }
}
