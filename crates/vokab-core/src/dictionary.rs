use std::collections::HashSet;
use std::path::Path;

use vokab_config::dictionary::DictionaryConfig;

/// Reference word list used to reject OCR noise
pub trait Dictionary: Send + Sync {
    /// Exact, case-sensitive membership test
    fn contains(&self, word: &str) -> bool;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub entry_count: usize,
}

/// Dictionary backed by a newline-delimited word list
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    name: String,
    words: HashSet<String>,
}

impl WordListDictionary {
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        }
    }

    /// Load a word list, one word per line
    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading word list from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let dict = Self::from_words(
            path.display().to_string(),
            content.lines().map(str::trim),
        );

        if dict.words.is_empty() {
            return Err(LoadError::InvalidFormat(format!(
                "{} contains no words",
                path.display()
            )));
        }

        tracing::info!("Loaded {} dictionary entries", dict.words.len());
        Ok(dict)
    }

    /// Main list is required, additional lists are merged when they load
    pub fn load(config: &DictionaryConfig) -> Result<Self, LoadError> {
        let mut dict = Self::load_from_file(&config.path)?;

        for path in &config.additional_paths {
            match Self::load_from_file(path) {
                Ok(additional) => {
                    tracing::info!("Merging additional word list from: {}", path.display());
                    dict = dict.merge(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load word list from {}: {}", path.display(), e);
                }
            }
        }

        Ok(dict)
    }

    pub fn merge(mut self, other: WordListDictionary) -> Self {
        self.words.extend(other.words);
        self
    }
}

impl Dictionary for WordListDictionary {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: self.name.clone(),
            entry_count: self.words.len(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_contains_is_case_sensitive() {
        let dict = WordListDictionary::from_words("test", ["quick", "Boston"]);
        assert!(dict.contains("quick"));
        assert!(!dict.contains("Quick"));
        assert!(dict.contains("Boston"));
        assert_eq!(dict.metadata().entry_count, 2);
    }

    #[test]
    fn test_load_from_file_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        std::fs::write(&path, "apple\n\n  banana \ncherry\n").unwrap();

        let dict = WordListDictionary::load_from_file(&path).unwrap();
        assert_eq!(dict.metadata().entry_count, 3);
        assert!(dict.contains("banana"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = WordListDictionary::load_from_file(Path::new("/nonexistent/words"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_empty_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(
            WordListDictionary::load_from_file(&path),
            Err(LoadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_load_merges_additional_and_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main");
        let extra = dir.path().join("extra");
        std::fs::write(&main, "apple\n").unwrap();
        std::fs::write(&extra, "zebra\n").unwrap();

        let config = DictionaryConfig {
            path: main,
            additional_paths: vec![extra, PathBuf::from("/nonexistent/extra")],
        };
        let dict = WordListDictionary::load(&config).unwrap();
        assert!(dict.contains("apple"));
        assert!(dict.contains("zebra"));
    }
}
