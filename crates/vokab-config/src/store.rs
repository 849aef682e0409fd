use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_known_words_file() -> PathBuf {
    PathBuf::from(".KNOWN_WORDS.txt")
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Locations of the word stores
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Global known words list, shared by every book
    #[serde(default = "default_known_words_file")]
    pub known_words_file: PathBuf,
    /// Directory holding the per-book `.csv` and `.words` files
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

impl StoreConfig {
    /// `<work_dir>/<stem>.csv` for the given document
    pub fn unknown_words_file(&self, document: &Path) -> PathBuf {
        self.work_dir.join(format!("{}.csv", crate::document_stem(document)))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            known_words_file: default_known_words_file(),
            work_dir: default_work_dir(),
        }
    }
}
