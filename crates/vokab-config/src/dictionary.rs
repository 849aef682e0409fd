use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("/usr/share/dict/words")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Newline-delimited English word list
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Extra word lists merged into the main one
    #[serde(default)]
    pub additional_paths: Vec<PathBuf>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            additional_paths: vec![],
        }
    }
}
