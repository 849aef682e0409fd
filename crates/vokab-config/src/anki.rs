use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnkiConfig {
    /// Also send exported notes to a running Anki
    pub push: bool,
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Where `<deck>.apkg` is written
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            push: false,
            url: default_url(),
            out_dir: default_out_dir(),
        }
    }
}
