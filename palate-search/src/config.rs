//! Search service configuration, read from the environment at startup.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub listen_addr: String,
    pub snapshot_path: PathBuf,
    pub metadata_path: PathBuf,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            listen_addr: "127.0.0.1:8001".to_string(),
            snapshot_path: PathBuf::from("./data/palate_index.bin"),
            metadata_path: PathBuf::from("./data/palate_metadata.json"),
        }
    }
}

impl SearchConfig {
    /// Reads the config from environment variables, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        let defaults = SearchConfig::default();
        SearchConfig {
            listen_addr: env::var("PALATE_SEARCH_ADDR").unwrap_or(defaults.listen_addr),
            snapshot_path: env::var("PALATE_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            metadata_path: env::var("PALATE_METADATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.metadata_path),
        }
    }
}
