use std::path::PathBuf;

/// Location of the embedded secret dataset.
#[derive(Clone)]
pub struct StoreConfig {
    pub base_path: PathBuf,
}

impl StoreConfig {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("preview-secrets.redb")
    }
}
