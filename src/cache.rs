use sha2::{Digest, Sha256};

use crate::data::loader::{self, DataSource};
use crate::data::model::Dataset;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Load memo: skip re-parsing a source whose content has not changed
// ---------------------------------------------------------------------------

/// SHA-256 over the source name and its bytes, hex encoded.
pub fn fingerprint(name: &str, bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Remembers the most recently parsed dataset.
#[derive(Debug, Default)]
pub struct LoadCache {
    entry: Option<(String, Dataset)>,
}

impl LoadCache {
    /// Load `source`, reusing the cached dataset when the fingerprint
    /// matches. A failed load leaves the cache empty.
    pub fn load(&mut self, source: &DataSource) -> Result<Dataset, LoadError> {
        let name = source.name();
        let fallback_bytes;
        let bytes: &[u8] = match source {
            DataSource::Upload { bytes, .. } => bytes.as_slice(),
            DataSource::Fallback(path) => {
                fallback_bytes = loader::read_fallback(path).inspect_err(|_| self.clear())?;
                fallback_bytes.as_slice()
            }
        };

        let key = fingerprint(&name, bytes);
        if let Some((cached_key, dataset)) = &self.entry {
            if *cached_key == key {
                log::debug!("Reusing parsed dataset for {name}");
                return Ok(dataset.clone());
            }
        }

        self.entry = None;
        let dataset = loader::parse_bytes(&name, bytes)?;
        self.entry = Some((key, dataset.clone()));
        Ok(dataset)
    }

    /// Whether a dataset is memoized.
    #[cfg(test)]
    pub fn is_warm(&self) -> bool {
        self.entry.is_some()
    }

    /// Drop the memoized dataset.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
