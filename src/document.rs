//! Persistence of the Document: the full YAML mapping of secret name to
//! encoded entry. Writes replace the whole file through a sibling temp file
//! and rename, so readers never observe a partial document.

use crate::codec::EncodedEntry;
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// The persisted mapping of secret name to encoded entry.
pub type Document = BTreeMap<String, EncodedEntry>;

/// Whether a document exists at `path`.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Read the document at `path`.
pub fn read(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|err| Error::Storage(err.to_string()))?;
    if bytes.is_empty() {
        return Ok(Document::new());
    }
    serde_yaml::from_slice(&bytes).map_err(|err| Error::Storage(err.to_string()))
}

/// Replace the document at `path` atomically.
pub fn write(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| Error::Storage(err.to_string()))?;
    }
    let data = serde_yaml::to_string(document).map_err(|err| Error::Storage(err.to_string()))?;

    let tmp = path.with_extension("yaml.tmp");
    let mut file = fs::File::create(&tmp).map_err(|err| Error::Storage(err.to_string()))?;
    file.write_all(data.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|err| Error::Storage(err.to_string()))?;
    fs::rename(&tmp, path).map_err(|err| Error::Storage(err.to_string()))
}
