//! File-backed secrets manager persisting every secret in one YAML document.
//!
//! The document is the sole source of truth: every operation is a full
//! read-modify-write cycle against it. The manager is the only intended
//! writer; cross-process serialization is the caller's responsibility.

use crate::codec;
use crate::document::{self, Document};
use crate::errors::{Error, Result};
use crate::manager::{Capabilities, SecretsManager};
use crate::paths;
use crate::schema::SecretSchema;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the persisted document under the store root.
pub const SECRETS_FILE_NAME: &str = "secrets.yaml";

#[derive(Debug, Clone)]
pub struct LocalSecretsManager {
    secrets_file: PathBuf,
}

impl LocalSecretsManager {
    /// Open the store rooted at `root`, creating an empty document on first
    /// use. Re-opening an existing store never touches its entries.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let secrets_file = root.into().join(SECRETS_FILE_NAME);
        if !document::exists(&secrets_file) {
            document::write(&secrets_file, &Document::new())?;
            debug!(path = %secrets_file.display(), "created empty secrets document");
        }
        Ok(Self { secrets_file })
    }

    /// Open the store at the deterministic default location.
    pub fn open_default() -> Result<Self> {
        Self::new(paths::default_store_root()?)
    }

    /// Location of the persisted document.
    pub fn secrets_file(&self) -> &Path {
        &self.secrets_file
    }

    fn read_document(&self) -> Result<Document> {
        document::read(&self.secrets_file)
    }

    fn write_document(&self, doc: &Document) -> Result<()> {
        document::write(&self.secrets_file, doc)
    }
}

impl SecretsManager for LocalSecretsManager {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new().with_local()
    }

    fn register_secret(&self, schema: &dyn SecretSchema) -> Result<()> {
        let mut doc = self.read_document()?;
        if doc.contains_key(schema.name()) {
            return Err(Error::SecretAlreadyExists {
                name: schema.name().to_string(),
            });
        }
        doc.insert(schema.name().to_string(), codec::encode(schema));
        self.write_document(&doc)?;
        debug!(name = schema.name(), "registered secret");
        Ok(())
    }

    fn get_secret(&self, name: &str) -> Result<Box<dyn SecretSchema>> {
        let doc = self.read_document()?;
        let entry = doc.get(name).ok_or_else(|| Error::SecretNotFound {
            name: name.to_string(),
        })?;
        codec::decode(entry, name)
    }

    fn update_secret(&self, schema: &dyn SecretSchema) -> Result<()> {
        let mut doc = self.read_document()?;
        if !doc.contains_key(schema.name()) {
            return Err(Error::SecretNotFound {
                name: schema.name().to_string(),
            });
        }
        doc.insert(schema.name().to_string(), codec::encode(schema));
        self.write_document(&doc)?;
        debug!(name = schema.name(), "updated secret");
        Ok(())
    }

    fn delete_secret(&self, name: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        if doc.remove(name).is_none() {
            return Err(Error::SecretNotFound {
                name: name.to_string(),
            });
        }
        self.write_document(&doc)?;
        debug!(name, "deleted secret");
        Ok(())
    }

    fn secret_names(&self) -> Result<Vec<String>> {
        Ok(self.read_document()?.keys().cloned().collect())
    }

    fn delete_all_secrets(&self) -> Result<()> {
        self.write_document(&Document::new())?;
        debug!("deleted all secrets");
        Ok(())
    }
}
