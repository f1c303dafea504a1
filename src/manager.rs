//! The polymorphic manager surface implemented by every backing store.

use crate::errors::Result;
use crate::schema::SecretSchema;

pub mod local;

/// Execution-environment support advertised by a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub local: bool,
    pub remote: bool,
}

impl Capabilities {
    pub const fn new() -> Self {
        Self {
            local: false,
            remote: false,
        }
    }

    pub const fn with_local(mut self) -> Self {
        self.local = true;
        self
    }

    pub const fn with_remote(mut self) -> Self {
        self.remote = true;
        self
    }

    /// Whether pipeline steps may consume this manager when running locally.
    pub const fn supports_local_execution(&self) -> bool {
        self.local
    }

    /// Whether pipeline steps may consume this manager when running remotely.
    pub const fn supports_remote_execution(&self) -> bool {
        self.remote
    }
}

/// Storage contract for named credential bundles.
///
/// Implementations consume schema instances by value semantics: a stored
/// secret is replaced wholesale on update, never merged. All failures are
/// synchronous and name the offending secret; no retries happen internally.
pub trait SecretsManager: Send + Sync {
    /// Execution environments this manager supports.
    fn capabilities(&self) -> Capabilities;

    /// Store a new secret. Fails when the name is already present.
    fn register_secret(&self, schema: &dyn SecretSchema) -> Result<()>;

    /// Fetch a secret by name, decoded into its original flavor.
    fn get_secret(&self, name: &str) -> Result<Box<dyn SecretSchema>>;

    /// Replace a stored secret wholesale. Fails when the name is absent.
    fn update_secret(&self, schema: &dyn SecretSchema) -> Result<()>;

    /// Remove a stored secret. Fails when the name is absent.
    fn delete_secret(&self, name: &str) -> Result<()>;

    /// Names of all stored secrets.
    fn secret_names(&self) -> Result<Vec<String>>;

    /// Value stored under `key` within the named secret, when present and set.
    fn get_value(&self, name: &str, key: &str) -> Result<Option<String>> {
        let schema = self.get_secret(name)?;
        Ok(schema.content().get(key).cloned().flatten())
    }

    /// Remove every stored secret.
    fn delete_all_secrets(&self) -> Result<()> {
        for name in self.secret_names()? {
            self.delete_secret(&name)?;
        }
        Ok(())
    }
}

impl<M> SecretsManager for Box<M>
where
    M: SecretsManager + ?Sized,
{
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn register_secret(&self, schema: &dyn SecretSchema) -> Result<()> {
        (**self).register_secret(schema)
    }

    fn get_secret(&self, name: &str) -> Result<Box<dyn SecretSchema>> {
        (**self).get_secret(name)
    }

    fn update_secret(&self, schema: &dyn SecretSchema) -> Result<()> {
        (**self).update_secret(schema)
    }

    fn delete_secret(&self, name: &str) -> Result<()> {
        (**self).delete_secret(name)
    }

    fn secret_names(&self) -> Result<Vec<String>> {
        (**self).secret_names()
    }

    fn get_value(&self, name: &str, key: &str) -> Result<Option<String>> {
        (**self).get_value(name, key)
    }

    fn delete_all_secrets(&self) -> Result<()> {
        (**self).delete_all_secrets()
    }
}

impl<M> SecretsManager for std::sync::Arc<M>
where
    M: SecretsManager + ?Sized,
{
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn register_secret(&self, schema: &dyn SecretSchema) -> Result<()> {
        (**self).register_secret(schema)
    }

    fn get_secret(&self, name: &str) -> Result<Box<dyn SecretSchema>> {
        (**self).get_secret(name)
    }

    fn update_secret(&self, schema: &dyn SecretSchema) -> Result<()> {
        (**self).update_secret(schema)
    }

    fn delete_secret(&self, name: &str) -> Result<()> {
        (**self).delete_secret(name)
    }

    fn secret_names(&self) -> Result<Vec<String>> {
        (**self).secret_names()
    }

    fn get_value(&self, name: &str, key: &str) -> Result<Option<String>> {
        (**self).get_value(name, key)
    }

    fn delete_all_secrets(&self) -> Result<()> {
        (**self).delete_all_secrets()
    }
}
