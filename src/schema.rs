//! Secret schemas: typed shapes for a named bundle of key/value credentials.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Payload of a secret. Values may be unset without the key disappearing.
pub type SecretContent = BTreeMap<String, Option<String>>;

/// Discriminant selecting a secret schema or manager variant.
///
/// Flavors are open-ended: external modules mint their own identifiers and
/// register constructors for them, so there is no central enumeration to edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaFlavor(Cow<'static, str>);

impl SchemaFlavor {
    /// Schema accepting arbitrary key/value pairs.
    pub const ARBITRARY: SchemaFlavor = SchemaFlavor::from_static("arbitrary");
    /// Schema restricted to `username`/`password` credentials.
    pub const BASIC_AUTH: SchemaFlavor = SchemaFlavor::from_static("basic-auth");
    /// File-backed local manager.
    pub const LOCAL: SchemaFlavor = SchemaFlavor::from_static("local");
    /// AWS-backed manager, registered by its integration when available.
    pub const AWS: SchemaFlavor = SchemaFlavor::from_static("aws");
    /// Deployment default.
    pub const DEFAULT: SchemaFlavor = SchemaFlavor::from_static("default");

    /// Construct a flavor from a static identifier.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Construct a flavor from a runtime identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Stable string identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability contract shared by every secret schema variant.
///
/// Schemas are immutable value objects: an update to a stored secret is a new
/// instance carrying the same name, never in-place mutation.
pub trait SecretSchema: fmt::Debug + Send + Sync {
    /// Unique identifier of the secret.
    fn name(&self) -> &str;

    /// Flavor discriminant of the concrete variant.
    fn flavor(&self) -> SchemaFlavor;

    /// The secret's payload.
    fn content(&self) -> &SecretContent;
}

/// Schema accepting any caller-defined keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrarySecretSchema {
    name: String,
    content: SecretContent,
}

impl ArbitrarySecretSchema {
    /// Construct a schema with unconstrained content keys.
    pub fn new(name: impl Into<String>, content: SecretContent) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Self { name, content })
    }
}

impl SecretSchema for ArbitrarySecretSchema {
    fn name(&self) -> &str {
        &self.name
    }

    fn flavor(&self) -> SchemaFlavor {
        SchemaFlavor::ARBITRARY
    }

    fn content(&self) -> &SecretContent {
        &self.content
    }
}

/// Key holding the user name in a [`BasicAuthSchema`].
pub const USERNAME_KEY: &str = "username";
/// Key holding the password in a [`BasicAuthSchema`].
pub const PASSWORD_KEY: &str = "password";

/// Schema with a fixed key set for username/password credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthSchema {
    name: String,
    content: SecretContent,
}

impl BasicAuthSchema {
    /// Construct from a content mapping holding exactly the expected keys.
    pub fn new(name: impl Into<String>, content: SecretContent) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        for key in content.keys() {
            if key != USERNAME_KEY && key != PASSWORD_KEY {
                return Err(Error::InvalidContent {
                    name,
                    reason: format!("unexpected key `{key}`"),
                });
            }
        }
        for required in [USERNAME_KEY, PASSWORD_KEY] {
            if !content.contains_key(required) {
                return Err(Error::InvalidContent {
                    name,
                    reason: format!("missing key `{required}`"),
                });
            }
        }
        Ok(Self { name, content })
    }

    /// Construct directly from a credential pair.
    pub fn from_credentials(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let mut content = SecretContent::new();
        content.insert(USERNAME_KEY.to_string(), Some(username.into()));
        content.insert(PASSWORD_KEY.to_string(), Some(password.into()));
        Self::new(name, content)
    }

    /// Stored user name, when set.
    pub fn username(&self) -> Option<&str> {
        self.content.get(USERNAME_KEY).and_then(|v| v.as_deref())
    }

    /// Stored password, when set.
    pub fn password(&self) -> Option<&str> {
        self.content.get(PASSWORD_KEY).and_then(|v| v.as_deref())
    }
}

impl SecretSchema for BasicAuthSchema {
    fn name(&self) -> &str {
        &self.name
    }

    fn flavor(&self) -> SchemaFlavor {
        SchemaFlavor::BASIC_AUTH
    }

    fn content(&self) -> &SecretContent {
        &self.content
    }
}
