//! Pluggable secrets management: named credential bundles described by
//! typed schemas, stored behind an interchangeable manager interface with a
//! file-backed local implementation.

pub mod codec;
pub mod document;
pub mod errors;
pub mod integration;
pub mod manager;
pub mod paths;
pub mod registry;
pub mod schema;

pub use codec::{decode, encode, EncodedEntry, FLAVOR_KEY};
pub use document::Document;
pub use errors::{Error, Result};
pub use integration::{activate_available, Integration};
pub use manager::local::LocalSecretsManager;
pub use manager::{Capabilities, SecretsManager};
pub use registry::{
    manager_registry, register_manager_flavor, register_schema_flavor, resolve_manager_flavor,
    resolve_schema_flavor, schema_registry, FlavorRegistry, ManagerCtor, SchemaCtor,
};
pub use schema::{
    ArbitrarySecretSchema, BasicAuthSchema, SchemaFlavor, SecretContent, SecretSchema,
};
