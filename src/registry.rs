//! Flavor registries: constructor tables mapping a flavor identifier to the
//! factory for its concrete schema or manager type.
//!
//! The process-wide registries are seeded with the built-in flavors and stay
//! open for registration at any point in the process lifetime, so optional
//! integrations can add flavors when they are activated.

use crate::errors::{Error, Result};
use crate::manager::local::LocalSecretsManager;
use crate::manager::SecretsManager;
use crate::schema::{
    ArbitrarySecretSchema, BasicAuthSchema, SchemaFlavor, SecretContent, SecretSchema,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Factory producing a schema instance of a given flavor.
pub type SchemaCtor = fn(String, SecretContent) -> Result<Box<dyn SecretSchema>>;

/// Factory producing a manager backend of a given flavor.
pub type ManagerCtor = fn() -> Result<Box<dyn SecretsManager>>;

/// Constructor table keyed by flavor.
///
/// Registration is additive and idempotent-safe: re-registering a flavor with
/// the identical constructor is a no-op, while binding it to a different one
/// fails. Constructor identity is fn-pointer equality.
#[derive(Debug)]
pub struct FlavorRegistry<C> {
    by_flavor: BTreeMap<SchemaFlavor, C>,
}

impl<C> Default for FlavorRegistry<C> {
    fn default() -> Self {
        Self {
            by_flavor: BTreeMap::new(),
        }
    }
}

impl<C: Copy + Eq> FlavorRegistry<C> {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `flavor` to `ctor`.
    pub fn register(&mut self, flavor: SchemaFlavor, ctor: C) -> Result<()> {
        match self.by_flavor.get(&flavor) {
            Some(existing) if *existing == ctor => Ok(()),
            Some(_) => Err(Error::DuplicateFlavor {
                flavor: flavor.to_string(),
            }),
            None => {
                self.by_flavor.insert(flavor, ctor);
                Ok(())
            }
        }
    }

    /// Look up the constructor bound to `flavor`.
    pub fn resolve(&self, flavor: &SchemaFlavor) -> Result<C> {
        self.by_flavor
            .get(flavor)
            .copied()
            .ok_or_else(|| Error::UnknownFlavor {
                flavor: flavor.to_string(),
            })
    }

    /// Whether `flavor` is bound.
    pub fn contains(&self, flavor: &SchemaFlavor) -> bool {
        self.by_flavor.contains_key(flavor)
    }

    /// All bound flavors in deterministic order.
    pub fn flavors(&self) -> Vec<SchemaFlavor> {
        self.by_flavor.keys().cloned().collect()
    }
}

/// Constructor for [`ArbitrarySecretSchema`], pre-registered under
/// [`SchemaFlavor::ARBITRARY`].
pub fn arbitrary_schema_ctor(
    name: String,
    content: SecretContent,
) -> Result<Box<dyn SecretSchema>> {
    Ok(Box::new(ArbitrarySecretSchema::new(name, content)?))
}

/// Constructor for [`BasicAuthSchema`], pre-registered under
/// [`SchemaFlavor::BASIC_AUTH`].
pub fn basic_auth_schema_ctor(
    name: String,
    content: SecretContent,
) -> Result<Box<dyn SecretSchema>> {
    Ok(Box::new(BasicAuthSchema::new(name, content)?))
}

fn local_manager_ctor() -> Result<Box<dyn SecretsManager>> {
    Ok(Box::new(LocalSecretsManager::open_default()?))
}

/// Process-wide registry of schema flavors.
pub fn schema_registry() -> &'static RwLock<FlavorRegistry<SchemaCtor>> {
    static REGISTRY: Lazy<RwLock<FlavorRegistry<SchemaCtor>>> = Lazy::new(|| {
        let mut registry = FlavorRegistry::<SchemaCtor>::new();
        registry
            .register(SchemaFlavor::ARBITRARY, arbitrary_schema_ctor)
            .expect("seeding empty schema registry");
        registry
            .register(SchemaFlavor::BASIC_AUTH, basic_auth_schema_ctor)
            .expect("seeding empty schema registry");
        RwLock::new(registry)
    });
    &REGISTRY
}

/// Process-wide registry of manager flavors.
pub fn manager_registry() -> &'static RwLock<FlavorRegistry<ManagerCtor>> {
    static REGISTRY: Lazy<RwLock<FlavorRegistry<ManagerCtor>>> = Lazy::new(|| {
        let mut registry = FlavorRegistry::<ManagerCtor>::new();
        registry
            .register(SchemaFlavor::LOCAL, local_manager_ctor)
            .expect("seeding empty manager registry");
        RwLock::new(registry)
    });
    &REGISTRY
}

/// Bind a schema flavor in the process-wide registry.
pub fn register_schema_flavor(flavor: SchemaFlavor, ctor: SchemaCtor) -> Result<()> {
    schema_registry().write().register(flavor, ctor)
}

/// Resolve a schema flavor from the process-wide registry.
pub fn resolve_schema_flavor(flavor: &SchemaFlavor) -> Result<SchemaCtor> {
    schema_registry().read().resolve(flavor)
}

/// Bind a manager flavor in the process-wide registry.
pub fn register_manager_flavor(flavor: SchemaFlavor, ctor: ManagerCtor) -> Result<()> {
    manager_registry().write().register(flavor, ctor)
}

/// Resolve a manager flavor from the process-wide registry.
pub fn resolve_manager_flavor(flavor: &SchemaFlavor) -> Result<ManagerCtor> {
    manager_registry().read().resolve(flavor)
}
