//! Codec between a schema instance and the flat entry persisted for it.
//!
//! An encoded entry holds one reserved key naming the flavor plus one
//! transformed key per content key. Every user key is stored with a single
//! marker character prefixed, so no user key can collide with the reserved
//! key and the reverse transform is exact for any input. Values carry the
//! same marker when set; a lone `-` encodes an unset value.

use crate::errors::{Error, Result};
use crate::registry;
use crate::schema::{SchemaFlavor, SecretContent, SecretSchema};
use std::collections::BTreeMap;

/// Reserved key identifying the schema flavor of an entry.
pub const FLAVOR_KEY: &str = "__flavor";

const MARKER: char = '=';
const VALUE_UNSET: &str = "-";

/// Flat string representation of a secret as persisted in the Document.
pub type EncodedEntry = BTreeMap<String, String>;

/// Encode a schema into its persisted entry.
pub fn encode(schema: &dyn SecretSchema) -> EncodedEntry {
    let mut entry = EncodedEntry::new();
    entry.insert(FLAVOR_KEY.to_string(), schema.flavor().as_str().to_string());
    for (key, value) in schema.content() {
        entry.insert(escape_key(key), encode_value(value.as_deref()));
    }
    entry
}

/// Decode a persisted entry back into a schema instance of the recorded
/// flavor, resolved through the process-wide schema registry.
pub fn decode(entry: &EncodedEntry, name: &str) -> Result<Box<dyn SecretSchema>> {
    let flavor = entry
        .get(FLAVOR_KEY)
        .ok_or_else(|| corrupt(name, format!("missing `{FLAVOR_KEY}` key")))?;
    let ctor = registry::resolve_schema_flavor(&SchemaFlavor::new(flavor.clone()))
        .map_err(|err| corrupt(name, err.to_string()))?;

    let mut content = SecretContent::new();
    for (stored_key, stored_value) in entry {
        if stored_key == FLAVOR_KEY {
            continue;
        }
        let key = unescape_key(stored_key)
            .ok_or_else(|| corrupt(name, format!("unexpected key `{stored_key}`")))?;
        let value = decode_value(stored_value)
            .ok_or_else(|| corrupt(name, format!("malformed value for key `{key}`")))?;
        content.insert(key.to_string(), value);
    }

    ctor(name.to_string(), content).map_err(|err| corrupt(name, err.to_string()))
}

fn escape_key(key: &str) -> String {
    format!("{MARKER}{key}")
}

fn unescape_key(stored: &str) -> Option<&str> {
    stored.strip_prefix(MARKER)
}

fn encode_value(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{MARKER}{v}"),
        None => VALUE_UNSET.to_string(),
    }
}

fn decode_value(stored: &str) -> Option<Option<String>> {
    if stored == VALUE_UNSET {
        return Some(None);
    }
    stored.strip_prefix(MARKER).map(|v| Some(v.to_string()))
}

fn corrupt(name: &str, reason: impl Into<String>) -> Error {
    Error::CorruptEntry {
        name: name.to_string(),
        reason: reason.into(),
    }
}
