use secrets_stash::codec::FLAVOR_KEY;
use secrets_stash::document::{self, Document};
use secrets_stash::manager::local::SECRETS_FILE_NAME;
use secrets_stash::{
    ArbitrarySecretSchema, BasicAuthSchema, EncodedEntry, Error, LocalSecretsManager,
    SecretContent, SecretSchema, SecretsManager,
};
use tempfile::tempdir;

fn content(pairs: &[(&str, Option<&str>)]) -> SecretContent {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
        .collect()
}

fn arbitrary(name: &str, pairs: &[(&str, Option<&str>)]) -> ArbitrarySecretSchema {
    ArbitrarySecretSchema::new(name, content(pairs)).unwrap()
}

#[test]
fn init_creates_document_file() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    assert!(manager.secrets_file().exists());
    assert_eq!(
        manager.secrets_file(),
        dir.path().join(SECRETS_FILE_NAME).as_path()
    );
}

#[test]
fn init_is_idempotent() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager
        .register_secret(&arbitrary("db", &[("user", Some("alice"))]))
        .unwrap();

    // A second construction against the same root keeps existing entries.
    let reopened = LocalSecretsManager::new(dir.path()).unwrap();
    let fetched = reopened.get_secret("db").unwrap();
    assert_eq!(
        fetched.content().get("user"),
        Some(&Some("alice".to_string()))
    );
}

#[test]
fn capabilities_are_local_only() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    let caps = manager.capabilities();
    assert!(caps.supports_local_execution());
    assert!(!caps.supports_remote_execution());
}

#[test]
fn register_then_get() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    let schema = arbitrary("db", &[("user", Some("alice")), ("pass", Some("s3cr3t"))]);
    manager.register_secret(&schema).unwrap();

    let fetched = manager.get_secret("db").unwrap();
    assert_eq!(fetched.name(), "db");
    assert_eq!(fetched.content(), schema.content());
}

#[test]
fn duplicate_register_fails_and_preserves_original() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager
        .register_secret(&arbitrary("db", &[("user", Some("alice"))]))
        .unwrap();

    let err = manager
        .register_secret(&arbitrary("db", &[("user", Some("mallory"))]))
        .unwrap_err();
    assert_eq!(
        err,
        Error::SecretAlreadyExists {
            name: "db".to_string()
        }
    );
    assert_eq!(
        manager.get_value("db", "user").unwrap(),
        Some("alice".to_string())
    );
}

#[test]
fn update_replaces_wholesale() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager
        .register_secret(&arbitrary("db", &[("a", Some("1")), ("b", Some("2"))]))
        .unwrap();

    manager
        .update_secret(&arbitrary("db", &[("a", Some("3"))]))
        .unwrap();

    let fetched = manager.get_secret("db").unwrap();
    assert_eq!(fetched.content(), &content(&[("a", Some("3"))]));
    assert!(!fetched.content().contains_key("b"));
}

#[test]
fn update_missing_secret_fails() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    let err = manager
        .update_secret(&arbitrary("ghost", &[]))
        .unwrap_err();
    assert_eq!(
        err,
        Error::SecretNotFound {
            name: "ghost".to_string()
        }
    );
}

#[test]
fn delete_is_terminal() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager
        .register_secret(&arbitrary("db", &[("user", Some("alice"))]))
        .unwrap();

    manager.delete_secret("db").unwrap();
    assert_eq!(
        manager.get_secret("db").unwrap_err(),
        Error::SecretNotFound {
            name: "db".to_string()
        }
    );
    assert_eq!(
        manager.delete_secret("db").unwrap_err(),
        Error::SecretNotFound {
            name: "db".to_string()
        }
    );

    // The persisted document no longer contains the entry at all.
    let doc = document::read(manager.secrets_file()).unwrap();
    assert!(!doc.contains_key("db"));
}

#[test]
fn secret_names_lists_all_entries() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager.register_secret(&arbitrary("beta", &[])).unwrap();
    manager.register_secret(&arbitrary("alpha", &[])).unwrap();

    assert_eq!(
        manager.secret_names().unwrap(),
        vec!["alpha".to_string(), "beta".to_string()]
    );
}

#[test]
fn get_value_reads_single_key() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager
        .register_secret(&arbitrary(
            "db",
            &[("user", Some("alice")), ("token", None)],
        ))
        .unwrap();

    assert_eq!(
        manager.get_value("db", "user").unwrap(),
        Some("alice".to_string())
    );
    assert_eq!(manager.get_value("db", "token").unwrap(), None);
    assert_eq!(manager.get_value("db", "missing").unwrap(), None);
}

#[test]
fn delete_all_secrets_empties_store() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    manager.register_secret(&arbitrary("a", &[])).unwrap();
    manager.register_secret(&arbitrary("b", &[])).unwrap();

    manager.delete_all_secrets().unwrap();
    assert!(manager.secret_names().unwrap().is_empty());
    assert!(document::read(manager.secrets_file()).unwrap().is_empty());
}

#[test]
fn corrupt_entry_surfaces_on_get() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();

    // Hand-write entries the codec cannot decode: one with an unresolvable
    // flavor, one missing the flavor key entirely.
    let mut bad_flavor = EncodedEntry::new();
    bad_flavor.insert(FLAVOR_KEY.to_string(), "no-such-flavor".to_string());
    let mut doc = Document::new();
    doc.insert("bad".to_string(), bad_flavor);
    doc.insert("headless".to_string(), EncodedEntry::new());
    document::write(manager.secrets_file(), &doc).unwrap();

    assert!(matches!(
        manager.get_secret("bad").unwrap_err(),
        Error::CorruptEntry { ref name, .. } if name == "bad"
    ));
    assert!(matches!(
        manager.get_secret("headless").unwrap_err(),
        Error::CorruptEntry { ref name, .. } if name == "headless"
    ));

    // Corrupt entries are never silently dropped from listings.
    let names = manager.secret_names().unwrap();
    assert!(names.contains(&"bad".to_string()));
}

#[test]
fn basic_auth_round_trips_through_store() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();
    let schema = BasicAuthSchema::from_credentials("ci", "bot", "hunter2").unwrap();
    manager.register_secret(&schema).unwrap();

    let fetched = manager.get_secret("ci").unwrap();
    assert_eq!(fetched.flavor(), schema.flavor());
    assert_eq!(fetched.content(), schema.content());
}

#[test]
fn db_scenario_end_to_end() {
    let dir = tempdir().unwrap();
    let manager = LocalSecretsManager::new(dir.path()).unwrap();

    manager
        .register_secret(&arbitrary(
            "db",
            &[("user", Some("alice")), ("pass", Some("s3cr3t"))],
        ))
        .unwrap();
    assert_eq!(
        manager.get_value("db", "pass").unwrap(),
        Some("s3cr3t".to_string())
    );

    manager
        .update_secret(&arbitrary(
            "db",
            &[("user", Some("alice")), ("pass", Some("newpass"))],
        ))
        .unwrap();
    assert_eq!(
        manager.get_value("db", "pass").unwrap(),
        Some("newpass".to_string())
    );

    manager.delete_secret("db").unwrap();
    assert_eq!(
        manager.get_secret("db").unwrap_err(),
        Error::SecretNotFound {
            name: "db".to_string()
        }
    );
}
