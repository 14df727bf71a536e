use ppml_store::{ConfirmationStore, MemoryStore, RegistrySnapshot, StoreError};
use ppml_types::{Confirmation, ContentHash, Identity, ProviderLedger};

fn populated_store() -> MemoryStore {
    let store = MemoryStore::new();
    let mut ledger = ProviderLedger::new();
    ledger
        .push(Confirmation::pending(Identity::new("owner"), ContentHash::new([3; 32])))
        .unwrap();
    let mut verified = Confirmation::pending(Identity::new("owner2"), ContentHash::new([4; 32]));
    verified.verified = true;
    ledger.push(verified).unwrap();
    store.put_ledger(&Identity::new("cloud"), ledger).unwrap();
    store
}

#[test]
fn missing_file_reads_as_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = RegistrySnapshot::read_from(&dir.path().join("absent.json")).unwrap();
    assert!(snapshot.ledgers.is_empty());
    assert_eq!(snapshot.version, RegistrySnapshot::VERSION);
}

#[test]
fn write_then_read_preserves_ledgers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    let store = populated_store();

    store.snapshot().unwrap().write_to(&path).unwrap();
    let restored = MemoryStore::from_snapshot(RegistrySnapshot::read_from(&path).unwrap()).unwrap();

    let ledger = restored.get_ledger(&Identity::new("cloud")).unwrap();
    assert_eq!(ledger.len(), 2);
    assert!(!ledger.records()[0].verified);
    assert!(ledger.records()[1].verified);
    assert_eq!(ledger.position_of(&Identity::new("owner2")), Some(1));
}

#[test]
fn garbage_file_is_reported_as_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        RegistrySnapshot::read_from(&path),
        Err(StoreError::Corruption(_))
    ));
}

#[test]
fn future_version_is_rejected() {
    let json = r#"{ "version": 99, "ledgers": [] }"#;
    assert!(matches!(
        RegistrySnapshot::from_json(json),
        Err(StoreError::Version { found: 99, expected: 1 })
    ));
}
