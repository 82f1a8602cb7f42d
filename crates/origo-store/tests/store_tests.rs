use origo_store::{
    opening_balance, CreditPolicy, DocumentStore, JsonDirStore, MemoryStore, StoreError, UserRecord,
};

fn record_with_credits(uid: &str, credits: Option<u32>) -> UserRecord {
    let mut record = UserRecord::default();
    record.profile.uid = uid.to_string();
    record.profile.birth.name = "Asha".to_string();
    record.profile.credits = credits;
    record
}

async fn exercise_store(store: &dyn DocumentStore) {
    assert!(store.get_user("u1").await.unwrap().is_none());
    assert_eq!(store.credits("u1").await.unwrap(), 0);

    store.put_user("u1", &record_with_credits("u1", Some(3))).await.unwrap();
    let loaded = store.get_user("u1").await.unwrap().unwrap();
    assert_eq!(loaded.profile.birth.name, "Asha");
    assert_eq!(store.credits("u1").await.unwrap(), 3);

    assert_eq!(store.debit_credits("u1", 2).await.unwrap(), 1);
    assert!(matches!(
        store.debit_credits("u1", 2).await,
        Err(StoreError::InsufficientCredits { balance: 1, cost: 2 })
    ));
    assert_eq!(store.credits("u1").await.unwrap(), 1);

    assert!(matches!(
        store.debit_credits("nobody", 1).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryStore::new();
    exercise_store(&store).await;
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_json_dir_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path().join("users")).await.unwrap();
    exercise_store(&store).await;
    assert!(store.dir().join("u1.json").exists());

    // A second handle on the same directory sees the persisted balance.
    let reopened = JsonDirStore::open(dir.path().join("users")).await.unwrap();
    assert_eq!(reopened.credits("u1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_json_dir_rejects_path_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path()).await.unwrap();
    assert!(matches!(
        store.get_user("../etc/passwd").await,
        Err(StoreError::InvalidId { .. })
    ));
}

#[tokio::test]
async fn test_opening_balance() {
    let store = MemoryStore::new();
    let policy = CreditPolicy::default();

    assert_eq!(opening_balance(&store, "new_user", &policy).await.unwrap(), 20);
    assert_eq!(opening_balance(&store, "guest_42", &policy).await.unwrap(), 0);

    store.put_user("returning", &record_with_credits("returning", Some(7))).await.unwrap();
    assert_eq!(opening_balance(&store, "returning", &policy).await.unwrap(), 7);

    store.put_user("legacy", &record_with_credits("legacy", None)).await.unwrap();
    assert_eq!(opening_balance(&store, "legacy", &policy).await.unwrap(), 20);
}
