use chrono::NaiveDate;
use fintrack_core::domain::transaction::{PaymentMethod, Transaction, TransactionKind};
use fintrack_core::domain::{Card, CardKind, Goal};
use fintrack_core::storage::{
    load_collection, save_collection, JsonStore, StorageBackend, StorageKey,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_transactions() -> Vec<Transaction> {
    let mut rent = Transaction::new(TransactionKind::Expense, "Rent", 900.0, date(2024, 2, 5));
    rent.settle(900.0, date(2024, 2, 4));
    let salary = Transaction::new(TransactionKind::Income, "Salary", 4200.0, date(2024, 2, 1))
        .with_payment_method(PaymentMethod::Transfer);
    let mut tagged = Transaction::new(TransactionKind::Expense, "Dinner", 85.5, date(2024, 2, 14));
    tagged.tags = vec!["eating-out".into(), "date-night".into()];
    tagged.notes = Some("anniversary".into());
    vec![rent, salary, tagged]
}

#[test]
fn transactions_round_trip_field_for_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path()).unwrap();
    let original = sample_transactions();

    save_collection(&store, StorageKey::Transactions, &original).unwrap();
    let loaded: Vec<Transaction> = load_collection(&store, StorageKey::Transactions);

    // Identity before any status recomputation is applied.
    assert_eq!(loaded, original);
}

#[test]
fn every_key_lives_in_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path()).unwrap();

    save_collection(&store, StorageKey::Transactions, &sample_transactions()).unwrap();
    save_collection(
        &store,
        StorageKey::Cards,
        &[Card::new("Main", "4242", CardKind::Credit).with_brand("Visa")],
    )
    .unwrap();
    save_collection(&store, StorageKey::Goals, &[Goal::new("Trip", "✈️", 5000.0)]).unwrap();

    for key in [StorageKey::Transactions, StorageKey::Cards, StorageKey::Goals] {
        assert!(store.key_path(key).exists(), "{:?}", key);
    }
    assert!(!store.key_path(StorageKey::Accounts).exists());
}

#[test]
fn corrupted_file_degrades_to_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path()).unwrap();
    save_collection(&store, StorageKey::Transactions, &sample_transactions()).unwrap();

    std::fs::write(store.key_path(StorageKey::Transactions), "{oops").unwrap();
    let loaded: Vec<Transaction> = load_collection(&store, StorageKey::Transactions);
    assert!(loaded.is_empty());
}

#[test]
fn rewrite_replaces_previous_payload() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path()).unwrap();

    save_collection(&store, StorageKey::Transactions, &sample_transactions()).unwrap();
    let one = vec![sample_transactions().remove(0)];
    save_collection(&store, StorageKey::Transactions, &one).unwrap();

    let loaded: Vec<Transaction> = load_collection(&store, StorageKey::Transactions);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].description, "Rent");
}

#[test]
fn unknown_fields_in_stored_payloads_are_rejected_as_malformed() {
    // Deserialization is strict about shape (arrays of records); a stored
    // object where an array is expected degrades to empty.
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path()).unwrap();
    store
        .write(StorageKey::Goals, "{\"goals\": []}")
        .unwrap();
    let loaded: Vec<Goal> = load_collection(&store, StorageKey::Goals);
    assert!(loaded.is_empty());
}
