use bank_core::domain::account::Account;
use bank_core::domain::ports::{AccountStoreBox, AccountStoreFactory};
use bank_core::infrastructure::in_memory::InMemoryAccountStore;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: AccountStoreFactory =
        Box::new(|| Box::new(InMemoryAccountStore::new()) as AccountStoreBox);

    let store = factory();
    let saved = store.save(Account::new(1, "a", 0, dec!(1))).await.unwrap();

    let retrieved = store.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(retrieved.agreement_id, 1);
}

#[tokio::test]
async fn test_factory_stores_are_independent() {
    let factory: AccountStoreFactory =
        Box::new(|| Box::new(InMemoryAccountStore::new()) as AccountStoreBox);

    let first = factory();
    let second = factory();
    first.save(Account::new(1, "a", 0, dec!(1))).await.unwrap();

    let handle = tokio::spawn(async move { second.find_all().await.unwrap() });
    assert!(handle.await.unwrap().is_empty());
}
