use bank_core::application::account_service::{AccountService, AccountServiceImpl};
use bank_core::domain::agreement::Agreement;
use bank_core::error::BankError;
use bank_core::infrastructure::in_memory::InMemoryAccountStore;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn service() -> AccountServiceImpl {
    AccountServiceImpl::new(Box::new(InMemoryAccountStore::new()))
}

#[tokio::test]
async fn test_transfer_conserves_total() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let service = service();
        let agreement = Agreement::new(1);
        let start_a = Decimal::new(rng.gen_range(1..10_000_000), 2);
        let start_b = Decimal::new(rng.gen_range(0..10_000_000), 2);
        let a = service.add_account(&agreement, "a", 0, start_a).await.unwrap();
        let b = service.add_account(&agreement, "b", 1, start_b).await.unwrap();

        let cents = rng.gen_range(1..=start_a.mantissa() as i64);
        let amount = Decimal::new(cents, 2);
        assert!(service.make_transfer(a.id.unwrap(), b.id.unwrap(), amount).await.unwrap());

        let accounts = service.get_all_accounts().await.unwrap();
        assert_eq!(accounts[0].amount, start_a - amount);
        assert_eq!(accounts[1].amount, start_b + amount);
        assert_eq!(accounts[0].amount + accounts[1].amount, start_a + start_b);
    }
}

#[tokio::test]
async fn test_charge_decreases_exactly_or_not_at_all() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let service = service();
        let balance = Decimal::new(rng.gen_range(0..100_000), 2);
        let charge = Decimal::new(rng.gen_range(-10_000..110_000), 2);
        let account = service
            .add_account(&Agreement::new(1), "a", 0, balance)
            .await
            .unwrap();

        let charged = service.charge(account.id.unwrap(), charge).await.unwrap();

        let after = service.get_all_accounts().await.unwrap()[0].amount;
        if charge <= Decimal::ZERO || balance < charge {
            assert!(!charged);
            assert_eq!(after, balance);
        } else {
            assert!(charged);
            assert_eq!(after, balance - charge);
        }
    }
}

#[tokio::test]
async fn test_unknown_ids_always_error() {
    let service = service();
    for amount in [dec!(-1), dec!(0), dec!(1)] {
        assert!(matches!(
            service.charge(7, amount).await,
            Err(BankError::SourceAccountNotFound(7))
        ));
        assert!(
            service
                .make_transfer(7, 8, amount)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}

#[tokio::test]
async fn test_self_transfer_conserves_balance() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let service = service();
        let balance = Decimal::new(rng.gen_range(0..10_000_000), 2);
        let amount = Decimal::new(rng.gen_range(-10_000_000..10_000_000), 2);
        let account = service
            .add_account(&Agreement::new(1), "a", 0, balance)
            .await
            .unwrap();
        let id = account.id.unwrap();

        assert!(service.make_transfer(id, id, amount).await.unwrap());
        assert_eq!(service.get_all_accounts().await.unwrap()[0].amount, balance);
    }
}

#[tokio::test]
async fn test_overflowing_transfer_changes_nothing() {
    let service = service();
    let agreement = Agreement::new(1);
    let source = service.add_account(&agreement, "a", 0, dec!(10)).await.unwrap();
    let full = service
        .add_account(&agreement, "b", 1, Decimal::MAX)
        .await
        .unwrap();

    let err = service
        .make_transfer(source.id.unwrap(), full.id.unwrap(), dec!(1))
        .await
        .unwrap_err();
    assert!(matches!(err, BankError::AmountOverflow));

    let accounts = service.get_all_accounts().await.unwrap();
    assert_eq!(accounts[0].amount, dec!(10));
    assert_eq!(accounts[1].amount, Decimal::MAX);
}
