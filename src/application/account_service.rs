use crate::domain::account::{Account, AccountId, AccountType};
use crate::domain::agreement::Agreement;
use crate::domain::ports::AccountStoreBox;
use crate::error::{BankError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Direct balance mutations and account bookkeeping.
///
/// Business-rule rejections come back as `Ok(false)`. Lookup failures are
/// always errors.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Deducts `charge_amount` from a single account if it is positive and
    /// covered by the balance.
    async fn charge(&self, account_id: AccountId, charge_amount: Decimal) -> Result<bool>;

    /// Moves `amount` from source to destination without checking
    /// sufficiency or sign. Callers that need an overdraft guard must check
    /// before calling.
    ///
    /// A transfer from an account to itself leaves the balance unchanged.
    async fn make_transfer(
        &self,
        source_id: AccountId,
        destination_id: AccountId,
        amount: Decimal,
    ) -> Result<bool>;

    async fn add_account(
        &self,
        agreement: &Agreement,
        number: &str,
        account_type: AccountType,
        amount: Decimal,
    ) -> Result<Account>;

    async fn get_accounts(&self, agreement: &Agreement) -> Result<Vec<Account>>;

    /// Every account known to the store, ordered by id.
    async fn get_all_accounts(&self) -> Result<Vec<Account>>;
}

pub type AccountServiceRef = Arc<dyn AccountService>;

/// `AccountService` backed by an `AccountStore`.
pub struct AccountServiceImpl {
    account_store: AccountStoreBox,
}

impl AccountServiceImpl {
    pub fn new(account_store: AccountStoreBox) -> Self {
        Self { account_store }
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn charge(&self, account_id: AccountId, charge_amount: Decimal) -> Result<bool> {
        let mut account = self
            .account_store
            .find_by_id(account_id)
            .await?
            .ok_or(BankError::SourceAccountNotFound(account_id))?;

        if charge_amount <= Decimal::ZERO {
            debug!(account_id, %charge_amount, "charge rejected: non-positive amount");
            return Ok(false);
        }
        if !account.covers(charge_amount) {
            debug!(
                account_id,
                %charge_amount,
                balance = %account.amount,
                "charge rejected: insufficient funds"
            );
            return Ok(false);
        }

        account.debit(charge_amount)?;
        self.account_store.save(account).await?;
        debug!(account_id, %charge_amount, "account charged");
        Ok(true)
    }

    async fn make_transfer(
        &self,
        source_id: AccountId,
        destination_id: AccountId,
        amount: Decimal,
    ) -> Result<bool> {
        let mut source = self
            .account_store
            .find_by_id(source_id)
            .await?
            .ok_or(BankError::SourceAccountNotFound(source_id))?;

        if source_id == destination_id {
            debug!(source_id, %amount, "transfer to the same account, balance unchanged");
            return Ok(true);
        }

        let mut destination = self
            .account_store
            .find_by_id(destination_id)
            .await?
            .ok_or(BankError::DestinationAccountNotFound(destination_id))?;

        source.debit(amount)?;
        destination.credit(amount)?;

        self.account_store.save(source).await?;
        self.account_store.save(destination).await?;
        debug!(source_id, destination_id, %amount, "transfer applied");
        Ok(true)
    }

    async fn add_account(
        &self,
        agreement: &Agreement,
        number: &str,
        account_type: AccountType,
        amount: Decimal,
    ) -> Result<Account> {
        let account = Account::new(agreement.id, number, account_type, amount);
        let saved = self.account_store.save(account).await?;
        debug!(agreement_id = agreement.id, account_id = ?saved.id, "account added");
        Ok(saved)
    }

    async fn get_accounts(&self, agreement: &Agreement) -> Result<Vec<Account>> {
        self.account_store.find_by_agreement_id(agreement.id).await
    }

    async fn get_all_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts = self.account_store.find_all().await?;
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}
