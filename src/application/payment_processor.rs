use super::account_service::AccountServiceRef;
use crate::domain::account::{Account, AccountId, AccountType, AccountsByType};
use crate::domain::agreement::Agreement;
use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Transfers between accounts addressed by agreement and account type.
///
/// Account balances are only ever touched through the injected
/// `AccountService`.
pub struct PaymentProcessor {
    account_service: AccountServiceRef,
}

impl PaymentProcessor {
    pub fn new(account_service: AccountServiceRef) -> Self {
        Self { account_service }
    }

    /// Finds the account of `account_type` held under `agreement`.
    ///
    /// If several accounts share the type, the one with the lowest id wins.
    pub async fn resolve_account(
        &self,
        agreement: &Agreement,
        account_type: AccountType,
    ) -> Result<Account> {
        let mut index: AccountsByType = self
            .account_service
            .get_accounts(agreement)
            .await?
            .into_iter()
            .collect();

        if index.duplicates().contains(&account_type) {
            warn!(
                agreement_id = agreement.id,
                account_type, "several accounts share this type, using the lowest id"
            );
        }

        index
            .take(account_type)
            .ok_or(BankError::AccountTypeNotFound {
                agreement_id: agreement.id,
                account_type,
            })
    }

    async fn resolve_pair(
        &self,
        source: &Agreement,
        destination: &Agreement,
        source_type: AccountType,
        destination_type: AccountType,
    ) -> Result<(Account, Account)> {
        let source_account = self.resolve_account(source, source_type).await?;
        let destination_account = self.resolve_account(destination, destination_type).await?;
        Ok((source_account, destination_account))
    }

    pub async fn make_transfer(
        &self,
        source: &Agreement,
        destination: &Agreement,
        source_type: AccountType,
        destination_type: AccountType,
        amount: Decimal,
    ) -> Result<bool> {
        let (source_account, destination_account) = self
            .resolve_pair(source, destination, source_type, destination_type)
            .await?;

        self.account_service
            .make_transfer(
                persisted_id(&source_account)?,
                persisted_id(&destination_account)?,
                amount,
            )
            .await
    }

    /// Transfers `amount` and deducts `amount * commission_percent` from the
    /// source on top of it.
    ///
    /// Returns `Ok(false)` without touching either account when the source
    /// cannot cover principal plus commission or the total is not positive.
    /// The commission is charged first and is not credited to any account.
    /// The charge and the transfer are separate writes; nothing is rolled
    /// back if the transfer fails after the commission was taken.
    pub async fn make_transfer_with_commission(
        &self,
        source: &Agreement,
        destination: &Agreement,
        source_type: AccountType,
        destination_type: AccountType,
        amount: Decimal,
        commission_percent: Decimal,
    ) -> Result<bool> {
        let (source_account, destination_account) = self
            .resolve_pair(source, destination, source_type, destination_type)
            .await?;

        let commission = amount
            .checked_mul(commission_percent)
            .ok_or(BankError::AmountOverflow)?;
        let summary_charge = amount
            .checked_add(commission)
            .ok_or(BankError::AmountOverflow)?;

        if !source_account.covers(summary_charge) {
            debug!(
                %summary_charge,
                balance = %source_account.amount,
                "commission transfer rejected: insufficient funds"
            );
            return Ok(false);
        }
        if summary_charge <= Decimal::ZERO {
            debug!(%summary_charge, "commission transfer rejected: non-positive total");
            return Ok(false);
        }

        let source_id = persisted_id(&source_account)?;
        let destination_id = persisted_id(&destination_account)?;

        // A non-positive commission is refused by `charge`; the principal still moves.
        let charged = self.account_service.charge(source_id, commission).await?;
        debug!(source_id, %commission, charged, "commission charge attempted");

        self.account_service
            .make_transfer(source_id, destination_id, amount)
            .await
    }
}

fn persisted_id(account: &Account) -> Result<AccountId> {
    account.id.ok_or_else(|| BankError::UnsavedAccount {
        number: account.number.clone(),
    })
}
