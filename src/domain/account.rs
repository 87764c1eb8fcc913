use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

pub type AccountId = u64;
pub type AgreementId = u64;

/// Role tag distinguishing accounts held under the same agreement.
pub type AccountType = i32;

/// A balance-holding record associated with an agreement.
///
/// `id` stays `None` until the account store persists the record for the
/// first time.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    pub id: Option<AccountId>,
    #[serde(rename = "agreement")]
    pub agreement_id: AgreementId,
    pub number: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub amount: Decimal,
}

impl Account {
    /// Builds a transient account that has not been saved yet.
    pub fn new(
        agreement_id: AgreementId,
        number: impl Into<String>,
        account_type: AccountType,
        amount: Decimal,
    ) -> Self {
        Self {
            id: None,
            agreement_id,
            number: number.into(),
            account_type,
            amount,
        }
    }

    /// Returns true if the balance is at least `amount`.
    pub fn covers(&self, amount: Decimal) -> bool {
        self.amount >= amount
    }

    /// Removes funds from the balance. No sufficiency check is made here.
    ///
    /// The balance is left unchanged if the result would overflow.
    pub fn debit(&mut self, amount: Decimal) -> Result<()> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(BankError::AmountOverflow)?;
        Ok(())
    }

    /// Adds funds to the balance, leaving it unchanged on overflow.
    pub fn credit(&mut self, amount: Decimal) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(BankError::AmountOverflow)?;
        Ok(())
    }
}

/// Index of one agreement's accounts keyed by account type.
///
/// When several accounts share a type the one with the lowest assigned id
/// is kept, so the outcome does not depend on listing order. Accounts that
/// were never saved rank after every saved one.
#[derive(Debug, Default)]
pub struct AccountsByType {
    accounts: HashMap<AccountType, Account>,
    duplicates: Vec<AccountType>,
}

impl AccountsByType {
    pub fn take(&mut self, account_type: AccountType) -> Option<Account> {
        self.accounts.remove(&account_type)
    }

    /// Types that matched more than one account.
    pub fn duplicates(&self) -> &[AccountType] {
        &self.duplicates
    }
}

fn ranks_before(candidate: &Account, current: &Account) -> bool {
    match (candidate.id, current.id) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

impl FromIterator<Account> for AccountsByType {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut index = Self::default();
        for account in iter {
            match index.accounts.entry(account.account_type) {
                Entry::Vacant(slot) => {
                    slot.insert(account);
                }
                Entry::Occupied(mut slot) => {
                    if !index.duplicates.contains(slot.key()) {
                        index.duplicates.push(*slot.key());
                    }
                    if ranks_before(&account, slot.get()) {
                        slot.insert(account);
                    }
                }
            }
        }
        index
    }
}
