use crate::domain::account::{Account, AccountId, AgreementId};
use crate::domain::ports::AccountStore;
use crate::error::{BankError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Accounts {
    by_id: BTreeMap<AccountId, Account>,
    last_id: AccountId,
}

/// A thread-safe in-memory store for accounts.
///
/// Ids are handed out from a counter starting at 1. `Clone` shares the
/// underlying map, so a test can keep a handle and inspect what the
/// services wrote.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.by_id.get(&id).cloned())
    }

    async fn save(&self, mut account: Account) -> Result<Account> {
        let mut accounts = self.accounts.write().await;
        let id = match account.id {
            Some(id) => {
                accounts.last_id = accounts.last_id.max(id);
                id
            }
            None => {
                accounts.last_id = accounts.last_id.checked_add(1).ok_or_else(|| {
                    BankError::InternalError(Box::new(std::io::Error::other(
                        "Account id sequence exhausted",
                    )))
                })?;
                accounts.last_id
            }
        };
        account.id = Some(id);
        accounts.by_id.insert(id, account.clone());
        Ok(account)
    }

    async fn find_by_agreement_id(&self, agreement_id: AgreementId) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_id
            .values()
            .filter(|account| account.agreement_id == agreement_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.by_id.values().cloned().collect())
    }
}
