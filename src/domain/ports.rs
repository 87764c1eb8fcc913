use super::account::{Account, AccountId, AgreementId};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence collaborator for accounts.
///
/// `save` inserts or replaces by id. An account without an id receives a
/// fresh one, and the stored copy is returned.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;
    async fn save(&self, account: Account) -> Result<Account>;
    async fn find_by_agreement_id(&self, agreement_id: AgreementId) -> Result<Vec<Account>>;
    async fn find_all(&self) -> Result<Vec<Account>>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type AccountStoreFactory = Box<dyn Fn() -> AccountStoreBox + Send + Sync>;
