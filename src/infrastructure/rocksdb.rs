use crate::domain::account::{Account, AccountId, AgreementId};
use crate::domain::ports::AccountStore;
use crate::error::{BankError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing accounts, keyed by big-endian id.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for store bookkeeping such as the id sequence.
pub const CF_META: &str = "meta";

const LAST_ACCOUNT_ID: &[u8] = b"last_account_id";

fn storage_error(message: impl Into<String>) -> BankError {
    BankError::InternalError(Box::new(std::io::Error::other(message.into())))
}

/// A persistent account store backed by RocksDB.
///
/// Accounts are stored as JSON. Id allocation is serialized through a
/// mutex so concurrent `save` calls on new accounts never share an id.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    sequence: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_meta])
            .map_err(|e| storage_error(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self {
            db: Arc::new(db),
            sequence: Arc::new(Mutex::new(())),
        })
    }

    fn column_family(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| storage_error(format!("{} column family not found", name)))
    }

    fn last_id(&self) -> Result<AccountId> {
        let cf = self.column_family(CF_META)?;
        let bytes = self
            .db
            .get_cf(cf, LAST_ACCOUNT_ID)
            .map_err(|e| storage_error(format!("RocksDB read error: {}", e)))?;

        match bytes {
            Some(bytes) => {
                let raw: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| storage_error("Corrupted account id sequence"))?;
                Ok(AccountId::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    fn put_last_id(&self, id: AccountId) -> Result<()> {
        let cf = self.column_family(CF_META)?;
        self.db
            .put_cf(cf, LAST_ACCOUNT_ID, id.to_be_bytes())
            .map_err(|e| storage_error(format!("RocksDB write error: {}", e)))
    }

    fn decode(bytes: &[u8]) -> Result<Account> {
        serde_json::from_slice(bytes)
            .map_err(|e| storage_error(format!("Failed to deserialize account: {}", e)))
    }

    fn scan(&self) -> Result<Vec<Account>> {
        let cf = self.column_family(CF_ACCOUNTS)?;
        let mut accounts = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) =
                item.map_err(|e| storage_error(format!("RocksDB iteration error: {}", e)))?;
            accounts.push(Self::decode(&value)?);
        }

        Ok(accounts)
    }
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let cf = self.column_family(CF_ACCOUNTS)?;
        let result = self
            .db
            .get_cf(cf, id.to_be_bytes())
            .map_err(|e| storage_error(format!("RocksDB read error: {}", e)))?;

        result.map(|bytes| Self::decode(&bytes)).transpose()
    }

    async fn save(&self, mut account: Account) -> Result<Account> {
        let _guard = self.sequence.lock().await;

        let last_id = self.last_id()?;
        let id = match account.id {
            Some(id) => id,
            None => last_id
                .checked_add(1)
                .ok_or_else(|| storage_error("Account id sequence exhausted"))?,
        };
        if id > last_id {
            self.put_last_id(id)?;
        }
        account.id = Some(id);

        let value = serde_json::to_vec(&account).map_err(|e| {
            BankError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        let cf = self.column_family(CF_ACCOUNTS)?;
        self.db
            .put_cf(cf, id.to_be_bytes(), value)
            .map_err(|e| storage_error(format!("RocksDB write error: {}", e)))?;

        Ok(account)
    }

    async fn find_by_agreement_id(&self, agreement_id: AgreementId) -> Result<Vec<Account>> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|account| account.agreement_id == agreement_id)
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        self.scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_ACCOUNTS).is_some());
        assert!(store.db.cf_handle(CF_META).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_account_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let saved = store
            .save(Account::new(10, "accountNumber", 35, dec!(100)))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(1));

        let retrieved = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(retrieved, saved);

        assert_eq!(store.find_by_agreement_id(10).await.unwrap(), vec![saved]);
        assert!(store.find_by_agreement_id(11).await.unwrap().is_empty());
        assert!(store.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_exhausted_sequence_is_an_error() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();
        let mut account = Account::new(1, "max", 0, dec!(1));
        account.id = Some(AccountId::MAX);
        store.save(account).await.unwrap();

        let err = store.save(Account::new(1, "next", 0, dec!(1))).await.unwrap_err();
        assert!(matches!(err, BankError::InternalError(_)));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rocksdb_sequence_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            store.save(Account::new(1, "a", 0, dec!(1))).await.unwrap();
            store.save(Account::new(1, "b", 0, dec!(1))).await.unwrap();
        }

        let store = RocksDBStore::open(dir.path()).unwrap();
        let next = store.save(Account::new(1, "c", 0, dec!(1))).await.unwrap();
        assert_eq!(next.id, Some(3));
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }
}
