use crate::domain::account::{AccountId, AccountType, AgreementId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("No source account")]
    SourceAccountNotFound(AccountId),
    #[error("No destination account")]
    DestinationAccountNotFound(AccountId),
    #[error("Account not found")]
    AccountTypeNotFound {
        agreement_id: AgreementId,
        account_type: AccountType,
    },
    #[error("Account {number:?} has not been persisted")]
    UnsavedAccount { number: String },
    #[error("Amount overflow")]
    AmountOverflow,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl BankError {
    /// True for every lookup failure, whichever side of the call it hit.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SourceAccountNotFound(_)
                | Self::DestinationAccountNotFound(_)
                | Self::AccountTypeNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BankError>;
