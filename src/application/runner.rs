use super::account_service::AccountServiceRef;
use super::payment_processor::PaymentProcessor;
use crate::domain::account::Account;
use crate::domain::operation::Operation;
use crate::error::{BankError, Result};

/// Outcome of one applied operation.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Opened(Account),
    Applied,
    Rejected,
}

impl From<bool> for Outcome {
    fn from(accepted: bool) -> Self {
        if accepted { Self::Applied } else { Self::Rejected }
    }
}

/// Applies batches of operations against one ledger.
///
/// Operations run one at a time in submission order.
pub struct OperationRunner {
    account_service: AccountServiceRef,
    payment_processor: PaymentProcessor,
}

impl OperationRunner {
    pub fn new(account_service: AccountServiceRef) -> Self {
        Self {
            payment_processor: PaymentProcessor::new(account_service.clone()),
            account_service,
        }
    }

    pub async fn apply(&self, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::Open {
                agreement,
                number,
                account_type,
                amount,
            } => {
                let account = self
                    .account_service
                    .add_account(&agreement, &number, account_type, amount)
                    .await?;
                Ok(Outcome::Opened(account))
            }
            Operation::Charge {
                agreement,
                account_type,
                amount,
            } => {
                let account = self
                    .payment_processor
                    .resolve_account(&agreement, account_type)
                    .await?;
                match account.id {
                    Some(id) => Ok(self.account_service.charge(id, amount).await?.into()),
                    None => Err(BankError::UnsavedAccount {
                        number: account.number,
                    }),
                }
            }
            Operation::Transfer {
                source,
                destination,
                source_type,
                destination_type,
                amount,
            } => Ok(self
                .payment_processor
                .make_transfer(&source, &destination, source_type, destination_type, amount)
                .await?
                .into()),
            Operation::CommissionTransfer {
                source,
                destination,
                source_type,
                destination_type,
                amount,
                commission_percent,
            } => Ok(self
                .payment_processor
                .make_transfer_with_commission(
                    &source,
                    &destination,
                    source_type,
                    destination_type,
                    amount,
                    commission_percent,
                )
                .await?
                .into()),
        }
    }

    /// Consumes the runner and returns the final state of all accounts.
    pub async fn into_results(self) -> Result<Vec<Account>> {
        self.account_service.get_all_accounts().await
    }
}
