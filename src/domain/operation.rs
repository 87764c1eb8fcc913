use super::account::AccountType;
use super::agreement::Agreement;
use rust_decimal::Decimal;

/// A single money-movement request, addressed by agreement and account type.
#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    Open {
        agreement: Agreement,
        number: String,
        account_type: AccountType,
        amount: Decimal,
    },
    Charge {
        agreement: Agreement,
        account_type: AccountType,
        amount: Decimal,
    },
    Transfer {
        source: Agreement,
        destination: Agreement,
        source_type: AccountType,
        destination_type: AccountType,
        amount: Decimal,
    },
    CommissionTransfer {
        source: Agreement,
        destination: Agreement,
        source_type: AccountType,
        destination_type: AccountType,
        amount: Decimal,
        commission_percent: Decimal,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Charge { .. } => "charge",
            Self::Transfer { .. } => "transfer",
            Self::CommissionTransfer { .. } => "commission_transfer",
        }
    }
}
