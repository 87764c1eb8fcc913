use crate::domain::account::{AccountType, AgreementId};
use crate::domain::agreement::Agreement;
use crate::domain::operation::Operation;
use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Open,
    Charge,
    Transfer,
    CommissionTransfer,
}

/// One row of the operations CSV, before validation.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OperationRecord {
    pub op: OperationKind,
    pub agreement: AgreementId,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub amount: Decimal,
    #[serde(default)]
    pub to_agreement: Option<AgreementId>,
    #[serde(default)]
    pub to_type: Option<AccountType>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub number: Option<String>,
}

fn required<T>(value: Option<T>, column: &str, kind: OperationKind) -> Result<T> {
    value.ok_or_else(|| {
        BankError::ValidationError(format!("{:?} requires the `{}` column", kind, column))
    })
}

impl TryFrom<OperationRecord> for Operation {
    type Error = BankError;

    fn try_from(record: OperationRecord) -> Result<Self> {
        let agreement = Agreement::new(record.agreement);
        let operation = match record.op {
            OperationKind::Open => Operation::Open {
                agreement,
                number: record.number.unwrap_or_default(),
                account_type: record.account_type,
                amount: record.amount,
            },
            OperationKind::Charge => Operation::Charge {
                agreement,
                account_type: record.account_type,
                amount: record.amount,
            },
            OperationKind::Transfer => Operation::Transfer {
                source: agreement,
                destination: Agreement::new(required(
                    record.to_agreement,
                    "to_agreement",
                    record.op,
                )?),
                source_type: record.account_type,
                destination_type: required(record.to_type, "to_type", record.op)?,
                amount: record.amount,
            },
            OperationKind::CommissionTransfer => Operation::CommissionTransfer {
                source: agreement,
                destination: Agreement::new(required(
                    record.to_agreement,
                    "to_agreement",
                    record.op,
                )?),
                source_type: record.account_type,
                destination_type: required(record.to_type, "to_type", record.op)?,
                amount: record.amount,
                commission_percent: required(record.commission, "commission", record.op)?,
            },
        };
        Ok(operation)
    }
}

/// Reads operations from a CSV source.
///
/// Whitespace is trimmed and trailing optional columns may be left off.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes and validates each row.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize::<OperationRecord>()
            .map(|result| result.map_err(BankError::from).and_then(Operation::try_from))
    }
}
