use super::account::AgreementId;
use serde::{Deserialize, Serialize};

/// A customer contract that can own several accounts distinguished by type.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Agreement {
    pub id: AgreementId,
}

impl Agreement {
    pub fn new(id: AgreementId) -> Self {
        Self { id }
    }
}
