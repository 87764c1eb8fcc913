//! Application layer containing the money-movement services.
//!
//! `AccountServiceImpl` owns balance mutations against the account store.
//! `PaymentProcessor` resolves accounts by agreement and type and composes
//! ledger calls into transfers. `OperationRunner` drives both from a batch
//! of `Operation`s.

pub mod account_service;
pub mod payment_processor;
pub mod runner;
