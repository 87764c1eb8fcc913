//! Domain entities and the persistence port the services are written against.

pub mod account;
pub mod agreement;
pub mod operation;
pub mod ports;
