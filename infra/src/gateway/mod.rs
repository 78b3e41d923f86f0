//! Gateway module - Cloopen template-SMS client

pub mod catalog;
pub mod cloopen;

pub use catalog::{ErrorCatalog, OutcomeClass};
pub use cloopen::CloopenGateway;
