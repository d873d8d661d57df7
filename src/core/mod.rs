pub mod analytics;
pub mod balance_calculator;
pub mod errors;
pub mod models;
pub mod services;
pub mod settlement_ledger;
pub mod settlement_resolver;
