//! BudgetWise Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for BudgetWise.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod alerts;
pub mod budgets;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod reports;
pub mod transactions;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
