//! Budgets module - one spending budget per user and month.

mod budgets_model;
mod budgets_service;
mod budgets_traits;


pub use budgets_model::{Budget, BudgetUpsertResult, NewBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
