use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetUpsertResult, NewBudget};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Budgets of a user, newest month first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Budget>>;
    async fn upsert(&self, user_id: &str, budget: NewBudget) -> Result<BudgetUpsertResult>;
    async fn delete_by_month(&self, user_id: &str, month: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn get_budget(&self, user_id: &str, month: &str) -> Result<Budget>;
    async fn upsert_budget(&self, user_id: &str, budget: NewBudget) -> Result<BudgetUpsertResult>;
    async fn delete_budget(&self, user_id: &str, month: &str) -> Result<()>;
}
