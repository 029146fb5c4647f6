use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::budgets_model::{Budget, BudgetUpsertResult, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::time_utils::validate_month;

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.repository.list_for_user(user_id)
    }

    fn get_budget(&self, user_id: &str, month: &str) -> Result<Budget> {
        validate_month(month)?;
        self.repository
            .find_by_month(user_id, month)?
            .ok_or_else(|| Error::NotFound(format!("Budget for {}", month)))
    }

    async fn upsert_budget(&self, user_id: &str, budget: NewBudget) -> Result<BudgetUpsertResult> {
        budget.validate()?;
        let result = self.repository.upsert(user_id, budget).await?;
        debug!(
            "{} budget {} for {}",
            if result.created { "Created" } else { "Updated" },
            result.budget.id,
            result.budget.month
        );
        Ok(result)
    }

    async fn delete_budget(&self, user_id: &str, month: &str) -> Result<()> {
        validate_month(month)?;
        if self.repository.delete_by_month(user_id, month).await? == 0 {
            return Err(Error::NotFound(format!("Budget for {}", month)));
        }
        Ok(())
    }
}
