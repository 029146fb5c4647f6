use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use budgetwise_core::budgets::{Budget, BudgetRepositoryTrait, BudgetUpsertResult, NewBudget};
use budgetwise_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::month.desc())
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::month.eq(month))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Budget::try_from)
            .transpose()
    }

    async fn upsert(&self, user_id: &str, budget: NewBudget) -> Result<BudgetUpsertResult> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetUpsertResult> {
                let now = Utc::now().naive_utc();
                let existing_id = budgets::table
                    .filter(budgets::user_id.eq(&user_id))
                    .filter(budgets::month.eq(&budget.month))
                    .select(budgets::id)
                    .first::<String>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                let (row, created) = match existing_id {
                    Some(existing_id) => {
                        let row = diesel::update(budgets::table.find(existing_id))
                            .set((
                                budgets::amount.eq(budget.amount.to_string()),
                                budgets::updated_at.eq(now),
                            ))
                            .returning(BudgetDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        (row, false)
                    }
                    None => {
                        let new_row = BudgetDB {
                            id: Uuid::new_v4().to_string(),
                            user_id,
                            month: budget.month,
                            amount: budget.amount.to_string(),
                            created_at: now,
                            updated_at: now,
                        };
                        let row = diesel::insert_into(budgets::table)
                            .values(&new_row)
                            .returning(BudgetDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        (row, true)
                    }
                };
                Ok(BudgetUpsertResult {
                    budget: Budget::try_from(row)?,
                    created,
                })
            })
            .await
    }

    async fn delete_by_month(&self, user_id: &str, month: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let month = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budgets::table
                        .filter(budgets::user_id.eq(user_id))
                        .filter(budgets::month.eq(month)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
