//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetwise_core::budgets::Budget;
use budgetwise_core::errors::Error;

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub amount: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "budget amount")?,
            id: db.id,
            user_id: db.user_id,
            month: db.month,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
