use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::transactions_aggregation::{compute_totals, distinct_categories, distinct_tags};
use super::transactions_model::{
    NewTransaction, Pagination, Transaction, TransactionPage, TransactionQuery, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Error, Result};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(&self, user_id: &str, query: TransactionQuery) -> Result<TransactionPage> {
        let filter = query.into_filter()?;
        let (transactions, total_items) = self.repository.search(user_id, &filter)?;

        // Stats, categories and tags cover every transaction of the user.
        let all = self.repository.list_for_user(user_id)?;
        debug!(
            "Listing page {} of transactions for user {}: {} of {} matches",
            filter.page,
            user_id,
            transactions.len(),
            total_items
        );

        Ok(TransactionPage {
            transactions,
            pagination: Pagination::new(filter.page, filter.limit, total_items),
            stats: compute_totals(&all)?,
            categories: distinct_categories(&all),
            all_tags: distinct_tags(&all),
        })
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository
            .get_by_id(user_id, transaction_id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", transaction_id)))
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let record = new_transaction.validate()?;
        self.repository.create(user_id, record).await
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let existing = self.get_transaction(user_id, transaction_id)?;
        let record = update.apply_to(&existing)?;
        self.repository
            .update(user_id, transaction_id, record)
            .await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        if self.repository.delete(user_id, transaction_id).await? == 0 {
            return Err(Error::NotFound(format!("Transaction {}", transaction_id)));
        }
        Ok(())
    }
}
