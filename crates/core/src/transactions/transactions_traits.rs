use async_trait::async_trait;
use chrono::NaiveDate;

use super::transactions_model::{
    NewTransaction, NewTransactionRecord, Transaction, TransactionFilter, TransactionPage,
    TransactionQuery, TransactionUpdate,
};
use crate::errors::Result;

/// Trait for transaction repository operations. Every query is scoped to a user.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Option<Transaction>>;
    /// One page of matching transactions (newest first) and the total match count.
    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<(Vec<Transaction>, i64)>;
    /// All transactions of a user, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
    /// Transactions dated within `[start, end]`, oldest first.
    fn list_between(&self, user_id: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Transaction>>;
    fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>>;
    async fn create(&self, user_id: &str, record: NewTransactionRecord) -> Result<Transaction>;
    async fn update(
        &self,
        user_id: &str,
        transaction_id: &str,
        record: NewTransactionRecord,
    ) -> Result<Transaction>;
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(&self, user_id: &str, query: TransactionQuery) -> Result<TransactionPage>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
}
