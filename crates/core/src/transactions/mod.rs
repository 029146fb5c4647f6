//! Transactions module - income and expense records, listing and sums.

mod transactions_aggregation;
mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_aggregation::{
    compute_totals, distinct_categories, distinct_tags, expenses_by_category, round_amount,
    totals_by_month,
};
pub use transactions_model::{
    clean_tags, NewTransaction, NewTransactionRecord, Pagination, Transaction, TransactionFilter,
    TransactionPage, TransactionQuery, TransactionStats, TransactionType, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
