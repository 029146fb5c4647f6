//! Alerts module - thresholds attached to a transaction.

mod alerts_model;
mod alerts_service;
mod alerts_traits;


pub use alerts_model::{
    Alert, AlertTransactionSummary, AlertUpdate, AlertWithTransaction, NewAlert, NewAlertRecord,
};
pub use alerts_service::AlertService;
pub use alerts_traits::{AlertRepositoryTrait, AlertServiceTrait};
