use async_trait::async_trait;

use super::alerts_model::{Alert, AlertUpdate, AlertWithTransaction, NewAlert, NewAlertRecord};
use crate::errors::Result;
use crate::transactions::Transaction;

/// Trait for alert repository operations
#[async_trait]
pub trait AlertRepositoryTrait: Send + Sync {
    /// Alerts on the user's transactions, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<(Alert, Transaction)>>;
    fn get_for_user(&self, user_id: &str, alert_id: &str) -> Result<Option<(Alert, Transaction)>>;
    async fn create(&self, record: NewAlertRecord) -> Result<Alert>;
    async fn update(&self, alert_id: &str, update: AlertUpdate) -> Result<Alert>;
    async fn delete(&self, alert_id: &str) -> Result<usize>;
}

/// Trait for alert service operations
#[async_trait]
pub trait AlertServiceTrait: Send + Sync {
    fn list_alerts(&self, user_id: &str) -> Result<Vec<AlertWithTransaction>>;
    fn get_alert(&self, user_id: &str, alert_id: &str) -> Result<AlertWithTransaction>;
    async fn create_alert(&self, user_id: &str, new_alert: NewAlert)
        -> Result<AlertWithTransaction>;
    async fn update_alert(
        &self,
        user_id: &str,
        alert_id: &str,
        update: AlertUpdate,
    ) -> Result<AlertWithTransaction>;
    async fn delete_alert(&self, user_id: &str, alert_id: &str) -> Result<()>;
}
