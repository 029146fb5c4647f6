use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::alerts_model::{AlertUpdate, AlertWithTransaction, NewAlert};
use super::alerts_traits::{AlertRepositoryTrait, AlertServiceTrait};
use crate::errors::{Error, Result};
use crate::transactions::{Transaction, TransactionRepositoryTrait};

pub struct AlertService {
    repository: Arc<dyn AlertRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl AlertService {
    pub fn new(
        repository: Arc<dyn AlertRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
        }
    }

    fn owned_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repository
            .get_by_id(user_id, transaction_id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", transaction_id)))
    }
}

#[async_trait]
impl AlertServiceTrait for AlertService {
    fn list_alerts(&self, user_id: &str) -> Result<Vec<AlertWithTransaction>> {
        Ok(self
            .repository
            .list_for_user(user_id)?
            .into_iter()
            .map(|(alert, transaction)| AlertWithTransaction::new(alert, &transaction))
            .collect())
    }

    fn get_alert(&self, user_id: &str, alert_id: &str) -> Result<AlertWithTransaction> {
        let (alert, transaction) = self
            .repository
            .get_for_user(user_id, alert_id)?
            .ok_or_else(|| Error::NotFound(format!("Alert {}", alert_id)))?;
        Ok(AlertWithTransaction::new(alert, &transaction))
    }

    async fn create_alert(
        &self,
        user_id: &str,
        new_alert: NewAlert,
    ) -> Result<AlertWithTransaction> {
        let record = new_alert.validate()?;
        let transaction = self.owned_transaction(user_id, &record.transaction_id)?;
        let alert = self.repository.create(record).await?;
        debug!("Created alert {} on transaction {}", alert.id, transaction.id);
        Ok(AlertWithTransaction::new(alert, &transaction))
    }

    async fn update_alert(
        &self,
        user_id: &str,
        alert_id: &str,
        update: AlertUpdate,
    ) -> Result<AlertWithTransaction> {
        update.validate()?;
        let (_, transaction) = self
            .repository
            .get_for_user(user_id, alert_id)?
            .ok_or_else(|| Error::NotFound(format!("Alert {}", alert_id)))?;
        let alert = self.repository.update(alert_id, update).await?;
        Ok(AlertWithTransaction::new(alert, &transaction))
    }

    async fn delete_alert(&self, user_id: &str, alert_id: &str) -> Result<()> {
        self.get_alert(user_id, alert_id)?;
        self.repository.delete(alert_id).await?;
        Ok(())
    }
}
