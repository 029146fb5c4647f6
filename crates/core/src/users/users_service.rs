use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::users_model::{
    normalize_email, LoginCredentials, NewUser, NewUserRecord, PasswordChange, User,
    UserProfileUpdate,
};
use super::users_traits::{CredentialHasher, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Service for registering and authenticating users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repository, hasher }
    }

    fn ensure_email_available(&self, email: &str, user_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_email(email)? {
            Some(existing) if Some(existing.id.as_str()) != user_id => Err(Error::Database(
                DatabaseError::UniqueViolation("An account with this email already exists".to_string()),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let new_user = new_user.validate()?;
        self.ensure_email_available(&new_user.email, None)?;

        let password_hash = self.hasher.hash_password(&new_user.password)?;
        let user = self
            .repository
            .create(NewUserRecord {
                name: new_user.name,
                email: new_user.email,
                password_hash,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn authenticate(&self, credentials: LoginCredentials) -> Result<User> {
        if credentials.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if credentials.password.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }

        let email = credentials.email.trim().to_lowercase();
        let Some(stored) = self.repository.get_credentials_by_email(&email)? else {
            debug!("Login attempt for unknown email");
            return Err(Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
        };
        if !self
            .hasher
            .verify_password(&credentials.password, &stored.password_hash)?
        {
            debug!("Login attempt with wrong password for user {}", stored.user.id);
            return Err(Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }
        Ok(stored.user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))
    }

    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User> {
        let update = update.validate()?;
        self.get_user(user_id)?;
        if let Some(email) = &update.email {
            self.ensure_email_available(&normalize_email(email)?, Some(user_id))?;
        }
        self.repository.update_profile(user_id, update).await
    }

    async fn change_password(&self, user_id: &str, change: PasswordChange) -> Result<()> {
        change.validate()?;
        let stored = self
            .repository
            .get_credentials_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))?;
        if !self
            .hasher
            .verify_password(&change.current_password, &stored.password_hash)?
        {
            return Err(Error::Authentication(
                "Current password is incorrect".to_string(),
            ));
        }
        let password_hash = self.hasher.hash_password(&change.new_password)?;
        self.repository
            .update_password_hash(user_id, password_hash)
            .await?;
        info!("Password changed for user {}", user_id);
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let deleted = self.repository.delete(user_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("User {}", user_id)));
        }
        info!("Deleted user {} and all owned data", user_id);
        Ok(())
    }
}
