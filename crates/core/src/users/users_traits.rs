use async_trait::async_trait;

use super::users_model::{
    LoginCredentials, NewUser, NewUserRecord, PasswordChange, User, UserCredentials,
    UserProfileUpdate,
};
use crate::errors::Result;

/// Password hashing backend. The server supplies the argon2 implementation.
pub trait CredentialHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
    fn get_credentials_by_id(&self, user_id: &str) -> Result<Option<UserCredentials>>;
    async fn create(&self, record: NewUserRecord) -> Result<User>;
    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User>;
    async fn update_password_hash(&self, user_id: &str, password_hash: String) -> Result<()>;
    async fn delete(&self, user_id: &str) -> Result<usize>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn authenticate(&self, credentials: LoginCredentials) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User>;
    async fn change_password(&self, user_id: &str, change: PasswordChange) -> Result<()>;
    async fn delete_user(&self, user_id: &str) -> Result<()>;
}
