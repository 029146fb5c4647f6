//! Users module - registration, credentials and profile management.

mod users_model;
mod users_service;
mod users_traits;


pub use users_model::{
    normalize_email, LoginCredentials, NewUser, NewUserRecord, PasswordChange, User,
    UserCredentials, UserProfileUpdate,
};
pub use users_service::{UserService, INVALID_CREDENTIALS_MESSAGE};
pub use users_traits::{CredentialHasher, UserRepositoryTrait, UserServiceTrait};
