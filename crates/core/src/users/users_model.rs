//! User domain models.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_NAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_PROFILE_NAME_LENGTH, MIN_REGISTRATION_NAME_LENGTH,
};
use crate::errors::{Error, Result, ValidationError};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern");
}

/// Trims and lowercases an email, rejecting malformed addresses.
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "email".to_string(),
        )));
    }
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(Error::invalid_input("Please provide a valid email address"));
    }
    Ok(email)
}

fn validate_name(name: &str, min_len: usize) -> Result<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len < min_len || len > MAX_NAME_LENGTH {
        return Err(Error::invalid_input(format!(
            "Name must be between {} and {} characters",
            min_len, MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::invalid_input(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A user together with the stored password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Input model for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

impl NewUser {
    /// Validates the registration payload and returns it with the name trimmed
    /// and the email normalized.
    pub fn validate(&self) -> Result<NewUser> {
        let name = validate_name(&self.name, MIN_REGISTRATION_NAME_LENGTH)?;
        let email = normalize_email(&self.email)?;
        validate_password(&self.password)?;
        if let Some(confirm) = &self.confirm_password {
            if confirm != &self.password {
                return Err(Error::invalid_input("Passwords do not match"));
            }
        }
        Ok(NewUser {
            name,
            email,
            password: self.password.clone(),
            confirm_password: None,
        })
    }
}

/// Row handed to the repository when a user is created.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Partial update of a user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserProfileUpdate {
    pub fn validate(&self) -> Result<UserProfileUpdate> {
        if self.name.is_none() && self.email.is_none() {
            return Err(Error::invalid_input("No profile fields to update"));
        }
        let name = self
            .name
            .as_deref()
            .map(|n| validate_name(n, MIN_PROFILE_NAME_LENGTH))
            .transpose()?;
        let email = self.email.as_deref().map(normalize_email).transpose()?;
        Ok(UserProfileUpdate { name, email })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<()> {
        if self.current_password.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "currentPassword".to_string(),
            )));
        }
        validate_password(&self.new_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str, password: &str, confirm: Option<&str>) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.map(str::to_string),
        }
    }

    #[test]
    fn test_registration_normalizes_email_and_name() {
        let validated = new_user("  alice ", " Alice@Example.COM ", "secret1", Some("secret1"))
            .validate()
            .unwrap();
        assert_eq!(validated.name, "alice");
        assert_eq!(validated.email, "alice@example.com");
    }

    #[test]
    fn test_registration_rejects_bad_input() {
        assert!(new_user("al", "a@b.io", "secret1", None).validate().is_err());
        assert!(new_user("alice", "not-an-email", "secret1", None)
            .validate()
            .is_err());
        assert!(new_user("alice", "a@b.io", "short", None).validate().is_err());
        assert!(new_user("alice", "a@b.io", "secret1", Some("secret2"))
            .validate()
            .is_err());
    }

    #[test]
    fn test_profile_update_requires_a_field() {
        assert!(UserProfileUpdate::default().validate().is_err());

        let update = UserProfileUpdate {
            name: Some("Bo".to_string()),
            email: None,
        }
        .validate()
        .unwrap();
        assert_eq!(update.name.as_deref(), Some("Bo"));

        let bad = UserProfileUpdate {
            name: Some("B".to_string()),
            email: None,
        };
        assert!(bad.validate().is_err());
    }
}
