use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use budgetwise_core::users::{
    NewUserRecord, User, UserCredentials, UserProfileUpdate, UserRepositoryTrait,
};
use budgetwise_core::Result;

use super::model::{NewUserDB, UserDB, UserProfileChangeset};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find_row_by_id(&self, user_id: &str) -> Result<Option<UserDB>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?)
    }

    fn find_row_by_email(&self, email: &str) -> Result<Option<UserDB>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.find_row_by_id(user_id)?.map(User::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_row_by_email(email)?.map(User::from))
    }

    fn get_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        Ok(self.find_row_by_email(email)?.map(UserCredentials::from))
    }

    fn get_credentials_by_id(&self, user_id: &str) -> Result<Option<UserCredentials>> {
        Ok(self.find_row_by_id(user_id)?.map(UserCredentials::from))
    }

    async fn create(&self, record: NewUserRecord) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                let new_user = NewUserDB {
                    id: Uuid::new_v4().to_string(),
                    name: record.name,
                    email: record.email,
                    password_hash: record.password_hash,
                    created_at: now,
                    updated_at: now,
                };
                let row = diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(row))
            })
            .await
    }

    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let changes = UserProfileChangeset {
                    name: update.name,
                    email: update.email,
                    updated_at: Utc::now().naive_utc(),
                };
                let row = diesel::update(users::table.find(&user_id))
                    .set(&changes)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(row))
            })
            .await
    }

    async fn update_password_hash(&self, user_id: &str, password_hash: String) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::password_hash.eq(password_hash),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
