//! Temporary databases for repository tests.

use std::sync::Arc;

use budgetwise_core::users::{NewUserRecord, User, UserRepositoryTrait};
use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
}

pub fn setup_db() -> TestDb {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub async fn create_user(db: &TestDb, email: &str) -> User {
    UserRepository::new(db.pool.clone(), db.writer.clone())
        .create(NewUserRecord {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("Failed to create test user")
}
