//! Temporary SQLite database with the schema applied.

#![allow(dead_code)]

use pipeline_crm::db::{DbPool, establish_connection_pool, run_migrations};
use pipeline_crm::repository::DieselRepository;
use tempfile::TempDir;

pub struct TestDb {
    // Keeps the directory (and the database file) alive for the test.
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
