//! Shared test infrastructure: a tempfile-backed database per test with
//! the schema applied, plus seed helpers for parties and vacancies.
//!
//! The TempDir must stay alive for the pool to remain valid, so `TestDb`
//! owns both.

#![allow(dead_code)]

use tempfile::TempDir;

use apoia::auth::session::{Actor, ActorKind};
use apoia::db::{self, DbPool};
use apoia::models::vacancy::{self, VacancyStatus};
use apoia::models::{candidate, institution};

pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Fresh database with the schema applied and no demo data.
pub async fn setup_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("test.db");
    let pool = db::init_pool(path.to_str().expect("utf-8 temp path")).await;
    db::run_migrations(&pool).await;
    TestDb { _dir: dir, pool }
}

pub async fn seed_candidate(pool: &DbPool, name: &str, email: &str) -> i64 {
    candidate::create(pool, name, email, "+55 11 90000-0001", "000.000.000-00")
        .await
        .expect("create candidate")
}

pub async fn seed_institution(pool: &DbPool, name: &str, email: &str) -> i64 {
    institution::create(pool, name, email, "+55 11 3000-0001", "00.000.000/0001-00")
        .await
        .expect("create institution")
}

pub async fn seed_vacancy(pool: &DbPool, institution_id: i64, status: VacancyStatus) -> i64 {
    vacancy::create(pool, institution_id, "Agente de apoio", status)
        .await
        .expect("create vacancy")
}

pub fn as_candidate(id: i64) -> Actor {
    Actor {
        kind: ActorKind::Candidate,
        id,
    }
}

pub fn as_institution(id: i64) -> Actor {
    Actor {
        kind: ActorKind::Institution,
        id,
    }
}
