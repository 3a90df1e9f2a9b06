use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::errors::AppError;
use crate::models::vacancy::VacancyStatus;
use crate::models::{candidate, institution, vacancy};

pub type DbPool = sqlx::SqlitePool;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub async fn init_pool(database_path: &str) -> DbPool {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
        .expect("Failed to create DB pool")
}

pub async fn run_migrations(pool: &DbPool) {
    sqlx::raw_sql(MIGRATIONS)
        .execute(pool)
        .await
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Seed demo parties and vacancies if the database is empty, so a fresh
/// install has entities to operate on (profile management lives upstream).
pub async fn seed_demo(pool: &DbPool) {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM institutions")
        .fetch_one(pool)
        .await
        .unwrap_or(0);
    if count > 0 {
        log::info!("Database already seeded ({count} institutions), skipping demo seed");
        return;
    }

    let seeded: Result<(), AppError> = async {
        let horizonte = institution::create(
            pool,
            "Colégio Horizonte",
            "contato@colegiohorizonte.example.br",
            "+55 11 3333-0001",
            "12.345.678/0001-90",
        )
        .await?;
        let vila_verde = institution::create(
            pool,
            "Escola Vila Verde",
            "secretaria@vilaverde.example.br",
            "+55 11 3333-0002",
            "98.765.432/0001-10",
        )
        .await?;

        vacancy::create(
            pool,
            horizonte,
            "Agente de apoio - Educação infantil",
            VacancyStatus::Active,
        )
        .await?;
        vacancy::create(
            pool,
            vila_verde,
            "Agente de apoio - Ensino fundamental",
            VacancyStatus::Active,
        )
        .await?;

        candidate::create(
            pool,
            "Ana Souza",
            "ana.souza@example.com",
            "+55 11 98888-0001",
            "390.533.447-05",
        )
        .await?;
        candidate::create(
            pool,
            "Bruno Lima",
            "bruno.lima@example.com",
            "+55 11 98888-0002",
            "862.712.334-96",
        )
        .await?;

        Ok(())
    }
    .await;

    match seeded {
        Ok(()) => log::info!("Demo seed complete"),
        Err(e) => log::error!("Demo seed failed: {e}"),
    }
}
