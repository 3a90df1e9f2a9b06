use crate::db::DbPool;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacancyStatus {
    Active,
    Paused,
    Closed,
}

impl VacancyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacancyStatus::Active => "ativa",
            VacancyStatus::Paused => "pausada",
            VacancyStatus::Closed => "fechada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ativa" => Some(VacancyStatus::Active),
            "pausada" => Some(VacancyStatus::Paused),
            "fechada" => Some(VacancyStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vacancy {
    pub id: i64,
    pub institution_id: i64,
    pub title: String,
    pub status: VacancyStatus,
}

/// Vacancy lookup for proposal creation. Soft-deleted rows are treated as
/// absent; callers still have to check `status` themselves, since a paused
/// vacancy exists but accepts no new proposals.
pub async fn find_active(pool: &DbPool, id: i64) -> Result<Option<Vacancy>, AppError> {
    #[derive(sqlx::FromRow)]
    struct Row {
        id: i64,
        institution_id: i64,
        title: String,
        status: String,
    }

    let row = sqlx::query_as::<_, Row>(
        "SELECT id, institution_id, title, status FROM vacancies \
         WHERE id = ?1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| Vacancy {
        id: r.id,
        institution_id: r.institution_id,
        title: r.title,
        // unknown statuses never accept proposals
        status: VacancyStatus::parse(&r.status).unwrap_or(VacancyStatus::Closed),
    }))
}

/// Insert a vacancy row. Used by the seed and by tests.
pub async fn create(
    pool: &DbPool,
    institution_id: i64,
    title: &str,
    status: VacancyStatus,
) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO vacancies (institution_id, title, status) VALUES (?1, ?2, ?3)",
    )
    .bind(institution_id)
    .bind(title)
    .bind(status.as_str())
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}

/// Change a vacancy's status. Proposals already open against it are not
/// touched; the gate only applies at creation time.
pub async fn set_status(pool: &DbPool, id: i64, status: VacancyStatus) -> Result<(), AppError> {
    sqlx::query("UPDATE vacancies SET status = ?1, updated_at = datetime('now') WHERE id = ?2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Soft-delete a vacancy. It disappears from the creation gate but keeps
/// satisfying foreign keys from existing proposals.
pub async fn soft_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE vacancies SET deleted_at = datetime('now'), updated_at = datetime('now') \
         WHERE id = ?1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
