use crate::db::DbPool;
use crate::errors::AppError;

/// Candidate profile. Profile CRUD lives upstream; this model only covers
/// what the proposal flow needs. `cpf` stays server-side and is never
/// serialized into a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Candidate>, AppError> {
    let row = sqlx::query_as::<_, Candidate>(
        "SELECT id, name, email, phone, cpf FROM candidates WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a candidate row. Used by the seed and by tests.
pub async fn create(
    pool: &DbPool,
    name: &str,
    email: &str,
    phone: &str,
    cpf: &str,
) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO candidates (name, email, phone, cpf) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(cpf)
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}
