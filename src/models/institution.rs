use crate::db::DbPool;
use crate::errors::AppError;

/// Institution profile, the hiring side of every vacancy. `cnpj` stays
/// server-side and is never serialized into a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cnpj: String,
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Institution>, AppError> {
    let row = sqlx::query_as::<_, Institution>(
        "SELECT id, name, email, phone, cnpj FROM institutions WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert an institution row. Used by the seed and by tests.
pub async fn create(
    pool: &DbPool,
    name: &str,
    email: &str,
    phone: &str,
    cnpj: &str,
) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO institutions (name, email, phone, cnpj) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(cnpj)
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}
