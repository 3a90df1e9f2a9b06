use super::lifecycle;
use super::types::*;
use crate::auth::session::{Actor, ActorKind};
use crate::db::DbPool;
use crate::errors::AppError;

const SELECT_RECORD: &str = "\
    SELECT p.id, p.vacancy_id, p.candidate_id, v.institution_id, \
           p.initiator, p.status, p.message, p.response_message, \
           p.created_at, p.updated_at \
    FROM proposals p \
    JOIN vacancies v ON p.vacancy_id = v.id";

#[derive(sqlx::FromRow)]
struct RecordRow {
    id: i64,
    vacancy_id: i64,
    candidate_id: i64,
    institution_id: i64,
    initiator: String,
    status: String,
    message: String,
    response_message: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RecordRow {
    fn into_record(self) -> ProposalRecord {
        ProposalRecord {
            id: self.id,
            vacancy_id: self.vacancy_id,
            candidate_id: self.candidate_id,
            institution_id: self.institution_id,
            initiator: ActorKind::parse(&self.initiator).unwrap_or(ActorKind::Candidate),
            status: ProposalStatus::parse(&self.status).unwrap_or(ProposalStatus::Sent),
            message: self.message,
            response_message: self.response_message,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Insert a new proposal in `enviada` state and return its id.
///
/// The UNIQUE (candidate_id, vacancy_id) index is what closes the race
/// between two concurrent creations for the same pair; its violation is
/// translated here into the duplicate validation error on `id_vaga`.
pub async fn insert(
    pool: &DbPool,
    vacancy_id: i64,
    candidate_id: i64,
    initiator: ActorKind,
    message: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO proposals (vacancy_id, candidate_id, initiator, status, message) \
         VALUES (?1, ?2, ?3, 'enviada', ?4)",
    )
    .bind(vacancy_id)
    .bind(candidate_id)
    .bind(initiator.as_str())
    .bind(message)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::field(
            "id_vaga",
            "Já existe uma proposta entre este candidato e esta vaga",
        )),
        Err(e) => Err(AppError::Db(e)),
    }
}

/// Find a single proposal with the owning institution resolved.
pub async fn find_record(pool: &DbPool, id: i64) -> Result<Option<ProposalRecord>, AppError> {
    let sql = format!("{SELECT_RECORD} WHERE p.id = ?1");
    let row = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(RecordRow::into_record))
}

/// Conditional status transition: applied only while the proposal is still
/// `enviada`, so two concurrent responses resolve to exactly one winner.
/// Returns whether a row changed.
pub async fn transition(
    pool: &DbPool,
    id: i64,
    new_status: ProposalStatus,
    response_message: Option<&str>,
) -> Result<bool, AppError> {
    let done = sqlx::query(
        "UPDATE proposals \
         SET status = ?1, response_message = ?2, updated_at = datetime('now') \
         WHERE id = ?3 AND status = 'enviada'",
    )
    .bind(new_status.as_str())
    .bind(response_message)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(done.rows_affected() > 0)
}

/// Conditional cancellation: a hard delete, legal only while still `enviada`.
/// Returns whether a row was removed.
pub async fn delete_if_sent(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let done = sqlx::query("DELETE FROM proposals WHERE id = ?1 AND status = 'enviada'")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(done.rows_affected() > 0)
}

/// Paginated oriented listing: "sent by me" or "received by me", most recent
/// first (ties broken by id so pagination is deterministic), with an
/// optional status filter.
pub async fn find_paginated(
    pool: &DbPool,
    actor: &Actor,
    params: &ListParams,
) -> Result<ProposalPage, AppError> {
    #[derive(sqlx::FromRow)]
    struct Row {
        id: i64,
        vacancy_id: i64,
        vacancy_title: String,
        candidate_id: i64,
        candidate_name: String,
        initiator: String,
        status: String,
        message: String,
        created_at: String,
        updated_at: String,
    }

    let page = params.page.max(1);
    let per_page = params.per_page.clamp(1, 100);
    let offset = (page - 1) * per_page;

    let initiator = lifecycle::initiator_for(params.kind, actor.kind);
    let scope = match actor.kind {
        ActorKind::Candidate => "p.candidate_id = ?2",
        ActorKind::Institution => "v.institution_id = ?2",
    };
    let status_clause = if params.status.is_some() {
        " AND p.status = ?3"
    } else {
        ""
    };

    let count_sql = format!(
        "SELECT COUNT(*) FROM proposals p \
         JOIN vacancies v ON p.vacancy_id = v.id \
         WHERE p.initiator = ?1 AND {scope}{status_clause}"
    );
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql)
        .bind(initiator.as_str())
        .bind(actor.id);
    if let Some(status) = params.status {
        count_query = count_query.bind(status.as_str());
    }
    let total = count_query.fetch_one(pool).await?;

    let n = if params.status.is_some() { 3 } else { 2 };
    let data_sql = format!(
        "SELECT p.id, p.vacancy_id, v.title AS vacancy_title, \
                p.candidate_id, c.name AS candidate_name, \
                p.initiator, p.status, p.message, p.created_at, p.updated_at \
         FROM proposals p \
         JOIN vacancies v ON p.vacancy_id = v.id \
         JOIN candidates c ON p.candidate_id = c.id \
         WHERE p.initiator = ?1 AND {scope}{status_clause} \
         ORDER BY p.created_at DESC, p.id DESC \
         LIMIT ?{} OFFSET ?{}",
        n + 1,
        n + 2
    );
    let mut data_query = sqlx::query_as::<_, Row>(&data_sql)
        .bind(initiator.as_str())
        .bind(actor.id);
    if let Some(status) = params.status {
        data_query = data_query.bind(status.as_str());
    }
    let rows = data_query.bind(per_page).bind(offset).fetch_all(pool).await?;

    let items = rows
        .into_iter()
        .map(|row| ProposalListItem {
            id: row.id,
            vacancy_id: row.vacancy_id,
            vacancy_title: row.vacancy_title,
            candidate_id: row.candidate_id,
            candidate_name: row.candidate_name,
            initiator: ActorKind::parse(&row.initiator).unwrap_or(ActorKind::Candidate),
            status: ProposalStatus::parse(&row.status).unwrap_or(ProposalStatus::Sent),
            message: row.message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect();

    Ok(ProposalPage {
        items,
        page,
        per_page,
        total,
    })
}
