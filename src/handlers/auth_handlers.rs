use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::auth::session::{Actor, ActorKind, store_actor};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::{candidate, institution};

/// Body of POST /sessao, forwarded by the upstream authentication service
/// once it has verified the user's credentials.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub tipo: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub tipo: ActorKind,
    pub id: i64,
    pub nome: String,
}

/// POST /sessao - Record the acting identity in this cookie session.
/// Credential checks happen upstream; this endpoint only verifies that the
/// referenced profile exists.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<SessionRequest>,
) -> Result<HttpResponse, AppError> {
    let kind = ActorKind::parse(&body.tipo)
        .ok_or_else(|| AppError::field("tipo", "Tipo deve ser 'candidato' ou 'instituicao'"))?;

    let nome = match kind {
        ActorKind::Candidate => candidate::find_by_id(&pool, body.id).await?.map(|c| c.name),
        ActorKind::Institution => institution::find_by_id(&pool, body.id).await?.map(|i| i.name),
    }
    .ok_or(AppError::NotFound)?;

    store_actor(&session, &Actor { kind, id: body.id })?;
    log::info!("Session established for {} {}", kind.as_str(), body.id);

    Ok(HttpResponse::Ok().json(SessionResponse {
        tipo: kind,
        id: body.id,
        nome,
    }))
}

/// DELETE /sessao - Drop the current session.
pub async fn destroy(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}
