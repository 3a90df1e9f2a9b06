use actix_session::Session;
use actix_web::{HttpResponse, web};
use std::collections::HashMap;

use crate::auth::session::require_actor;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::proposal::engine::{self, Decision};
use crate::models::proposal::queries;
use crate::models::proposal::types::{
    ListKind, ListParams, NewProposal, ProposalStatus, ResponseMessage,
};

/// POST /propostas - Open a proposal between a candidate and a vacancy.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<NewProposal>,
) -> Result<HttpResponse, AppError> {
    let actor = require_actor(&session)?;
    let created = engine::create(&pool, &actor, &body).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /propostas - List the actor's proposals.
/// Query params: tipo (enviadas|recebidas, required), status (filter),
/// page (default 1), per_page (default 25, cap 100).
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let actor = require_actor(&session)?;

    let kind = query
        .get("tipo")
        .and_then(|s| ListKind::parse(s))
        .ok_or_else(|| AppError::field("tipo", "Tipo deve ser 'enviadas' ou 'recebidas'"))?;

    let status = match query.get("status").filter(|s| !s.is_empty()) {
        Some(s) => Some(
            ProposalStatus::parse(s)
                .ok_or_else(|| AppError::field("status", "Status desconhecido"))?,
        ),
        None => None,
    };

    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let per_page = query
        .get("per_page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(25)
        .max(1)
        .min(100); // Cap at 100

    let params = ListParams {
        kind,
        status,
        page,
        per_page,
    };
    let result = queries::find_paginated(&pool, &actor, &params).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /propostas/{id} - Single proposal, as seen by the acting party.
pub async fn read(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let actor = require_actor(&session)?;
    let proposal = engine::find_for_actor(&pool, &actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(proposal))
}

/// PUT /propostas/{id}/aceitar - Accept an open proposal (recipient only).
pub async fn accept(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: Option<web::Json<ResponseMessage>>,
) -> Result<HttpResponse, AppError> {
    let actor = require_actor(&session)?;
    let mensagem = body.and_then(|b| b.into_inner().mensagem_resposta);
    let updated = engine::respond(
        &pool,
        &actor,
        path.into_inner(),
        Decision::Accept,
        mensagem.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /propostas/{id}/recusar - Reject an open proposal (recipient only).
pub async fn reject(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: Option<web::Json<ResponseMessage>>,
) -> Result<HttpResponse, AppError> {
    let actor = require_actor(&session)?;
    let mensagem = body.and_then(|b| b.into_inner().mensagem_resposta);
    let updated = engine::respond(
        &pool,
        &actor,
        path.into_inner(),
        Decision::Reject,
        mensagem.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /propostas/{id} - Cancel (remove) a proposal the actor opened.
pub async fn cancel(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let actor = require_actor(&session)?;
    engine::cancel(&pool, &actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "mensagem": "Proposta cancelada" })))
}
