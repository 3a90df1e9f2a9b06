//! Orchestration of the proposal lifecycle: validation, authorization,
//! persistence and contact disclosure for each operation. Handlers stay
//! thin; everything that decides the outcome of a request lives here or in
//! `lifecycle`, and every function takes its dependencies explicitly.

use super::lifecycle;
use super::queries;
use super::types::*;
use crate::auth::session::{Actor, ActorKind};
use crate::auth::validate;
use crate::db::DbPool;
use crate::errors::{AppError, FieldError};
use crate::models::{candidate, institution, vacancy};

/// Recipient decision on an open proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    fn status(self) -> ProposalStatus {
        match self {
            Decision::Accept => ProposalStatus::Accepted,
            Decision::Reject => ProposalStatus::Rejected,
        }
    }

    fn audit_action(self) -> &'static str {
        match self {
            Decision::Accept => "proposta.aceita",
            Decision::Reject => "proposta.recusada",
        }
    }
}

/// Create a proposal in `enviada` state.
///
/// A candidate may only propose for themself; an institution only on a
/// vacancy it owns, and only toward an existing candidate. The target
/// vacancy must exist, not be deleted and be `ativa`. The message is
/// sanitized before validation and persistence. Uniqueness of the
/// (candidate, vacancy) pair is left to the store's index, not a prior
/// read, so concurrent submissions cannot both slip through.
pub async fn create(
    pool: &DbPool,
    actor: &Actor,
    input: &NewProposal,
) -> Result<ProposalResponse, AppError> {
    let message = validate::strip_html(&input.mensagem);

    let mut campos = Vec::new();
    if let Some(msg) = validate::validate_mensagem(&message) {
        campos.push(FieldError {
            field: "mensagem",
            message: msg,
        });
    }

    match actor.kind {
        ActorKind::Candidate => {
            if input.id_candidato != actor.id {
                campos.push(FieldError {
                    field: "id_candidato",
                    message: "Candidato não corresponde ao usuário autenticado".to_string(),
                });
            }
        }
        ActorKind::Institution => {
            if candidate::find_by_id(pool, input.id_candidato).await?.is_none() {
                campos.push(FieldError {
                    field: "id_candidato",
                    message: "Candidato não encontrado".to_string(),
                });
            }
        }
    }

    match vacancy::find_active(pool, input.id_vaga).await? {
        None => campos.push(FieldError {
            field: "id_vaga",
            message: "Vaga não encontrada".to_string(),
        }),
        Some(v) => {
            if v.status != vacancy::VacancyStatus::Active {
                campos.push(FieldError {
                    field: "id_vaga",
                    message: "Vaga não está aberta para propostas".to_string(),
                });
            }
            if actor.kind == ActorKind::Institution && v.institution_id != actor.id {
                campos.push(FieldError {
                    field: "id_vaga",
                    message: "Vaga pertence a outra instituição".to_string(),
                });
            }
        }
    }

    if !campos.is_empty() {
        return Err(AppError::Validation(campos));
    }

    let id = queries::insert(pool, input.id_vaga, input.id_candidato, actor.kind, &message).await?;

    let _ = crate::audit::log(
        pool,
        actor,
        "proposta.criada",
        id,
        serde_json::json!({
            "id_vaga": input.id_vaga,
            "id_candidato": input.id_candidato,
        }),
    )
    .await;

    let record = queries::find_record(pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(ProposalResponse::project(record, None))
}

/// Accept or reject an open proposal. Recipient only; the conditional
/// update closes the race with a concurrent response or cancellation, so
/// losing it is a state conflict, never a silent double-apply.
pub async fn respond(
    pool: &DbPool,
    actor: &Actor,
    id: i64,
    decision: Decision,
    mensagem_resposta: Option<&str>,
) -> Result<ProposalResponse, AppError> {
    let record = queries::find_record(pool, id).await?.ok_or(AppError::NotFound)?;
    let parties = record.parties();
    lifecycle::authorize_response(actor, &parties)?;
    lifecycle::require_open(record.status)?;

    let response_message = mensagem_resposta
        .map(validate::strip_html)
        .filter(|m| !m.is_empty());
    if let Some(msg) = response_message
        .as_deref()
        .and_then(validate::validate_mensagem_resposta)
    {
        return Err(AppError::field("mensagem_resposta", msg));
    }

    if !queries::transition(pool, id, decision.status(), response_message.as_deref()).await? {
        return Err(AppError::InvalidState(
            "Proposta já foi respondida ou cancelada".to_string(),
        ));
    }

    let _ = crate::audit::log(
        pool,
        actor,
        decision.audit_action(),
        id,
        serde_json::json!({ "com_resposta": response_message.is_some() }),
    )
    .await;

    let record = queries::find_record(pool, id).await?.ok_or(AppError::NotFound)?;
    let contatos = disclose(pool, actor, &record).await?;
    Ok(ProposalResponse::project(record, contatos))
}

/// Cancel (remove) an open proposal. Initiator only; terminal proposals
/// cannot be cancelled. Deleting the row frees the (candidate, vacancy)
/// pair for a future proposal.
pub async fn cancel(pool: &DbPool, actor: &Actor, id: i64) -> Result<(), AppError> {
    let record = queries::find_record(pool, id).await?.ok_or(AppError::NotFound)?;
    lifecycle::authorize_cancel(actor, &record.parties())?;
    lifecycle::require_open(record.status)?;

    if !queries::delete_if_sent(pool, id).await? {
        return Err(AppError::InvalidState(
            "Proposta já foi respondida".to_string(),
        ));
    }

    let _ = crate::audit::log(
        pool,
        actor,
        "proposta.cancelada",
        id,
        serde_json::json!({
            "id_vaga": record.vacancy_id,
            "id_candidato": record.candidate_id,
        }),
    )
    .await;

    Ok(())
}

/// Fetch one proposal as seen by the acting party. 404 when absent, 403
/// when the actor is neither party.
pub async fn find_for_actor(
    pool: &DbPool,
    actor: &Actor,
    id: i64,
) -> Result<ProposalResponse, AppError> {
    let record = queries::find_record(pool, id).await?.ok_or(AppError::NotFound)?;
    lifecycle::require_party(actor, &record.parties())?;
    let contatos = disclose(pool, actor, &record).await?;
    Ok(ProposalResponse::project(record, contatos))
}

/// Counterpart contact details for the viewer, when the status discloses
/// them. The viewer always receives the other side's contacts.
async fn disclose(
    pool: &DbPool,
    actor: &Actor,
    record: &ProposalRecord,
) -> Result<Option<Contatos>, AppError> {
    if !lifecycle::discloses_contacts(record.status) {
        return Ok(None);
    }
    let contatos = match actor.kind {
        ActorKind::Candidate => institution::find_by_id(pool, record.institution_id)
            .await?
            .map(|i| Contatos {
                email: i.email,
                telefone: i.phone,
            }),
        ActorKind::Institution => candidate::find_by_id(pool, record.candidate_id)
            .await?
            .map(|c| Contatos {
                email: c.email,
                telefone: c.phone,
            }),
    };
    Ok(contatos)
}
