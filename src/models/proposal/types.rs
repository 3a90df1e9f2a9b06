use serde::{Deserialize, Serialize};

use super::lifecycle::Parties;
use crate::auth::session::ActorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[serde(rename = "enviada")]
    Sent,
    #[serde(rename = "aceita")]
    Accepted,
    #[serde(rename = "recusada")]
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Sent => "enviada",
            ProposalStatus::Accepted => "aceita",
            ProposalStatus::Rejected => "recusada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enviada" => Some(ProposalStatus::Sent),
            "aceita" => Some(ProposalStatus::Accepted),
            "recusada" => Some(ProposalStatus::Rejected),
            _ => None,
        }
    }
}

/// Proposal row joined with the owning institution of its vacancy, which is
/// all the lifecycle rules need to decide who may do what.
#[derive(Debug, Clone)]
pub struct ProposalRecord {
    pub id: i64,
    pub vacancy_id: i64,
    pub candidate_id: i64,
    pub institution_id: i64,
    pub initiator: ActorKind,
    pub status: ProposalStatus,
    pub message: String,
    pub response_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProposalRecord {
    pub fn parties(&self) -> Parties {
        Parties {
            initiator: self.initiator,
            candidate_id: self.candidate_id,
            institution_id: self.institution_id,
        }
    }
}

/// Body of POST /propostas.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProposal {
    pub id_vaga: i64,
    pub id_candidato: i64,
    pub mensagem: String,
}

/// Optional body of the accept/reject endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    pub mensagem_resposta: Option<String>,
}

/// Counterpart contact details, disclosed only on accepted proposals.
/// Identity documents (CPF/CNPJ) are never part of this payload.
#[derive(Debug, Clone, Serialize)]
pub struct Contatos {
    pub email: String,
    pub telefone: String,
}

/// Single-proposal API payload. `contatos` is omitted entirely (not null)
/// unless the viewer is entitled to it.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalResponse {
    pub id: i64,
    #[serde(rename = "id_vaga")]
    pub vacancy_id: i64,
    #[serde(rename = "id_candidato")]
    pub candidate_id: i64,
    #[serde(rename = "iniciador")]
    pub initiator: ActorKind,
    pub status: ProposalStatus,
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "mensagem_resposta", skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
    #[serde(rename = "criada_em")]
    pub created_at: String,
    #[serde(rename = "atualizada_em")]
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contatos: Option<Contatos>,
}

impl ProposalResponse {
    /// Disclosure projection: shapes a record for one viewer, attaching the
    /// counterpart contacts only when the lifecycle says they are visible.
    pub fn project(record: ProposalRecord, contatos: Option<Contatos>) -> Self {
        ProposalResponse {
            id: record.id,
            vacancy_id: record.vacancy_id,
            candidate_id: record.candidate_id,
            initiator: record.initiator,
            status: record.status,
            message: record.message,
            response_message: record.response_message,
            created_at: record.created_at,
            updated_at: record.updated_at,
            contatos,
        }
    }
}

/// Proposal as shown in the paginated list views. Contact disclosure is a
/// single-proposal concern, so list items never carry `contatos`.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalListItem {
    pub id: i64,
    #[serde(rename = "id_vaga")]
    pub vacancy_id: i64,
    #[serde(rename = "vaga_titulo")]
    pub vacancy_title: String,
    #[serde(rename = "id_candidato")]
    pub candidate_id: i64,
    #[serde(rename = "candidato_nome")]
    pub candidate_name: String,
    #[serde(rename = "iniciador")]
    pub initiator: ActorKind,
    pub status: ProposalStatus,
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "criada_em")]
    pub created_at: String,
    #[serde(rename = "atualizada_em")]
    pub updated_at: String,
}

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct ProposalPage {
    pub items: Vec<ProposalListItem>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

/// List orientation: proposals the actor opened vs. proposals addressed to
/// them (`tipo=enviadas|recebidas`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Sent,
    Received,
}

impl ListKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enviadas" => Some(ListKind::Sent),
            "recebidas" => Some(ListKind::Received),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListParams {
    pub kind: ListKind,
    pub status: Option<ProposalStatus>,
    pub page: i64,
    pub per_page: i64,
}
