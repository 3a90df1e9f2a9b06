use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The two kinds of party that can act on a proposal. Doubles as the
/// `initiator` value stored on each proposal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    #[serde(rename = "candidato")]
    Candidate,
    #[serde(rename = "instituicao")]
    Institution,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Candidate => "candidato",
            ActorKind::Institution => "instituicao",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "candidato" => Some(ActorKind::Candidate),
            "instituicao" => Some(ActorKind::Institution),
            _ => None,
        }
    }

    /// The other side of a proposal. The recipient is always the opposite
    /// of the initiator; it is derived here, never stored.
    pub fn opposite(&self) -> Self {
        match self {
            ActorKind::Candidate => ActorKind::Institution,
            ActorKind::Institution => ActorKind::Candidate,
        }
    }
}

/// The authenticated party acting on this request. Credential checks happen
/// upstream; the session only carries the resolved identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub kind: ActorKind,
    pub id: i64,
}

pub fn get_actor(session: &Session) -> Option<Actor> {
    let kind = session.get::<String>("actor_kind").unwrap_or(None)?;
    let id = session.get::<i64>("actor_id").unwrap_or(None)?;
    Some(Actor {
        kind: ActorKind::parse(&kind)?,
        id,
    })
}

/// Resolve the acting identity or fail with 401.
pub fn require_actor(session: &Session) -> Result<Actor, AppError> {
    get_actor(session).ok_or(AppError::Unauthenticated)
}

pub fn store_actor(session: &Session, actor: &Actor) -> Result<(), AppError> {
    session
        .insert("actor_kind", actor.kind.as_str())
        .map_err(|e| AppError::Session(format!("Failed to store actor kind: {e}")))?;
    session
        .insert("actor_id", actor.id)
        .map_err(|e| AppError::Session(format!("Failed to store actor id: {e}")))?;
    Ok(())
}
