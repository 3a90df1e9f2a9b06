//! Authorization and transition rules for proposals.
//!
//! Every rule here is a pure function of the acting party and the data on
//! the proposal row: who initiated it, which candidate it binds, which
//! institution owns its vacancy. The recipient side is always derived from
//! `initiator`, never stored, so the two can't drift apart.

use super::types::{ListKind, ProposalStatus};
use crate::auth::session::{Actor, ActorKind};
use crate::errors::AppError;

/// The two parties bound by a proposal, plus who opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parties {
    pub initiator: ActorKind,
    pub candidate_id: i64,
    pub institution_id: i64,
}

impl Parties {
    /// Identity of the given side of the pair.
    pub fn id_of(&self, kind: ActorKind) -> i64 {
        match kind {
            ActorKind::Candidate => self.candidate_id,
            ActorKind::Institution => self.institution_id,
        }
    }

    pub fn is_party(&self, actor: &Actor) -> bool {
        self.id_of(actor.kind) == actor.id
    }

    pub fn is_initiator(&self, actor: &Actor) -> bool {
        actor.kind == self.initiator && self.is_party(actor)
    }

    pub fn is_recipient(&self, actor: &Actor) -> bool {
        actor.kind == self.initiator.opposite() && self.is_party(actor)
    }
}

/// 403 unless the actor is one of the proposal's parties.
pub fn require_party(actor: &Actor, parties: &Parties) -> Result<(), AppError> {
    if parties.is_party(actor) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Você não participa desta proposta".to_string(),
        ))
    }
}

/// Accept/reject is reserved to the recipient side.
pub fn authorize_response(actor: &Actor, parties: &Parties) -> Result<(), AppError> {
    require_party(actor, parties)?;
    if parties.is_recipient(actor) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Apenas o destinatário pode responder à proposta".to_string(),
        ))
    }
}

/// Cancellation is reserved to the initiator.
pub fn authorize_cancel(actor: &Actor, parties: &Parties) -> Result<(), AppError> {
    require_party(actor, parties)?;
    if parties.is_initiator(actor) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Apenas quem criou a proposta pode cancelá-la".to_string(),
        ))
    }
}

/// Responses and cancellation are only legal while the proposal is open.
pub fn require_open(status: ProposalStatus) -> Result<(), AppError> {
    if status == ProposalStatus::Sent {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!(
            "Proposta já está {}",
            status.as_str()
        )))
    }
}

/// Contact details are disclosed only after acceptance.
pub fn discloses_contacts(status: ProposalStatus) -> bool {
    status == ProposalStatus::Accepted
}

/// Which `initiator` value a list orientation selects for the acting party:
/// "enviadas" are proposals the actor's side opened, "recebidas" the ones
/// opened by the other side.
pub fn initiator_for(kind: ListKind, actor_kind: ActorKind) -> ActorKind {
    match kind {
        ListKind::Sent => actor_kind,
        ListKind::Received => actor_kind.opposite(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIES: Parties = Parties {
        initiator: ActorKind::Candidate,
        candidate_id: 7,
        institution_id: 42,
    };

    fn candidate(id: i64) -> Actor {
        Actor {
            kind: ActorKind::Candidate,
            id,
        }
    }

    fn institution(id: i64) -> Actor {
        Actor {
            kind: ActorKind::Institution,
            id,
        }
    }

    #[test]
    fn party_membership() {
        assert!(PARTIES.is_party(&candidate(7)));
        assert!(PARTIES.is_party(&institution(42)));
        assert!(!PARTIES.is_party(&candidate(8)));
        assert!(!PARTIES.is_party(&institution(7)));
    }

    #[test]
    fn recipient_is_opposite_of_initiator() {
        assert!(PARTIES.is_initiator(&candidate(7)));
        assert!(!PARTIES.is_recipient(&candidate(7)));
        assert!(PARTIES.is_recipient(&institution(42)));
        assert!(!PARTIES.is_initiator(&institution(42)));

        let inverted = Parties {
            initiator: ActorKind::Institution,
            ..PARTIES
        };
        assert!(inverted.is_recipient(&candidate(7)));
        assert!(inverted.is_initiator(&institution(42)));
    }

    #[test]
    fn only_recipient_may_respond() {
        assert!(authorize_response(&institution(42), &PARTIES).is_ok());
        assert!(matches!(
            authorize_response(&candidate(7), &PARTIES),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            authorize_response(&institution(43), &PARTIES),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn only_initiator_may_cancel() {
        assert!(authorize_cancel(&candidate(7), &PARTIES).is_ok());
        assert!(matches!(
            authorize_cancel(&institution(42), &PARTIES),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn terminal_statuses_are_closed() {
        assert!(require_open(ProposalStatus::Sent).is_ok());
        assert!(matches!(
            require_open(ProposalStatus::Accepted),
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            require_open(ProposalStatus::Rejected),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn contacts_only_after_acceptance() {
        assert!(discloses_contacts(ProposalStatus::Accepted));
        assert!(!discloses_contacts(ProposalStatus::Sent));
        assert!(!discloses_contacts(ProposalStatus::Rejected));
    }

    #[test]
    fn list_orientation_maps_to_initiator() {
        assert_eq!(
            initiator_for(ListKind::Sent, ActorKind::Candidate),
            ActorKind::Candidate
        );
        assert_eq!(
            initiator_for(ListKind::Received, ActorKind::Candidate),
            ActorKind::Institution
        );
        assert_eq!(
            initiator_for(ListKind::Received, ActorKind::Institution),
            ActorKind::Candidate
        );
    }
}
