pub mod auth_handlers;
pub mod proposal_handlers;

use actix_web::web;

use crate::auth::middleware::{require_auth, require_json_content_type};

/// Route table, shared by the binary and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sessao")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::post().to(auth_handlers::create))
            .route("", web::delete().to(auth_handlers::destroy)),
    );
    cfg.service(
        web::scope("/propostas")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .wrap(actix_web::middleware::from_fn(require_auth))
            .route("", web::post().to(proposal_handlers::create))
            .route("", web::get().to(proposal_handlers::list))
            .route("/{id}", web::get().to(proposal_handlers::read))
            .route("/{id}/aceitar", web::put().to(proposal_handlers::accept))
            .route("/{id}/recusar", web::put().to(proposal_handlers::reject))
            .route("/{id}", web::delete().to(proposal_handlers::cancel)),
    );
}
