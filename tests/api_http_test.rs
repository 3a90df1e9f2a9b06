//! HTTP round-trips over the full route table: session cookie flow, status
//! codes and response shapes.

mod common;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::http::StatusCode;
use actix_web::{App, cookie::Key, test, web};
use serde_json::json;

use apoia::handlers;
use apoia::models::vacancy::VacancyStatus;

use common::*;

macro_rules! spawn_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .cookie_http_only(true)
                        .build(),
                )
                .app_data(web::Data::new($pool.clone()))
                .configure(handlers::configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $tipo:expr, $id:expr) => {{
        let req = test::TestRequest::post()
            .uri("/sessao")
            .set_json(json!({ "tipo": $tipo, "id": $id }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "login failed");
        resp.response()
            .cookies()
            .find(|c| c.name() == "id")
            .expect("session cookie")
            .into_owned()
    }};
}

#[actix_rt::test]
async fn requests_without_session_are_unauthorized() {
    let db = setup_test_db().await;
    let app = spawn_app!(db.pool());

    let req = test::TestRequest::get()
        .uri("/propostas?tipo=enviadas")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/propostas")
        .set_json(json!({ "id_vaga": 1, "id_candidato": 1, "mensagem": "Tenho interesse." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn mutations_require_json_content_type() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let cand = seed_candidate(pool, "Ana", "ana@test.com").await;
    let app = spawn_app!(pool);

    let cookie = login!(app, "candidato", cand);
    let req = test::TestRequest::post()
        .uri("/propostas")
        .cookie(cookie)
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("id_vaga=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn session_requires_existing_profile() {
    let db = setup_test_db().await;
    let app = spawn_app!(db.pool());

    let req = test::TestRequest::post()
        .uri("/sessao")
        .set_json(json!({ "tipo": "candidato", "id": 42 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/sessao")
        .set_json(json!({ "tipo": "diretor", "id": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_rt::test]
async fn full_lifecycle_over_http() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let cand = seed_candidate(pool, "Ana", "ana@test.com").await;
    let inst = seed_institution(pool, "Escola A", "a@escola.com").await;
    let vaga = seed_vacancy(pool, inst, VacancyStatus::Active).await;
    let app = spawn_app!(pool);

    let cand_cookie = login!(app, "candidato", cand);
    let inst_cookie = login!(app, "instituicao", inst);

    // Candidate opens the proposal.
    let req = test::TestRequest::post()
        .uri("/propostas")
        .cookie(cand_cookie.clone())
        .set_json(json!({
            "id_vaga": vaga,
            "id_candidato": cand,
            "mensagem": "Tenho interesse nesta vaga."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "enviada");
    assert!(body.get("contatos").is_none());
    let id = body["id"].as_i64().expect("proposal id");

    // A second identical submission is a duplicate.
    let req = test::TestRequest::post()
        .uri("/propostas")
        .cookie(cand_cookie.clone())
        .set_json(json!({
            "id_vaga": vaga,
            "id_candidato": cand,
            "mensagem": "Tenho interesse nesta vaga."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["campos"].get("id_vaga").is_some());

    // The institution accepts; contacts come back in the same response.
    let req = test::TestRequest::put()
        .uri(&format!("/propostas/{id}/aceitar"))
        .cookie(inst_cookie.clone())
        .set_json(json!({ "mensagem_resposta": "Podemos conversar segunda." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "aceita");
    assert_eq!(body["contatos"]["email"], "ana@test.com");

    // Accepting twice is a state conflict.
    let req = test::TestRequest::put()
        .uri(&format!("/propostas/{id}/aceitar"))
        .cookie(inst_cookie.clone())
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The candidate sees the institution's contacts on the detail view.
    let req = test::TestRequest::get()
        .uri(&format!("/propostas/{id}"))
        .cookie(cand_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["contatos"]["email"], "a@escola.com");

    // And the proposal shows up in the candidate's sent listing.
    let req = test::TestRequest::get()
        .uri("/propostas?tipo=enviadas")
        .cookie(cand_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], id);
}

#[actix_rt::test]
async fn third_parties_get_403_and_initiators_cannot_accept() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let cand = seed_candidate(pool, "Ana", "ana@test.com").await;
    let intruder = seed_candidate(pool, "Bia", "bia@test.com").await;
    let inst = seed_institution(pool, "Escola A", "a@escola.com").await;
    let vaga = seed_vacancy(pool, inst, VacancyStatus::Active).await;
    let app = spawn_app!(pool);

    let cand_cookie = login!(app, "candidato", cand);
    let intruder_cookie = login!(app, "candidato", intruder);

    let req = test::TestRequest::post()
        .uri("/propostas")
        .cookie(cand_cookie.clone())
        .set_json(json!({
            "id_vaga": vaga,
            "id_candidato": cand,
            "mensagem": "Tenho interesse nesta vaga."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["id"].as_i64().expect("proposal id");

    let req = test::TestRequest::get()
        .uri(&format!("/propostas/{id}"))
        .cookie(intruder_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The initiator may not act as the recipient.
    let req = test::TestRequest::put()
        .uri(&format!("/propostas/{id}/recusar"))
        .cookie(cand_cookie.clone())
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn create_against_paused_vacancy_is_rejected() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let cand = seed_candidate(pool, "Ana", "ana@test.com").await;
    let inst = seed_institution(pool, "Escola A", "a@escola.com").await;
    let vaga = seed_vacancy(pool, inst, VacancyStatus::Paused).await;
    let app = spawn_app!(pool);

    let cookie = login!(app, "candidato", cand);
    let req = test::TestRequest::post()
        .uri("/propostas")
        .cookie(cookie)
        .set_json(json!({
            "id_vaga": vaga,
            "id_candidato": cand,
            "mensagem": "Tenho interesse nesta vaga."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["campos"].get("id_vaga").is_some());
}

#[actix_rt::test]
async fn cancel_over_http_removes_the_proposal() {
    let db = setup_test_db().await;
    let pool = db.pool();
    let cand = seed_candidate(pool, "Ana", "ana@test.com").await;
    let inst = seed_institution(pool, "Escola A", "a@escola.com").await;
    let vaga = seed_vacancy(pool, inst, VacancyStatus::Active).await;
    let app = spawn_app!(pool);

    let cand_cookie = login!(app, "candidato", cand);
    let inst_cookie = login!(app, "instituicao", inst);

    let req = test::TestRequest::post()
        .uri("/propostas")
        .cookie(cand_cookie.clone())
        .set_json(json!({
            "id_vaga": vaga,
            "id_candidato": cand,
            "mensagem": "Tenho interesse nesta vaga."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["id"].as_i64().expect("proposal id");

    // The recipient may not cancel.
    let req = test::TestRequest::delete()
        .uri(&format!("/propostas/{id}"))
        .cookie(inst_cookie.clone())
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/propostas/{id}"))
        .cookie(cand_cookie.clone())
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/propostas/{id}"))
        .cookie(cand_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
