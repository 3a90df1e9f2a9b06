use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// A validation failure tied to one request field. `field` carries the wire
/// name (`id_vaga`, `id_candidato`, `mensagem`, ...) so clients can attach
/// the message to the offending input.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Session(String),
    Unauthenticated,
    Forbidden(String),
    NotFound,
    Validation(Vec<FieldError>),
    InvalidState(String),
}

impl AppError {
    /// Shorthand for a single-field validation error.
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError {
            field,
            message: message.into(),
        }])
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Unauthenticated => write!(f, "Unauthenticated"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Validation(fields) => {
                write!(f, "Validation failed:")?;
                for fe in fields {
                    write!(f, " {}: {};", fe.field, fe.message)?;
                }
                Ok(())
            }
            AppError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Unauthorized()
                .json(serde_json::json!({ "erro": "Não autenticado" })),
            AppError::Forbidden(msg) => {
                HttpResponse::Forbidden().json(serde_json::json!({ "erro": msg }))
            }
            AppError::NotFound => {
                HttpResponse::NotFound().json(serde_json::json!({ "erro": "Não encontrado" }))
            }
            AppError::Validation(fields) => {
                let campos: serde_json::Map<String, serde_json::Value> = fields
                    .iter()
                    .map(|fe| {
                        (
                            fe.field.to_string(),
                            serde_json::Value::String(fe.message.clone()),
                        )
                    })
                    .collect();
                HttpResponse::UnprocessableEntity()
                    .json(serde_json::json!({ "erro": "Falha de validação", "campos": campos }))
            }
            AppError::InvalidState(msg) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({ "erro": msg }))
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "erro": "Erro interno" }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}
