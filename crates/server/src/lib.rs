use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod accounts;
mod budgets;
mod categories;
mod debts;
mod investments;
mod recurring;
mod reminders;
mod reports;
mod savings_goals;
mod server;
mod split_bills;
mod tags;
mod transactions;
mod transfers;
mod users;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    Unauthorized,
}

#[derive(Serialize)]
struct Error {
    error: String,
}

/// JSON body extractor whose rejection renders as `{"error": ...}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejection renders as `{"error": ...}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct ApiQuery<T>(pub T);

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::InvalidState(_) | EngineError::Conflict(_) => {
            StatusCode::CONFLICT
        }
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidInput(_)
        | EngineError::InvalidName(_)
        | EngineError::CurrencyMismatch(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "missing x-user-id header".to_string(),
            ),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

/// Owner named in a list query. A blank `userId` counts as absent.
pub(crate) fn listed_owner(user_id: Option<String>) -> Option<String> {
    user_id.filter(|user_id| !user_id.trim().is_empty())
}

/// Owner claimed by the caller on the routes without the identity header.
pub(crate) fn claimed_user(user_id: Option<String>) -> Result<String, ServerError> {
    listed_owner(user_id).ok_or_else(|| ServerError::Generic("userId is required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflicts_map_to_409() {
        for err in [
            EngineError::ExistingKey("x".to_string()),
            EngineError::InvalidState("x".to_string()),
            EngineError::Conflict("x".to_string()),
        ] {
            assert_eq!(ServerError::from(err).into_response().status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn engine_validation_maps_to_400() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidInput("x".to_string()),
            EngineError::InvalidName("x".to_string()),
            EngineError::CurrencyMismatch("x".to_string()),
        ] {
            assert_eq!(
                ServerError::from(err).into_response().status(),
                StatusCode::BAD_REQUEST
            );
        }
    }

    #[test]
    fn database_errors_are_masked() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("secret".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_identity_maps_to_401() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn claimed_user_must_be_present() {
        assert_eq!(claimed_user(Some("u1".to_string())).ok(), Some("u1".to_string()));
        assert!(claimed_user(Some("  ".to_string())).is_err());
        assert!(claimed_user(None).is_err());
    }

    #[test]
    fn blank_listed_owner_is_absent() {
        assert_eq!(listed_owner(Some("u1".to_string())), Some("u1".to_string()));
        assert_eq!(listed_owner(Some(String::new())), None);
        assert_eq!(listed_owner(Some(" \t".to_string())), None);
        assert_eq!(listed_owner(None), None);
    }
}
