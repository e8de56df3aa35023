use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error taxonomy for the player endpoints. Every variant renders the
/// `success: false` envelope; internal errors expose the underlying store
/// error text to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields: player_id, name, and uid are required")]
    MissingFields,
    #[error("No fields to update")]
    NoFieldsToUpdate,
    #[error("Player not found")]
    PlayerNotFound { player_id: String },
    #[error("Player ID already exists")]
    PlayerIdTaken { player_id: String },
    #[error("UID already exists")]
    UidTaken { existing_player_id: String },
    #[error("Duplicate entry detected")]
    DuplicateEntry(sqlx::Error),
    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingFields | ApiError::NoFieldsToUpdate => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": self.to_string() }),
            ),
            ApiError::PlayerNotFound { ref player_id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "success": false,
                    "message": self.to_string(),
                    "player_id": player_id,
                }),
            ),
            ApiError::PlayerIdTaken { ref player_id } => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": self.to_string(),
                    "player_id": player_id,
                }),
            ),
            ApiError::UidTaken { ref existing_player_id } => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": self.to_string(),
                    "existing_player_id": existing_player_id,
                }),
            ),
            ApiError::DuplicateEntry(ref err) => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": self.to_string(),
                    "error": err.to_string(),
                }),
            ),
            ApiError::Database(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "message": self.to_string(),
                    "error": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// Maps an insert failure: the unique-constraint signal from the racing
    /// create becomes a Conflict, anything else stays an internal error.
    pub fn from_insert_error(err: sqlx::Error) -> Self {
        let is_duplicate = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if is_duplicate {
            ApiError::DuplicateEntry(err)
        } else {
            ApiError::Database(err)
        }
    }
}
