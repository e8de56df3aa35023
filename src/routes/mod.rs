use axum::response::Json;
use serde_json::{json, Value};

pub mod health;
pub mod players;

// GET / - API index
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Ludo Star Player API",
        "endpoints": {
            "GET /api/player/{player_id}": "Get player by ID",
            "POST /api/player": "Add new player",
            "PUT /api/player/{player_id}": "Update player",
            "DELETE /api/player/{player_id}": "Delete player",
            "GET /api/players": "Get all players (with pagination)",
        }
    }))
}
