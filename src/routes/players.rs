use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::ApiError;
use crate::models::{
    encode_old_names, parse_old_names, CreatePlayerRequest, ListPlayersQuery, Pagination, Player,
    PlayerDeletedResponse, PlayerListResponse, PlayerMutationResponse, PlayerResponse,
    UpdatePlayerRequest,
};

const MAX_PAGE_SIZE: i64 = 100;

// GET /api/player/{player_id} - Get player by ID
pub async fn get_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let row = db::get_player(&pool, &player_id)
        .await?
        .ok_or(ApiError::PlayerNotFound { player_id })?;

    Ok(Json(PlayerResponse {
        success: true,
        data: row.into(),
    }))
}

// POST /api/player - Add new player
pub async fn create_player(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerMutationResponse>), ApiError> {
    // Empty strings count as missing.
    let required = |field: &Option<String>| {
        field
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let (Some(player_id), Some(name), Some(uid)) =
        (required(&body.player_id), required(&body.name), required(&body.uid))
    else {
        return Err(ApiError::MissingFields);
    };

    if db::player_id_exists(&pool, &player_id).await? {
        return Err(ApiError::PlayerIdTaken { player_id });
    }

    if let Some(existing_player_id) = db::find_uid_owner(&pool, &uid).await? {
        return Err(ApiError::UidTaken { existing_player_id });
    }

    let old_names = parse_old_names(body.old_names.as_ref());

    // The two existence checks and this insert are separate round trips, so
    // a racing create can slip past the checks; the unique constraint is the
    // backstop and surfaces as a Conflict.
    db::insert_player(&pool, &player_id, &name, &uid, &encode_old_names(&old_names))
        .await
        .map_err(ApiError::from_insert_error)?;

    Ok((
        StatusCode::CREATED,
        Json(PlayerMutationResponse {
            success: true,
            message: "Player added successfully".to_string(),
            data: Player {
                player_id,
                name,
                uid,
                old_names,
            },
        }),
    ))
}

// PUT /api/player/{player_id} - Update player (partial)
pub async fn update_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
    Json(patch): Json<UpdatePlayerRequest>,
) -> Result<Json<PlayerMutationResponse>, ApiError> {
    if db::get_player(&pool, &player_id).await?.is_none() {
        return Err(ApiError::PlayerNotFound { player_id });
    }

    if patch.is_empty() {
        return Err(ApiError::NoFieldsToUpdate);
    }

    db::update_player(&pool, &player_id, &patch).await?;

    // Second round trip; nothing else is expected to write between the two.
    let row = db::get_player(&pool, &player_id)
        .await?
        .ok_or(ApiError::PlayerNotFound { player_id })?;

    Ok(Json(PlayerMutationResponse {
        success: true,
        message: "Player updated successfully".to_string(),
        data: row.into(),
    }))
}

// DELETE /api/player/{player_id} - Delete player
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerDeletedResponse>, ApiError> {
    let affected = db::delete_player(&pool, &player_id).await?;

    if affected == 0 {
        return Err(ApiError::PlayerNotFound { player_id });
    }

    Ok(Json(PlayerDeletedResponse {
        success: true,
        message: "Player deleted successfully".to_string(),
        player_id,
    }))
}

// GET /api/players?page=&limit= - List players with pagination
pub async fn list_players(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListPlayersQuery>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let page: i64 = params
        .page
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);
    // Non-positive limits would disable the cap (SQLite reads a negative
    // LIMIT as unbounded), so they coerce to the default before clamping.
    let limit: i64 = params
        .limit
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(10)
        .min(MAX_PAGE_SIZE);
    // page <= 0 yields a negative offset; SQLite reads that as 0.
    let offset = (page - 1) * limit;

    let total = db::count_players(&pool).await?;
    let rows = db::list_players(&pool, limit, offset).await?;

    let players = rows.into_iter().map(Player::from).collect();
    let total_pages = (total as f64 / limit as f64).ceil() as i64;

    Ok(Json(PlayerListResponse {
        success: true,
        data: players,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }))
}
