use sqlx::sqlite::SqlitePool;
use sqlx::QueryBuilder;

use crate::models::{PlayerRow, UpdatePlayerRequest};
use crate::models::{encode_old_names, parse_old_names};

/// Creates the `players` table if it does not exist yet. Run once at
/// startup; tests use it against in-memory databases.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               player_id TEXT PRIMARY KEY,
               name      TEXT NOT NULL,
               uid       TEXT NOT NULL UNIQUE,
               old_names TEXT
           )"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_player(
    pool: &SqlitePool,
    player_id: &str,
) -> Result<Option<PlayerRow>, sqlx::Error> {
    sqlx::query_as::<_, PlayerRow>(r#"SELECT * FROM players WHERE player_id = ?"#)
        .bind(player_id)
        .fetch_optional(pool)
        .await
}

pub async fn player_id_exists(pool: &SqlitePool, player_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as(r#"SELECT player_id FROM players WHERE player_id = ?"#)
            .bind(player_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// Returns the `player_id` currently holding the given uid, if any.
pub async fn find_uid_owner(pool: &SqlitePool, uid: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(r#"SELECT player_id FROM players WHERE uid = ?"#)
        .bind(uid)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(player_id,)| player_id))
}

pub async fn insert_player(
    pool: &SqlitePool,
    player_id: &str,
    name: &str,
    uid: &str,
    old_names_json: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"INSERT INTO players (player_id, name, uid, old_names) VALUES (?, ?, ?, ?)"#)
        .bind(player_id)
        .bind(name)
        .bind(uid)
        .bind(old_names_json)
        .execute(pool)
        .await?;
    Ok(())
}

/// Applies a partial update; only fields present in the patch make it into
/// the SET list. The caller has already rejected an empty patch.
pub async fn update_player(
    pool: &SqlitePool,
    player_id: &str,
    patch: &UpdatePlayerRequest,
) -> Result<(), sqlx::Error> {
    let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE players SET ");
    let mut fields = builder.separated(", ");

    if let Some(name) = &patch.name {
        fields.push("name = ");
        fields.push_bind_unseparated(name.clone());
    }
    if let Some(uid) = &patch.uid {
        fields.push("uid = ");
        fields.push_bind_unseparated(uid.clone());
    }
    if let Some(old_names) = &patch.old_names {
        let normalized = parse_old_names(old_names.as_ref());
        fields.push("old_names = ");
        fields.push_bind_unseparated(encode_old_names(&normalized));
    }

    builder.push(" WHERE player_id = ");
    builder.push_bind(player_id);

    builder.build().execute(pool).await?;
    Ok(())
}

/// Deletes one player; returns the number of affected rows.
pub async fn delete_player(pool: &SqlitePool, player_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM players WHERE player_id = ?"#)
        .bind(player_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_players(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM players"#)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Bounded page of players. A negative offset is passed through unguarded;
/// SQLite treats it as zero.
pub async fn list_players(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PlayerRow>, sqlx::Error> {
    sqlx::query_as::<_, PlayerRow>(r#"SELECT * FROM players LIMIT ? OFFSET ?"#)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}
