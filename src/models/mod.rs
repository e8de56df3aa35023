use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Row from the `players` table; `old_names` is the raw stored text blob.
#[derive(Debug, sqlx::FromRow)]
pub struct PlayerRow {
    pub player_id: String,
    pub name: String,
    pub uid: String,
    pub old_names: Option<String>,
}

/// Player as returned to API clients, with `old_names` denormalized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub uid: String,
    pub old_names: Vec<String>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player {
            player_id: row.player_id,
            name: row.name,
            uid: row.uid,
            old_names: decode_old_names(row.old_names.as_deref()),
        }
    }
}

/// Normalizes any inbound `old_names` value into a list of names.
///
/// Absent or null input means "no history". A JSON string is decoded as a
/// serialized array; a JSON array is taken as-is. Anything malformed or of
/// another type coerces to the empty list rather than erroring.
pub fn parse_old_names(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::String(text)) => decode_old_names(Some(text)),
        Some(value @ Value::Array(_)) => {
            serde_json::from_value(value.clone()).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

/// Decodes the stored `old_names` text blob; same coercion policy as
/// [`parse_old_names`].
pub fn decode_old_names(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or_default()
}

/// Serializes a name list for storage.
pub fn encode_old_names(names: &[String]) -> String {
    serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string())
}

/// Body for POST /api/player. Required fields are deserialized as options so
/// missing ones produce the contract's 400 response instead of a serde
/// rejection.
#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub player_id: Option<String>,
    pub name: Option<String>,
    pub uid: Option<String>,
    pub old_names: Option<Value>,
}

/// Body for PUT /api/player/{player_id}. Each field is tagged presence:
/// outer `None` means the field was absent (leave it alone), `Some(None)`
/// means an explicit null was sent.
#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub uid: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub old_names: Option<Option<Value>>,
}

impl UpdatePlayerRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.uid.is_none() && self.old_names.is_none()
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

// Query parameters for listing players. Kept as raw strings so a
// non-numeric value falls back to the default instead of failing
// deserialization outside the response envelope.
#[derive(Debug, Deserialize)]
pub struct ListPlayersQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Pagination block for GET /api/players; `limit` is the clamped value
/// actually used.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

// Response envelopes; every success response carries `success: true`.

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub success: bool,
    pub data: Player,
}

#[derive(Debug, Serialize)]
pub struct PlayerMutationResponse {
    pub success: bool,
    pub message: String,
    pub data: Player,
}

#[derive(Debug, Serialize)]
pub struct PlayerDeletedResponse {
    pub success: bool,
    pub message: String,
    pub player_id: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub success: bool,
    pub data: Vec<Player>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_absent_and_null_are_empty() {
        assert_eq!(parse_old_names(None), Vec::<String>::new());
        assert_eq!(parse_old_names(Some(&Value::Null)), Vec::<String>::new());
    }

    #[test]
    fn parse_valid_serialized_array() {
        let raw = json!("[\"Alice\",\"Alicia\"]");
        assert_eq!(parse_old_names(Some(&raw)), vec!["Alice", "Alicia"]);
    }

    #[test]
    fn parse_inline_array() {
        let raw = json!(["old", "older"]);
        assert_eq!(parse_old_names(Some(&raw)), vec!["old", "older"]);
    }

    #[test]
    fn parse_malformed_inputs_coerce_to_empty() {
        for raw in [
            json!("not json"),
            json!("{\"a\":1}"),
            json!(""),
            json!(42),
            json!(true),
            json!({"a": 1}),
            json!([1, 2, 3]),
        ] {
            assert_eq!(parse_old_names(Some(&raw)), Vec::<String>::new());
        }
    }

    #[test]
    fn decode_malformed_stored_text_is_empty() {
        assert_eq!(decode_old_names(None), Vec::<String>::new());
        assert_eq!(decode_old_names(Some("")), Vec::<String>::new());
        assert_eq!(decode_old_names(Some("garbage")), Vec::<String>::new());
        assert_eq!(decode_old_names(Some("{}")), Vec::<String>::new());
    }

    #[test]
    fn encode_decode_round_trip() {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(decode_old_names(Some(&encode_old_names(&names))), names);
        assert_eq!(
            decode_old_names(Some(&encode_old_names(&[]))),
            Vec::<String>::new()
        );
    }

    #[test]
    fn update_request_tracks_presence_not_truthiness() {
        let patch: UpdatePlayerRequest =
            serde_json::from_str("{\"old_names\":null}").unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.old_names, Some(None));
        assert!(!patch.is_empty());

        let empty: UpdatePlayerRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
