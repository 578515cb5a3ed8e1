use serde_json::{Map, Value};
use types::{FailureKind, PlayerEntry, PollResult, ServerStatus};

const MALFORMED_RESPONSE: &str = "malformed response";
const MISSING_DATA: &str = "missing data object";
const UNKNOWN_ERROR: &str = "unknown error";

/// Shape a decoded status API body into a [`PollResult`].
///
/// Fields inside `data` are extracted one by one: a missing or wrong-typed
/// field is dropped without affecting the others, and unknown fields are
/// ignored.
#[must_use]
pub fn validate(raw: &Value) -> PollResult {
    let Some(success) = raw.get("success").and_then(Value::as_bool) else {
        return PollResult::failure(FailureKind::Protocol, MALFORMED_RESPONSE);
    };

    if !success {
        let reason = raw
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR);
        return PollResult::failure(FailureKind::Application, reason);
    }

    let Some(data) = raw.get("data").and_then(Value::as_object) else {
        return PollResult::failure(FailureKind::Protocol, MISSING_DATA);
    };

    PollResult::Success(ServerStatus {
        hostname: string_field(data, "hostname"),
        map: string_field(data, "map"),
        current_players: integer_field(data, "current_players"),
        max_players: integer_field(data, "max_players"),
        game: string_field(data, "game"),
        server_type: string_field(data, "server_type"),
        os: string_field(data, "os"),
        ping: data.get("ping").and_then(Value::as_f64),
        password_protected: bool_field(data, "password_protected"),
        vac_enabled: bool_field(data, "vac_enabled"),
        player_list: data
            .get("player_list")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(player_entry).collect()),
    })
}

fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

fn integer_field(data: &Map<String, Value>, key: &str) -> Option<i64> {
    data.get(key).and_then(Value::as_i64)
}

fn bool_field(data: &Map<String, Value>, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

// older status APIs report connected time as `duration`
fn player_entry(value: &Value) -> Option<PlayerEntry> {
    let entry = value.as_object()?;

    Some(PlayerEntry {
        name: string_field(entry, "name")?,
        score: integer_field(entry, "score"),
        time: entry
            .get("time")
            .or_else(|| entry.get("duration"))
            .and_then(Value::as_f64),
    })
}
