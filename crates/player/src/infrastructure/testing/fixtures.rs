//! Simple test fixtures used across unit tests.

use npc_surprise_shared::{
    Action, ActionId, Character, CharacterId, Player, PlayerId, SessionStatus,
};

use crate::ports::outbound::ApiError;

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

pub fn player(id: i64, name: &str, is_online: bool) -> Player {
    Player {
        id: PlayerId::new(id),
        name: name.to_string(),
        is_online,
    }
}

/// A character with only its name filled in.
pub fn character(id: i64, name: &str) -> Character {
    Character {
        id: CharacterId::new(id),
        owner_player_id: None,
        name: name.to_string(),
        age: String::new(),
        race: String::new(),
        gender: String::new(),
        description: String::new(),
        appearance: String::new(),
        actions: Vec::new(),
    }
}

pub fn owned_character(id: i64, name: &str, owner: i64) -> Character {
    Character {
        owner_player_id: Some(PlayerId::new(owner)),
        ..character(id, name)
    }
}

pub fn action(id: i64, character_id: i64, revealed: bool, content: &str) -> Action {
    Action {
        id: ActionId::new(id),
        character_id: CharacterId::new(character_id),
        revealed,
        kind: "talk".to_string(),
        content: content.to_string(),
        direction: String::new(),
    }
}

pub fn admin_status() -> SessionStatus {
    SessionStatus {
        is_admin: true,
        player_id: Some(PlayerId::ADMIN),
        player_name: Some("admin".to_string()),
    }
}

pub fn player_status(id: i64) -> SessionStatus {
    SessionStatus {
        is_admin: false,
        player_id: Some(PlayerId::new(id)),
        player_name: Some(format!("player-{id}")),
    }
}
