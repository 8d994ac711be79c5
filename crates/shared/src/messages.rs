//! Push messages emitted by the server over the event stream.
//!
//! Every message is a JSON object `{"type": <kind>, "data": <payload>}`.
//! [`decode_server_message`] turns one raw payload into a [`ServerMessage`],
//! classifying the ways it can fail so the caller can log and drop it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::entities::{Action, Character, Player, RevealedFields};
use crate::ids::{ActionId, CharacterId, PlayerId};

/// Full state snapshot sent when a stream (re)connects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitData {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Only present for the admin session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<RevealedFields>>,
}

/// A character together with its visibility record (admin only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterWithFields {
    pub character: Character,
    pub fields: RevealedFields,
}

/// Messages from the server to a client session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(alias = "connected")]
    Init(InitData),
    InitAdmin(InitData),
    /// Redacted characters assigned to the connecting player.
    InitPlayer(Vec<Character>),
    Character(Character),
    CharacterWithFields(CharacterWithFields),
    Action(Action),
    AssignCharacter(Character),
    UnassignCharacter(CharacterId),
    AssignAction(Action),
    UnassignAction(ActionId),
    PlayerConnected(Player),
    PlayerDisconnected(PlayerId),
    DeleteCharacter(CharacterId),
    DeleteAction(ActionId),
    DeletePlayer(PlayerId),
}

impl ServerMessage {
    /// Every `type` tag this client understands.
    pub const KINDS: &'static [&'static str] = &[
        "init",
        "connected",
        "init-admin",
        "init-player",
        "character",
        "character-with-fields",
        "action",
        "assign-character",
        "unassign-character",
        "assign-action",
        "unassign-action",
        "player-connected",
        "player-disconnected",
        "delete-character",
        "delete-action",
        "delete-player",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Init(_) => "init",
            ServerMessage::InitAdmin(_) => "init-admin",
            ServerMessage::InitPlayer(_) => "init-player",
            ServerMessage::Character(_) => "character",
            ServerMessage::CharacterWithFields(_) => "character-with-fields",
            ServerMessage::Action(_) => "action",
            ServerMessage::AssignCharacter(_) => "assign-character",
            ServerMessage::UnassignCharacter(_) => "unassign-character",
            ServerMessage::AssignAction(_) => "assign-action",
            ServerMessage::UnassignAction(_) => "unassign-action",
            ServerMessage::PlayerConnected(_) => "player-connected",
            ServerMessage::PlayerDisconnected(_) => "player-disconnected",
            ServerMessage::DeleteCharacter(_) => "delete-character",
            ServerMessage::DeleteAction(_) => "delete-action",
            ServerMessage::DeletePlayer(_) => "delete-player",
        }
    }
}

/// Why a raw stream payload could not become a [`ServerMessage`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("message is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("message has no string `type` field")]
    MissingKind,
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),
    #[error("invalid `{kind}` payload: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Payload keys older servers used instead of `data` for assign messages.
const LEGACY_PAYLOAD_KEYS: [&str; 2] = ["action", "character"];

pub fn decode_server_message(text: &str) -> Result<ServerMessage, DecodeError> {
    let mut value: Value = serde_json::from_str(text).map_err(DecodeError::Malformed)?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingKind)?
        .to_owned();
    if !ServerMessage::KINDS.contains(&kind.as_str()) {
        return Err(DecodeError::UnknownKind(kind));
    }

    if let Some(object) = value.as_object_mut() {
        if !object.contains_key("data") {
            if let Some(payload) = LEGACY_PAYLOAD_KEYS
                .iter()
                .find_map(|key| object.remove(*key))
            {
                object.insert("data".to_owned(), payload);
            }
        }
    }

    serde_json::from_value(value).map_err(|source| DecodeError::InvalidPayload { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_init_snapshot() {
        let msg = decode_server_message(
            r#"{"type":"init","data":{"players":[{"id":1,"name":"Ana","isOnline":true}],"characters":[]}}"#,
        )
        .expect("init decodes");
        match msg {
            ServerMessage::Init(data) => {
                assert_eq!(data.players.len(), 1);
                assert!(data.players[0].is_online);
                assert!(data.fields.is_none());
            }
            other => panic!("Expected Init, got {:?}", other),
        }
    }

    #[test]
    fn connected_is_an_alias_for_init() {
        let msg = decode_server_message(r#"{"type":"connected","data":{"players":[],"characters":[]}}"#)
            .expect("connected decodes");
        assert_eq!(msg.kind(), "init");
    }

    #[test]
    fn decodes_id_payloads() {
        let msg = decode_server_message(r#"{"type":"player-disconnected","data":9}"#)
            .expect("decodes");
        assert_eq!(msg, ServerMessage::PlayerDisconnected(PlayerId::new(9)));

        let msg = decode_server_message(r#"{"type":"delete-character","data":7}"#)
            .expect("decodes");
        assert_eq!(msg, ServerMessage::DeleteCharacter(CharacterId::new(7)));
    }

    #[test]
    fn decodes_character_with_fields() {
        let msg = decode_server_message(
            r#"{"type":"character-with-fields","data":{"character":{"id":3,"name":"Vex"},"fields":{"characterId":3,"name":true}}}"#,
        )
        .expect("decodes");
        match msg {
            ServerMessage::CharacterWithFields(data) => {
                assert_eq!(data.character.name, "Vex");
                assert!(data.fields.name);
                assert!(!data.fields.age);
            }
            other => panic!("Expected CharacterWithFields, got {:?}", other),
        }
    }

    #[test]
    fn accepts_legacy_assign_action() {
        let msg = decode_server_message(
            r#"{"type":"assign-action","action":{"id":5,"player_id":1,"character_id":2,"content":"Run"}}"#,
        )
        .expect("legacy payload decodes");
        match msg {
            ServerMessage::AssignAction(action) => {
                assert_eq!(action.content, "Run");
                assert_eq!(action.character_id, CharacterId::new(2));
            }
            other => panic!("Expected AssignAction, got {:?}", other),
        }
    }

    #[test]
    fn accepts_legacy_assign_character() {
        let msg = decode_server_message(
            r#"{"type":"assign-character","character":{"id":3,"player_id":1,"name":"Vex","age":"","race":"elf","gender":"","description":"","appearance":""}}"#,
        )
        .expect("legacy payload decodes");
        match msg {
            ServerMessage::AssignCharacter(character) => {
                assert_eq!(character.owner_player_id, Some(PlayerId::new(1)));
                assert_eq!(character.race, "elf");
            }
            other => panic!("Expected AssignCharacter, got {:?}", other),
        }
    }

    #[test]
    fn classifies_failures() {
        assert!(matches!(
            decode_server_message("not json"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode_server_message(r#"{"data":1}"#),
            Err(DecodeError::MissingKind)
        ));
        assert!(matches!(
            decode_server_message(r#"{"type":"dance","data":1}"#),
            Err(DecodeError::UnknownKind(kind)) if kind == "dance"
        ));
        assert!(matches!(
            decode_server_message(r#"{"type":"delete-player","data":"seven"}"#),
            Err(DecodeError::InvalidPayload { kind, .. }) if kind == "delete-player"
        ));
    }

    #[test]
    fn every_kind_is_listed() {
        let samples = [
            ServerMessage::InitPlayer(Vec::new()),
            ServerMessage::UnassignAction(ActionId::new(1)),
            ServerMessage::DeletePlayer(PlayerId::new(1)),
        ];
        for msg in samples {
            assert!(ServerMessage::KINDS.contains(&msg.kind()));
            let encoded = serde_json::to_string(&msg).expect("encodes");
            assert_eq!(decode_server_message(&encoded).expect("decodes"), msg);
        }
    }
}
