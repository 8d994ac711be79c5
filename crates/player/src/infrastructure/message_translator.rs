//! Translates ServerMessage from the wire into StoreEvent for the store
//!
//! The store never sees wire types. Every ServerMessage variant is handled
//! explicitly; adding a wire kind without deciding what it does to the store
//! is a compile error.

use npc_surprise_shared::ServerMessage;

use crate::state::StoreEvent;

/// Translate a ServerMessage into a StoreEvent
pub fn translate(msg: ServerMessage) -> StoreEvent {
    match msg {
        // =====================================================================
        // Snapshots
        // =====================================================================
        ServerMessage::Init(data) | ServerMessage::InitAdmin(data) => StoreEvent::Snapshot {
            players: data.players,
            characters: data.characters,
            fields: data.fields,
        },

        // A player's snapshot only carries their own characters.
        ServerMessage::InitPlayer(characters) => StoreEvent::Snapshot {
            players: Vec::new(),
            characters,
            fields: None,
        },

        // =====================================================================
        // Upserts
        // =====================================================================
        ServerMessage::Character(character) => StoreEvent::CharacterUpserted {
            character,
            fields: None,
        },
        ServerMessage::CharacterWithFields(data) => StoreEvent::CharacterUpserted {
            character: data.character,
            fields: Some(data.fields),
        },
        ServerMessage::Action(action) => StoreEvent::ActionUpserted(action),

        // =====================================================================
        // Assignment
        // =====================================================================
        ServerMessage::AssignCharacter(character) => StoreEvent::CharacterAssigned(character),
        ServerMessage::UnassignCharacter(id) => StoreEvent::CharacterUnassigned(id),
        ServerMessage::AssignAction(action) => StoreEvent::ActionAssigned(action),
        ServerMessage::UnassignAction(id) => StoreEvent::ActionUnassigned(id),

        // =====================================================================
        // Presence
        // =====================================================================
        ServerMessage::PlayerConnected(player) => StoreEvent::PlayerConnected(player),
        ServerMessage::PlayerDisconnected(id) => StoreEvent::PlayerDisconnected(id),

        // =====================================================================
        // Deletes
        // =====================================================================
        ServerMessage::DeleteCharacter(id) => StoreEvent::CharacterDeleted(id),
        ServerMessage::DeleteAction(id) => StoreEvent::ActionDeleted(id),
        ServerMessage::DeletePlayer(id) => StoreEvent::PlayerDeleted(id),
    }
}
