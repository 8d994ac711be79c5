//! Events the reducer understands.
//!
//! Wire messages are translated into these by
//! `infrastructure::message_translator`; `StatusChanged` is produced locally.

use npc_surprise_shared::{
    Action, ActionId, Character, CharacterId, Player, PlayerId, RevealedFields, SessionStatus,
};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Replace players and characters wholesale. `fields` is only known to
    /// the admin session.
    Snapshot {
        players: Vec<Player>,
        characters: Vec<Character>,
        fields: Option<Vec<RevealedFields>>,
    },
    CharacterUpserted {
        character: Character,
        fields: Option<RevealedFields>,
    },
    ActionUpserted(Action),
    CharacterAssigned(Character),
    CharacterUnassigned(CharacterId),
    ActionAssigned(Action),
    ActionUnassigned(ActionId),
    PlayerConnected(Player),
    PlayerDisconnected(PlayerId),
    CharacterDeleted(CharacterId),
    ActionDeleted(ActionId),
    PlayerDeleted(PlayerId),
    /// Session identity changed; `None` means unauthenticated.
    StatusChanged(Option<SessionStatus>),
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::Snapshot { .. } => "snapshot",
            StoreEvent::CharacterUpserted { .. } => "character",
            StoreEvent::ActionUpserted(_) => "action",
            StoreEvent::CharacterAssigned(_) => "assign-character",
            StoreEvent::CharacterUnassigned(_) => "unassign-character",
            StoreEvent::ActionAssigned(_) => "assign-action",
            StoreEvent::ActionUnassigned(_) => "unassign-action",
            StoreEvent::PlayerConnected(_) => "player-connected",
            StoreEvent::PlayerDisconnected(_) => "player-disconnected",
            StoreEvent::CharacterDeleted(_) => "delete-character",
            StoreEvent::ActionDeleted(_) => "delete-action",
            StoreEvent::PlayerDeleted(_) => "delete-player",
            StoreEvent::StatusChanged(_) => "status",
        }
    }
}
