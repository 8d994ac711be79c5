//! The immutable snapshot the store publishes.

use npc_surprise_shared::{
    Action, ActionId, Character, CharacterId, Player, PlayerId, RevealedFields, SessionStatus,
};

/// One consistent view of every collection, as of the last applied event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub(crate) revision: u64,
    pub(crate) loaded: bool,
    pub(crate) status: Option<SessionStatus>,
    pub(crate) players: Vec<Player>,
    pub(crate) characters: Vec<Character>,
    pub(crate) revealed_fields: Vec<RevealedFields>,
}

impl Snapshot {
    /// Number of events that changed the store so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// False until the first full snapshot event arrived; empty collections
    /// before that mean "not yet loaded".
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn status(&self) -> Option<&SessionStatus> {
        self.status.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.is_admin)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn revealed_fields(&self) -> &[RevealedFields] {
        &self.revealed_fields
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn fields_for(&self, id: CharacterId) -> Option<&RevealedFields> {
        self.revealed_fields.iter().find(|f| f.character_id == id)
    }

    /// Finds an action by id alone, for events that only carry the action id.
    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.characters.iter().find_map(|c| c.action(id))
    }

    /// Equal ignoring the revision counter.
    pub(crate) fn same_data(&self, other: &Snapshot) -> bool {
        self.loaded == other.loaded
            && self.status == other.status
            && self.players == other.players
            && self.characters == other.characters
            && self.revealed_fields == other.revealed_fields
    }
}
