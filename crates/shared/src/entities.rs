//! Entities exchanged between the server and the clients.
//!
//! These mirror the JSON the server emits. String fields default to empty when
//! absent because the server redacts hidden character fields by blanking them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, CharacterId, PlayerId};

/// A connected (or previously connected) player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Runtime flag, only flipped by connect/disconnect events.
    #[serde(default)]
    pub is_online: bool,
}

/// A narrative action attached to exactly one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    #[serde(alias = "character_id")]
    pub character_id: CharacterId,
    #[serde(default)]
    pub revealed: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub direction: String,
}

/// A character, with its actions inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    #[serde(
        rename = "playerId",
        alias = "ownerPlayerId",
        alias = "player_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_player_id: Option<PlayerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Character {
    pub fn field(&self, field: CharacterField) -> &str {
        match field {
            CharacterField::Name => &self.name,
            CharacterField::Race => &self.race,
            CharacterField::Gender => &self.gender,
            CharacterField::Age => &self.age,
            CharacterField::Description => &self.description,
            CharacterField::Appearance => &self.appearance,
        }
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }
}

/// The character fields whose visibility the game master controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterField {
    Name,
    Race,
    Gender,
    Age,
    Description,
    Appearance,
}

impl CharacterField {
    pub const ALL: [CharacterField; 6] = [
        CharacterField::Name,
        CharacterField::Race,
        CharacterField::Gender,
        CharacterField::Age,
        CharacterField::Description,
        CharacterField::Appearance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CharacterField::Name => "name",
            CharacterField::Race => "race",
            CharacterField::Gender => "gender",
            CharacterField::Age => "age",
            CharacterField::Description => "description",
            CharacterField::Appearance => "appearance",
        }
    }
}

impl fmt::Display for CharacterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CharacterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.label() == wanted)
            .ok_or_else(|| format!("unknown character field: {s}"))
    }
}

/// Per-field visibility of one character for the player view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedFields {
    #[serde(alias = "character_id")]
    pub character_id: CharacterId,
    #[serde(default)]
    pub name: bool,
    #[serde(default)]
    pub race: bool,
    #[serde(default)]
    pub gender: bool,
    #[serde(default)]
    pub age: bool,
    #[serde(default)]
    pub description: bool,
    #[serde(default)]
    pub appearance: bool,
}

impl RevealedFields {
    /// Everything hidden; what the server starts a new character with.
    pub fn hidden(character_id: CharacterId) -> Self {
        Self {
            character_id,
            name: false,
            race: false,
            gender: false,
            age: false,
            description: false,
            appearance: false,
        }
    }

    /// Reconstructs visibility from a payload the server already redacted:
    /// blanked fields were hidden.
    pub fn from_redacted(character: &Character) -> Self {
        let mut fields = Self::hidden(character.id);
        for field in CharacterField::ALL {
            fields.set(field, !character.field(field).is_empty());
        }
        fields
    }

    pub fn get(&self, field: CharacterField) -> bool {
        match field {
            CharacterField::Name => self.name,
            CharacterField::Race => self.race,
            CharacterField::Gender => self.gender,
            CharacterField::Age => self.age,
            CharacterField::Description => self.description,
            CharacterField::Appearance => self.appearance,
        }
    }

    pub fn set(&mut self, field: CharacterField, revealed: bool) {
        let slot = match field {
            CharacterField::Name => &mut self.name,
            CharacterField::Race => &mut self.race,
            CharacterField::Gender => &mut self.gender,
            CharacterField::Age => &mut self.age,
            CharacterField::Description => &mut self.description,
            CharacterField::Appearance => &mut self.appearance,
        };
        *slot = revealed;
    }

    pub fn toggled(mut self, field: CharacterField) -> Self {
        self.set(field, !self.get(field));
        self
    }

    pub fn any_revealed(&self) -> bool {
        CharacterField::ALL.into_iter().any(|field| self.get(field))
    }
}

/// Identity of the current client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub player_id: Option<PlayerId>,
    #[serde(
        alias = "name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub player_name: Option<String>,
}

impl SessionStatus {
    /// A status response without a player id means no session cookie.
    pub fn is_logged_in(&self) -> bool {
        self.is_admin || self.player_id.is_some()
    }
}
