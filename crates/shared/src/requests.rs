//! Request bodies for the command API.

use serde::{Deserialize, Serialize};

use crate::entities::{Action, Character};
use crate::ids::{CharacterId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

/// Editable character fields, used to create or update a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInput {
    #[serde(
        rename = "playerId",
        alias = "player_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_player_id: Option<PlayerId>,
    pub name: String,
    pub age: String,
    pub race: String,
    pub gender: String,
    pub description: String,
    pub appearance: String,
}

impl From<&Character> for CharacterInput {
    fn from(character: &Character) -> Self {
        Self {
            owner_player_id: character.owner_player_id,
            name: character.name.clone(),
            age: character.age.clone(),
            race: character.race.clone(),
            gender: character.gender.clone(),
            description: character.description.clone(),
            appearance: character.appearance.clone(),
        }
    }
}

/// Editable action fields, used to create or update an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
    pub character_id: CharacterId,
    #[serde(default)]
    pub revealed: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub direction: String,
}

impl From<&Action> for ActionInput {
    fn from(action: &Action) -> Self {
        Self {
            character_id: action.character_id,
            revealed: action.revealed,
            kind: action.kind.clone(),
            content: action.content.clone(),
            direction: action.direction.clone(),
        }
    }
}
