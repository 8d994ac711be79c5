//! Typed API wrapper over the object-safe [`RawApiPort`].
//!
//! Commands here never touch the store. Their effects come back through the
//! event stream; a failed command is only reported to the caller.

use std::sync::Arc;

use npc_surprise_shared::{
    Action, ActionId, ActionInput, Character, CharacterField, CharacterId, CharacterInput,
    LoginRequest, Player, PlayerId, RevealedFields, SessionStatus,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.raw.get_json(path).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        let value = self.raw.post_json(path, &body_value).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        let value = self.raw.put_json(path, &body_value).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn put_no_response<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        self.raw.put_json(path, &body_value).await.map(|_| ())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Logs in by name. The session cookie lands in the shared jar.
    pub async fn login(&self, name: &str) -> Result<SessionStatus, ApiError> {
        let request = LoginRequest {
            name: name.to_string(),
        };
        let mut status: SessionStatus = self.post("login", &request).await?;
        // Older servers answer login with only the player id/name.
        if status.player_name.is_none() {
            status.player_name = Some(request.name);
        }
        Ok(status)
    }

    pub async fn status(&self) -> Result<SessionStatus, ApiError> {
        self.get("status").await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn get_players(&self) -> Result<Vec<Player>, ApiError> {
        self.get("players").await
    }

    pub async fn get_characters(&self) -> Result<Vec<Character>, ApiError> {
        self.get("characters").await
    }

    // =========================================================================
    // Characters
    // =========================================================================

    pub async fn create_character(&self, input: &CharacterInput) -> Result<Character, ApiError> {
        self.post("characters", input).await
    }

    pub async fn update_character(
        &self,
        id: CharacterId,
        input: &CharacterInput,
    ) -> Result<Character, ApiError> {
        self.put(&format!("characters/{id}"), input).await
    }

    pub async fn delete_character(&self, id: CharacterId) -> Result<(), ApiError> {
        self.raw.delete(&format!("characters/{id}")).await
    }

    pub async fn assign_character(
        &self,
        character_id: CharacterId,
        player_id: PlayerId,
    ) -> Result<(), ApiError> {
        self.raw
            .put_empty(&format!("characters/{character_id}/assign/{player_id}"))
            .await
    }

    pub async fn unassign_character(&self, character_id: CharacterId) -> Result<(), ApiError> {
        self.raw
            .put_empty(&format!("characters/{character_id}/unassign"))
            .await
    }

    pub async fn update_revealed_fields(
        &self,
        character_id: CharacterId,
        fields: &RevealedFields,
    ) -> Result<(), ApiError> {
        self.put_no_response(&format!("characters/{character_id}/reveal"), fields)
            .await
    }

    /// Sends `fields` with `field` flipped. The store changes only once the
    /// server echoes the update.
    pub async fn toggle_revealed_field(
        &self,
        fields: RevealedFields,
        field: CharacterField,
    ) -> Result<(), ApiError> {
        let next = fields.toggled(field);
        self.update_revealed_fields(next.character_id, &next).await
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub async fn create_action(
        &self,
        character_id: CharacterId,
        input: &ActionInput,
    ) -> Result<Action, ApiError> {
        self.post(&format!("characters/{character_id}/actions"), input)
            .await
    }

    pub async fn update_action(
        &self,
        action_id: ActionId,
        input: &ActionInput,
    ) -> Result<Action, ApiError> {
        self.put(
            &format!("characters/{}/actions/{action_id}", input.character_id),
            input,
        )
        .await
    }

    pub async fn delete_action(
        &self,
        character_id: CharacterId,
        action_id: ActionId,
    ) -> Result<(), ApiError> {
        self.raw
            .delete(&format!("characters/{character_id}/actions/{action_id}"))
            .await
    }

    pub async fn reveal_action(
        &self,
        character_id: CharacterId,
        action_id: ActionId,
    ) -> Result<(), ApiError> {
        self.raw
            .put_empty(&format!(
                "characters/{character_id}/actions/{action_id}/reveal"
            ))
            .await
    }

    pub async fn hide_action(
        &self,
        character_id: CharacterId,
        action_id: ActionId,
    ) -> Result<(), ApiError> {
        self.raw
            .put_empty(&format!("characters/{character_id}/actions/{action_id}/hide"))
            .await
    }

    // =========================================================================
    // Players
    // =========================================================================

    pub async fn delete_player(&self, player_id: PlayerId) -> Result<(), ApiError> {
        self.raw.delete(&format!("players/{player_id}")).await
    }
}
