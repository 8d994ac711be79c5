//! NPC Surprise Shared - wire types for server/client communication
//!
//! This crate contains the types exchanged between the server and the
//! admin/player clients:
//! - Entities (players, characters, actions, revealed-field records)
//! - Push messages (`ServerMessage`) and their decoder
//! - Command request and response bodies
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Integer ids** - ids are the server's integer keys wrapped in newtypes

pub mod entities;
pub mod ids;
pub mod messages;
pub mod requests;
pub mod responses;

pub use entities::{Action, Character, CharacterField, Player, RevealedFields, SessionStatus};
pub use ids::{ActionId, CharacterId, PlayerId};
pub use messages::{decode_server_message, CharacterWithFields, DecodeError, InitData, ServerMessage};
pub use requests::{ActionInput, CharacterInput, LoginRequest};
pub use responses::ErrorResponse;
