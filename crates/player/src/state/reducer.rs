//! Event reducer: `(snapshot, event) -> snapshot'`.
//!
//! Every event kind has its own total case. Nothing here panics or returns an
//! error: an event that cannot apply (unknown parent id, unknown target) is
//! reported as [`Reduction::Ignored`] and the caller keeps the old snapshot.
//! Events are applied in arrival order; upserts are idempotent by id.

use std::fmt;
use std::str::FromStr;

use npc_surprise_shared::{
    Action, ActionId, Character, CharacterId, Player, PlayerId, RevealedFields, SessionStatus,
};

use super::events::StoreEvent;
use super::snapshot::Snapshot;

/// What `unassign-character` does to the local copy of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnassignPolicy {
    /// Admin sessions drop the character, player sessions strip the owner and
    /// keep the character while it still shows revealed data.
    #[default]
    RoleConditional,
    /// Always strip the owner (player sessions still drop fully hidden characters).
    StripOwner,
    /// Always drop the character.
    Remove,
}

impl FromStr for UnassignPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "role" | "role-conditional" => Ok(Self::RoleConditional),
            "strip" | "strip-owner" => Ok(Self::StripOwner),
            "remove" => Ok(Self::Remove),
            other => Err(format!("unknown unassign policy: {other}")),
        }
    }
}

/// Why an event left the snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    UnknownCharacter(CharacterId),
    UnknownAction(ActionId),
    UnknownPlayer(PlayerId),
    /// Applied cleanly but produced identical data (e.g. a repeated upsert).
    Unchanged,
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::UnknownCharacter(id) => write!(f, "unknown character {id}"),
            Ignored::UnknownAction(id) => write!(f, "unknown action {id}"),
            Ignored::UnknownPlayer(id) => write!(f, "unknown player {id}"),
            Ignored::Unchanged => f.write_str("no change"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    Applied(Snapshot),
    Ignored(Ignored),
}

type Step = Result<(), Ignored>;

#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer {
    unassign_character: UnassignPolicy,
}

impl Reducer {
    pub fn new(unassign_character: UnassignPolicy) -> Self {
        Self { unassign_character }
    }

    pub fn unassign_policy(&self) -> UnassignPolicy {
        self.unassign_character
    }

    /// Computes the snapshot that follows `current` once `event` is applied.
    ///
    /// The viewer role is read from `current`'s session status.
    pub fn reduce(&self, current: &Snapshot, event: StoreEvent) -> Reduction {
        let admin = current.is_admin();
        let mut next = current.clone();

        let step = match event {
            StoreEvent::Snapshot {
                players,
                characters,
                fields,
            } => replace_all(&mut next, current, players, characters, fields, admin),
            StoreEvent::CharacterUpserted { character, fields } => {
                upsert_character(&mut next, character, fields, admin)
            }
            StoreEvent::ActionUpserted(action) => upsert_action(&mut next, action),
            StoreEvent::CharacterAssigned(character) => {
                upsert_character(&mut next, character, None, admin)
            }
            StoreEvent::CharacterUnassigned(id) => {
                unassign_character(&mut next, id, admin, self.unassign_character)
            }
            StoreEvent::ActionAssigned(action) => upsert_action(&mut next, action),
            StoreEvent::ActionUnassigned(id) => unassign_action(&mut next, id, admin),
            StoreEvent::PlayerConnected(player) => player_connected(&mut next, player),
            StoreEvent::PlayerDisconnected(id) => player_disconnected(&mut next, id),
            StoreEvent::CharacterDeleted(id) => delete_character(&mut next, id),
            StoreEvent::ActionDeleted(id) => delete_action(&mut next, id),
            StoreEvent::PlayerDeleted(id) => delete_player(&mut next, id),
            StoreEvent::StatusChanged(status) => status_changed(&mut next, status),
        };

        match step {
            Err(reason) => Reduction::Ignored(reason),
            Ok(()) if next.same_data(current) => Reduction::Ignored(Ignored::Unchanged),
            Ok(()) => {
                next.revision = current.revision + 1;
                Reduction::Applied(next)
            }
        }
    }
}

/// Visibility record for a character that arrived without one.
fn default_fields(
    character: &Character,
    previous: Option<&RevealedFields>,
    admin: bool,
) -> RevealedFields {
    if admin {
        previous
            .copied()
            .unwrap_or_else(|| RevealedFields::hidden(character.id))
    } else {
        RevealedFields::from_redacted(character)
    }
}

fn put_fields(next: &mut Snapshot, fields: RevealedFields) {
    match next
        .revealed_fields
        .iter_mut()
        .find(|f| f.character_id == fields.character_id)
    {
        Some(slot) => *slot = fields,
        None => next.revealed_fields.push(fields),
    }
}

fn replace_all(
    next: &mut Snapshot,
    current: &Snapshot,
    players: Vec<Player>,
    characters: Vec<Character>,
    fields: Option<Vec<RevealedFields>>,
    admin: bool,
) -> Step {
    let explicit = fields.unwrap_or_default();
    next.revealed_fields = characters
        .iter()
        .map(|character| {
            explicit
                .iter()
                .find(|f| f.character_id == character.id)
                .copied()
                .unwrap_or_else(|| {
                    default_fields(character, current.fields_for(character.id), admin)
                })
        })
        .collect();
    next.players = players;
    next.characters = characters;
    next.loaded = true;
    Ok(())
}

fn upsert_character(
    next: &mut Snapshot,
    character: Character,
    fields: Option<RevealedFields>,
    admin: bool,
) -> Step {
    let fields = fields
        .unwrap_or_else(|| default_fields(&character, next.fields_for(character.id), admin));
    put_fields(next, fields);

    match next.characters.iter_mut().find(|c| c.id == character.id) {
        Some(slot) => *slot = character,
        None => next.characters.push(character),
    }
    Ok(())
}

fn upsert_action(next: &mut Snapshot, action: Action) -> Step {
    let owner = action.character_id;
    if next.character(owner).is_none() {
        return Err(Ignored::UnknownCharacter(owner));
    }

    // An action lives under exactly one character.
    for character in next.characters.iter_mut().filter(|c| c.id != owner) {
        character.actions.retain(|a| a.id != action.id);
    }

    if let Some(character) = next.characters.iter_mut().find(|c| c.id == owner) {
        match character.actions.iter_mut().find(|a| a.id == action.id) {
            Some(slot) => *slot = action,
            None => character.actions.push(action),
        }
    }
    Ok(())
}

fn has_revealed_data(next: &Snapshot, character: &Character) -> bool {
    next.fields_for(character.id)
        .is_some_and(RevealedFields::any_revealed)
        || character.actions.iter().any(|a| a.revealed)
}

fn unassign_character(
    next: &mut Snapshot,
    id: CharacterId,
    admin: bool,
    policy: UnassignPolicy,
) -> Step {
    let Some(character) = next.character(id) else {
        return Err(Ignored::UnknownCharacter(id));
    };

    let remove = match policy {
        UnassignPolicy::Remove => true,
        UnassignPolicy::RoleConditional if admin => true,
        UnassignPolicy::RoleConditional | UnassignPolicy::StripOwner => {
            !admin && !has_revealed_data(next, character)
        }
    };
    if remove {
        return delete_character(next, id);
    }

    if let Some(character) = next.characters.iter_mut().find(|c| c.id == id) {
        character.owner_player_id = None;
    }
    Ok(())
}

fn unassign_action(next: &mut Snapshot, id: ActionId, admin: bool) -> Step {
    if next.action(id).is_none() {
        return Err(Ignored::UnknownAction(id));
    }
    // The admin still owns every action; only the player loses sight of it.
    if !admin {
        for character in &mut next.characters {
            character.actions.retain(|a| a.id != id);
        }
    }
    Ok(())
}

fn player_connected(next: &mut Snapshot, player: Player) -> Step {
    let player = Player {
        is_online: true,
        ..player
    };
    match next.players.iter_mut().find(|p| p.id == player.id) {
        Some(slot) => *slot = player,
        None => next.players.push(player),
    }
    Ok(())
}

fn player_disconnected(next: &mut Snapshot, id: PlayerId) -> Step {
    let player = next
        .players
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(Ignored::UnknownPlayer(id))?;
    player.is_online = false;
    Ok(())
}

fn delete_character(next: &mut Snapshot, id: CharacterId) -> Step {
    let before = next.characters.len();
    next.characters.retain(|c| c.id != id);
    if next.characters.len() == before {
        return Err(Ignored::UnknownCharacter(id));
    }
    // Actions are stored inline, so they go with the character.
    next.revealed_fields.retain(|f| f.character_id != id);
    Ok(())
}

fn delete_action(next: &mut Snapshot, id: ActionId) -> Step {
    if next.action(id).is_none() {
        return Err(Ignored::UnknownAction(id));
    }
    for character in &mut next.characters {
        character.actions.retain(|a| a.id != id);
    }
    Ok(())
}

fn delete_player(next: &mut Snapshot, id: PlayerId) -> Step {
    let before = next.players.len();
    next.players.retain(|p| p.id != id);
    if next.players.len() == before {
        return Err(Ignored::UnknownPlayer(id));
    }
    Ok(())
}

fn status_changed(next: &mut Snapshot, status: Option<SessionStatus>) -> Step {
    next.status = status;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::{
        action, admin_status, character, owned_character, player, player_status,
    };

    fn applied(reduction: Reduction) -> Snapshot {
        match reduction {
            Reduction::Applied(snapshot) => snapshot,
            Reduction::Ignored(reason) => panic!("Expected Applied, got Ignored({reason})"),
        }
    }

    fn with_status(status: SessionStatus) -> Snapshot {
        applied(Reducer::default().reduce(
            &Snapshot::default(),
            StoreEvent::StatusChanged(Some(status)),
        ))
    }

    fn seeded(status: SessionStatus, characters: Vec<Character>) -> Snapshot {
        let base = with_status(status);
        applied(Reducer::default().reduce(
            &base,
            StoreEvent::Snapshot {
                players: vec![player(1, "Ana", true), player(2, "Bo", false)],
                characters,
                fields: None,
            },
        ))
    }

    #[test]
    fn snapshot_replaces_collections_and_marks_loaded() {
        let reducer = Reducer::default();
        let empty = Snapshot::default();
        assert!(!empty.is_loaded());

        let next = applied(reducer.reduce(
            &empty,
            StoreEvent::Snapshot {
                players: vec![player(1, "Ana", true), player(2, "Bo", false)],
                characters: vec![character(10, "Grukk")],
                fields: None,
            },
        ));

        assert!(next.is_loaded());
        assert_eq!(next.revision(), 1);
        assert_eq!(next.players().len(), 2);
        assert_eq!(next.characters(), &[character(10, "Grukk")]);
        assert_eq!(next.revealed_fields().len(), 1);
    }

    #[test]
    fn repeated_character_upsert_is_idempotent() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![]);
        let event = StoreEvent::CharacterUpserted {
            character: character(10, "Grukk"),
            fields: None,
        };

        let once = applied(reducer.reduce(&base, event.clone()));
        assert_eq!(
            reducer.reduce(&once, event),
            Reduction::Ignored(Ignored::Unchanged)
        );
        assert_eq!(once.characters().len(), 1);
    }

    #[test]
    fn character_upsert_replaces_in_place() {
        let reducer = Reducer::default();
        let base = seeded(
            admin_status(),
            vec![character(10, "Grukk"), character(11, "Mira")],
        );

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUpserted {
                character: character(10, "Grukk the Bold"),
                fields: None,
            },
        ));

        let names: Vec<_> = next.characters().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Grukk the Bold", "Mira"]);
    }

    #[test]
    fn last_presence_event_wins() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![]);

        let connect = StoreEvent::PlayerConnected(player(2, "Bo", false));
        let disconnect = StoreEvent::PlayerDisconnected(PlayerId::new(2));

        let after_connect = applied(reducer.reduce(&base, connect.clone()));
        let offline = applied(reducer.reduce(&after_connect, disconnect.clone()));
        assert_eq!(offline.player(PlayerId::new(2)).map(|p| p.is_online), Some(false));

        let after_disconnect = match reducer.reduce(&base, disconnect) {
            Reduction::Applied(s) => s,
            // Bo already offline in the seed
            Reduction::Ignored(Ignored::Unchanged) => base.clone(),
            other => panic!("unexpected {:?}", other),
        };
        let online = applied(reducer.reduce(&after_disconnect, connect));
        assert_eq!(online.player(PlayerId::new(2)).map(|p| p.is_online), Some(true));
    }

    #[test]
    fn unknown_player_connects_as_new_online_player() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::PlayerConnected(player(7, "Cy", false)),
        ));

        assert_eq!(next.players().len(), 3);
        assert_eq!(next.player(PlayerId::new(7)), Some(&player(7, "Cy", true)));
    }

    #[test]
    fn disconnect_of_unknown_player_is_a_no_op() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![]);

        assert_eq!(
            reducer.reduce(&base, StoreEvent::PlayerDisconnected(PlayerId::new(99))),
            Reduction::Ignored(Ignored::UnknownPlayer(PlayerId::new(99)))
        );
    }

    #[test]
    fn orphan_action_is_ignored() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![character(10, "Grukk")]);

        assert_eq!(
            reducer.reduce(
                &base,
                StoreEvent::ActionUpserted(action(1, 99, false, "Enter the cave"))
            ),
            Reduction::Ignored(Ignored::UnknownCharacter(CharacterId::new(99)))
        );
    }

    #[test]
    fn action_upsert_scenario() {
        let reducer = Reducer::default();
        let base = seeded(player_status(1), vec![character(10, "Grukk")]);
        assert_eq!(base.characters(), &[character(10, "Grukk")]);

        let hidden = applied(reducer.reduce(
            &base,
            StoreEvent::ActionUpserted(action(1, 10, false, "Enter the cave")),
        ));
        let actions = &hidden.characters()[0].actions;
        assert_eq!(actions.len(), 1);
        assert!(!actions[0].revealed);

        let revealed = applied(reducer.reduce(
            &hidden,
            StoreEvent::ActionUpserted(action(1, 10, true, "Enter the cave")),
        ));
        let actions = &revealed.characters()[0].actions;
        assert_eq!(actions.len(), 1);
        assert!(actions[0].revealed);
    }

    #[test]
    fn action_moving_between_characters_is_not_duplicated() {
        let reducer = Reducer::default();
        let mut grukk = character(10, "Grukk");
        grukk.actions.push(action(1, 10, false, "Sneak"));
        let base = seeded(admin_status(), vec![grukk, character(11, "Mira")]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::ActionUpserted(action(1, 11, false, "Sneak")),
        ));

        assert!(next.characters()[0].actions.is_empty());
        assert_eq!(next.characters()[1].actions.len(), 1);
    }

    #[test]
    fn delete_character_cascades() {
        let reducer = Reducer::default();
        let mut seven = character(7, "Seven");
        seven.actions.push(action(1, 7, true, "Wave"));
        seven.actions.push(action(2, 7, false, "Hide"));
        let base = seeded(admin_status(), vec![seven, character(8, "Eight")]);

        let next = applied(reducer.reduce(&base, StoreEvent::CharacterDeleted(CharacterId::new(7))));

        assert!(next.character(CharacterId::new(7)).is_none());
        assert!(next.fields_for(CharacterId::new(7)).is_none());
        assert!(next
            .characters()
            .iter()
            .flat_map(|c| &c.actions)
            .all(|a| a.character_id != CharacterId::new(7)));
        assert!(next.fields_for(CharacterId::new(8)).is_some());
    }

    #[test]
    fn deletes_of_unknown_ids_are_ignored() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![character(10, "Grukk")]);

        assert!(matches!(
            reducer.reduce(&base, StoreEvent::ActionDeleted(ActionId::new(5))),
            Reduction::Ignored(Ignored::UnknownAction(_))
        ));
        assert!(matches!(
            reducer.reduce(&base, StoreEvent::PlayerDeleted(PlayerId::new(5))),
            Reduction::Ignored(Ignored::UnknownPlayer(_))
        ));
        assert!(matches!(
            reducer.reduce(&base, StoreEvent::CharacterDeleted(CharacterId::new(5))),
            Reduction::Ignored(Ignored::UnknownCharacter(_))
        ));
    }

    #[test]
    fn delete_action_and_player() {
        let reducer = Reducer::default();
        let mut grukk = character(10, "Grukk");
        grukk.actions.push(action(1, 10, true, "Wave"));
        let base = seeded(admin_status(), vec![grukk]);

        let next = applied(reducer.reduce(&base, StoreEvent::ActionDeleted(ActionId::new(1))));
        assert!(next.characters()[0].actions.is_empty());

        let next = applied(reducer.reduce(&next, StoreEvent::PlayerDeleted(PlayerId::new(1))));
        assert!(next.player(PlayerId::new(1)).is_none());
        assert_eq!(next.players().len(), 1);
    }

    #[test]
    fn assign_character_does_not_duplicate() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![character(10, "Grukk")]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterAssigned(owned_character(10, "Grukk", 1)),
        ));

        assert_eq!(next.characters().len(), 1);
        assert_eq!(next.characters()[0].owner_player_id, Some(PlayerId::new(1)));
    }

    #[test]
    fn admin_unassign_removes_character() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![owned_character(10, "Grukk", 1)]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUnassigned(CharacterId::new(10)),
        ));

        assert!(next.characters().is_empty());
        assert!(next.revealed_fields().is_empty());
    }

    #[test]
    fn player_unassign_keeps_character_with_revealed_data() {
        let reducer = Reducer::default();
        let base = seeded(player_status(1), vec![owned_character(10, "Grukk", 1)]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUnassigned(CharacterId::new(10)),
        ));

        assert_eq!(next.characters().len(), 1);
        assert_eq!(next.characters()[0].owner_player_id, None);
    }

    #[test]
    fn player_unassign_drops_fully_hidden_character() {
        let reducer = Reducer::default();
        let mut hidden = owned_character(10, "", 1);
        hidden.race.clear();
        let base = seeded(player_status(1), vec![hidden]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUnassigned(CharacterId::new(10)),
        ));

        assert!(next.characters().is_empty());
    }

    #[test]
    fn strip_policy_keeps_character_for_admin() {
        let reducer = Reducer::new(UnassignPolicy::StripOwner);
        let base = seeded(admin_status(), vec![owned_character(10, "Grukk", 1)]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUnassigned(CharacterId::new(10)),
        ));

        assert_eq!(next.characters().len(), 1);
        assert_eq!(next.characters()[0].owner_player_id, None);
    }

    #[test]
    fn remove_policy_drops_revealed_character_for_player() {
        let reducer = Reducer::new(UnassignPolicy::Remove);
        let base = seeded(player_status(1), vec![owned_character(10, "Grukk", 1)]);
        assert!(base
            .fields_for(CharacterId::new(10))
            .is_some_and(RevealedFields::any_revealed));

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUnassigned(CharacterId::new(10)),
        ));

        assert!(next.characters().is_empty());
        assert!(next.fields_for(CharacterId::new(10)).is_none());
    }

    #[test]
    fn strip_policy_drops_fully_hidden_character_for_player() {
        let reducer = Reducer::new(UnassignPolicy::StripOwner);
        let base = seeded(
            player_status(1),
            vec![owned_character(10, "", 1), owned_character(11, "Mira", 1)],
        );

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUnassigned(CharacterId::new(10)),
        ));
        assert!(next.character(CharacterId::new(10)).is_none());
        assert!(next.fields_for(CharacterId::new(10)).is_none());

        let next = applied(reducer.reduce(
            &next,
            StoreEvent::CharacterUnassigned(CharacterId::new(11)),
        ));
        assert_eq!(
            next.character(CharacterId::new(11)).map(|c| c.owner_player_id),
            Some(None)
        );
    }

    #[test]
    fn unassign_of_unknown_character_is_ignored() {
        for policy in [
            UnassignPolicy::RoleConditional,
            UnassignPolicy::StripOwner,
            UnassignPolicy::Remove,
        ] {
            let reducer = Reducer::new(policy);
            let base = seeded(admin_status(), vec![owned_character(10, "Grukk", 1)]);

            assert_eq!(
                reducer.reduce(&base, StoreEvent::CharacterUnassigned(CharacterId::new(99))),
                Reduction::Ignored(Ignored::UnknownCharacter(CharacterId::new(99)))
            );
        }
    }

    #[test]
    fn unassign_action_depends_on_role() {
        let reducer = Reducer::default();
        let mut grukk = owned_character(10, "Grukk", 1);
        grukk.actions.push(action(1, 10, true, "Wave"));

        let admin = seeded(admin_status(), vec![grukk.clone()]);
        assert_eq!(
            reducer.reduce(&admin, StoreEvent::ActionUnassigned(ActionId::new(1))),
            Reduction::Ignored(Ignored::Unchanged)
        );

        let player_side = seeded(player_status(1), vec![grukk]);
        let next = applied(reducer.reduce(
            &player_side,
            StoreEvent::ActionUnassigned(ActionId::new(1)),
        ));
        assert!(next.characters()[0].actions.is_empty());
    }

    #[test]
    fn player_fields_are_derived_from_redacted_payload() {
        let reducer = Reducer::default();
        let base = seeded(player_status(1), vec![]);
        let mut redacted = character(10, "");
        redacted.age = "40".into();

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUpserted {
                character: redacted,
                fields: None,
            },
        ));

        let fields = next.fields_for(CharacterId::new(10)).copied();
        let fields = fields.expect("fields created alongside character");
        assert!(!fields.name);
        assert!(fields.age);
    }

    #[test]
    fn admin_keeps_existing_fields_until_explicitly_replaced() {
        let reducer = Reducer::default();
        let mut revealed = RevealedFields::hidden(CharacterId::new(10));
        revealed.name = true;
        let base = with_status(admin_status());
        let base = applied(reducer.reduce(
            &base,
            StoreEvent::Snapshot {
                players: vec![],
                characters: vec![character(10, "Grukk")],
                fields: Some(vec![revealed]),
            },
        ));

        let renamed = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUpserted {
                character: character(10, "Grukk II"),
                fields: None,
            },
        ));
        assert_eq!(renamed.fields_for(CharacterId::new(10)), Some(&revealed));

        let mut all = revealed;
        all.race = true;
        let toggled = applied(reducer.reduce(
            &renamed,
            StoreEvent::CharacterUpserted {
                character: character(10, "Grukk II"),
                fields: Some(all),
            },
        ));
        assert_eq!(toggled.fields_for(CharacterId::new(10)), Some(&all));
        assert_eq!(toggled.revealed_fields().len(), 1);
    }

    #[test]
    fn new_admin_character_starts_hidden() {
        let reducer = Reducer::default();
        let base = seeded(admin_status(), vec![]);

        let next = applied(reducer.reduce(
            &base,
            StoreEvent::CharacterUpserted {
                character: character(10, "Grukk"),
                fields: None,
            },
        ));

        assert_eq!(
            next.fields_for(CharacterId::new(10)),
            Some(&RevealedFields::hidden(CharacterId::new(10)))
        );
    }

    #[test]
    fn status_reset_clears_admin_role() {
        let reducer = Reducer::default();
        let base = with_status(admin_status());
        assert!(base.is_admin());

        let next = applied(reducer.reduce(&base, StoreEvent::StatusChanged(None)));
        assert!(!next.is_admin());
        assert!(next.status().is_none());
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("role".parse(), Ok(UnassignPolicy::RoleConditional));
        assert_eq!("Strip".parse(), Ok(UnassignPolicy::StripOwner));
        assert_eq!("remove".parse(), Ok(UnassignPolicy::Remove));
        assert!("archive".parse::<UnassignPolicy>().is_err());
    }
}
