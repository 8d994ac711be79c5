//! Read-only, role-aware views over a [`Snapshot`].
//!
//! A projection never mutates the snapshot. Whatever a player is not allowed
//! to see is already replaced by [`FieldView::Hidden`] here, so renderers
//! cannot leak hidden data by accident.

use std::fmt;
use std::sync::Arc;

use npc_surprise_shared::{
    Action, ActionId, Character, CharacterField, CharacterId, Player, PlayerId, RevealedFields,
};

use super::snapshot::Snapshot;

/// Who is looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Admin,
    Player(Option<PlayerId>),
}

impl Viewer {
    pub fn is_admin(self) -> bool {
        matches!(self, Viewer::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldView {
    /// `revealed` is the game master's toggle; players only get `true` here.
    Visible { value: String, revealed: bool },
    Hidden,
}

impl fmt::Display for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldView::Visible { value, .. } if value.is_empty() => f.write_str("-"),
            FieldView::Visible { value, .. } => f.write_str(value),
            FieldView::Hidden => f.write_str("hidden"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerView {
    pub id: PlayerId,
    pub name: Option<String>,
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub id: ActionId,
    pub revealed: bool,
    /// `kind`, `content` and `direction` are `None` when the viewer may only
    /// know that the action exists.
    pub kind: Option<String>,
    pub content: Option<String>,
    pub direction: Option<String>,
}

/// Which commands the current viewer can issue for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub edit: bool,
    pub assign: bool,
    pub unassign: bool,
    pub toggle_reveal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterView {
    pub id: CharacterId,
    pub fields: Vec<(CharacterField, FieldView)>,
    pub owner: Option<OwnerView>,
    pub actions: Vec<ActionView>,
    pub affordances: Affordances,
}

impl CharacterView {
    pub fn field(&self, field: CharacterField) -> Option<&FieldView> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, view)| view)
    }
}

impl fmt::Display for CharacterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .field(CharacterField::Name)
            .map(ToString::to_string)
            .unwrap_or_else(|| "hidden".to_string());
        write!(f, "#{} {}", self.id, name)?;
        match &self.owner {
            Some(owner) => {
                let status = if owner.is_online { "online" } else { "offline" };
                let who = owner.name.as_deref().unwrap_or("unknown player");
                writeln!(f, " [{who}, {status}]")?;
            }
            None => writeln!(f)?,
        }
        for (field, view) in self.fields.iter().filter(|(field, _)| *field != CharacterField::Name) {
            writeln!(f, "  {field}: {view}")?;
        }
        for action in &self.actions {
            let marker = if action.revealed { "*" } else { " " };
            match (&action.kind, &action.content) {
                (Some(kind), Some(body)) => writeln!(f, "  {marker} ({kind}) {body}")?,
                _ => writeln!(f, "  {marker} hidden action")?,
            }
        }
        Ok(())
    }
}

/// Role-aware queries over one snapshot.
pub struct Projection<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Projection<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot.is_admin()
    }

    pub fn viewer(&self) -> Viewer {
        if self.is_admin() {
            Viewer::Admin
        } else {
            Viewer::Player(self.snapshot.status().and_then(|s| s.player_id))
        }
    }

    pub fn character_by_id(&self, id: CharacterId) -> Option<&'a Character> {
        self.snapshot.character(id)
    }

    pub fn action_by_id(&self, id: ActionId) -> Option<&'a Action> {
        self.snapshot.action(id)
    }

    pub fn player_by_id(&self, id: PlayerId) -> Option<&'a Player> {
        self.snapshot.player(id)
    }

    /// The owning player, if the character is assigned and the player known.
    pub fn owner_of(&self, character: &Character) -> Option<&'a Player> {
        character
            .owner_player_id
            .and_then(|id| self.snapshot.player(id))
    }

    pub fn is_owner_online(&self, character: &Character) -> bool {
        self.owner_of(character).is_some_and(|p| p.is_online)
    }

    pub fn online_players(&self) -> Vec<&'a Player> {
        self.snapshot.players().iter().filter(|p| p.is_online).collect()
    }

    pub fn character_view(&self, id: CharacterId) -> Option<CharacterView> {
        self.character_by_id(id).map(|c| self.build_view(c))
    }

    pub fn character_views(&self) -> Vec<CharacterView> {
        self.snapshot
            .characters()
            .iter()
            .map(|c| self.build_view(c))
            .collect()
    }

    fn build_view(&self, character: &Character) -> CharacterView {
        let admin = self.is_admin();
        let fields = self
            .snapshot
            .fields_for(character.id)
            .copied()
            .unwrap_or_else(|| RevealedFields::hidden(character.id));

        let field_views = CharacterField::ALL
            .into_iter()
            .map(|field| {
                let revealed = fields.get(field);
                let view = if admin || revealed {
                    FieldView::Visible {
                        value: character.field(field).to_string(),
                        revealed,
                    }
                } else {
                    FieldView::Hidden
                };
                (field, view)
            })
            .collect();

        let actions = character
            .actions
            .iter()
            .map(|action| {
                let readable = admin || action.revealed;
                ActionView {
                    id: action.id,
                    revealed: action.revealed,
                    kind: readable.then(|| action.kind.clone()),
                    content: readable.then(|| action.content.clone()),
                    direction: readable.then(|| action.direction.clone()),
                }
            })
            .collect();

        let owner = character.owner_player_id.map(|id| {
            let player = self.snapshot.player(id);
            OwnerView {
                id,
                name: player.map(|p| p.name.clone()),
                is_online: player.is_some_and(|p| p.is_online),
            }
        });

        let affordances = if admin {
            Affordances {
                edit: true,
                assign: true,
                unassign: character.owner_player_id.is_some(),
                toggle_reveal: true,
            }
        } else {
            Affordances::default()
        };

        CharacterView {
            id: character.id,
            fields: field_views,
            owner,
            actions,
            affordances,
        }
    }
}

/// Keeps the last computed character views and recomputes them only when a
/// newer snapshot revision comes in.
#[derive(Default)]
pub struct ProjectionCache {
    revision: Option<u64>,
    views: Arc<Vec<CharacterView>>,
}

impl ProjectionCache {
    pub fn character_views(&mut self, snapshot: &Snapshot) -> Arc<Vec<CharacterView>> {
        if self.revision != Some(snapshot.revision()) {
            self.views = Arc::new(Projection::new(snapshot).character_views());
            self.revision = Some(snapshot.revision());
        }
        self.views.clone()
    }
}
