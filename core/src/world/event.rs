//! World event vocabulary
//!
//! Events arrive synchronously between tick boundaries. Each maps to an
//! `EventKind` so detectors can declare which ones they consume.

use crate::context::IStr;

use super::Tile;

/// Identity of a non-player actor. `index` is stable while the NPC is spawned,
/// `id` is its classification (it changes when the NPC transforms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NpcRef {
    pub index: u32,
    pub id: i32,
    pub name: IStr,
}

/// Something in the world that can animate, take damage, or die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Player(IStr),
    Npc(NpcRef),
}

impl Actor {
    pub fn player_name(&self) -> Option<IStr> {
        match self {
            Actor::Player(name) => Some(*name),
            Actor::Npc(_) => None,
        }
    }

    pub fn npc(&self) -> Option<&NpcRef> {
        match self {
            Actor::Npc(npc) => Some(npc),
            Actor::Player(_) => None,
        }
    }
}

/// A projectile in flight. `key` distinguishes two projectiles sharing an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileRef {
    pub key: u64,
    pub id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitsplatKind {
    /// Damage dealt to the local player
    Damage,
    /// Damage dealt to someone else
    DamageOther,
    Heal,
    Block,
    /// Water poured onto the Crondis palm
    Water,
    Other,
}

impl HitsplatKind {
    pub fn is_damage(self) -> bool {
        matches!(self, HitsplatKind::Damage | HitsplatKind::DamageOther)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKind {
    /// Server broadcast
    Game,
    Public,
    Other,
}

/// Discriminant of `WorldEvent`, used for interest declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    GraphicsObjectCreated,
    ProjectileMoved,
    NpcSpawned,
    NpcDespawned,
    NpcChanged,
    GameObjectSpawned,
    GameObjectDespawned,
    AnimationChanged,
    GraphicChanged,
    HitsplatApplied,
    ActorDeath,
    ChatMessage,
    OverheadTextChanged,
    VarbitChanged,
    Loading,
    RosterUpdated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    /// A ground effect was created. It starts after `cycles_until_start` client cycles.
    GraphicsObjectCreated {
        graphics_id: i32,
        tile: Tile,
        cycles_until_start: i32,
    },
    ProjectileMoved {
        projectile: ProjectileRef,
        target: Option<Actor>,
        remaining_cycles: i32,
    },
    NpcSpawned {
        npc: NpcRef,
        tile: Tile,
    },
    NpcDespawned {
        npc: NpcRef,
        tile: Tile,
        is_dead: bool,
    },
    /// An NPC transformed into a different classification id.
    NpcChanged {
        npc: NpcRef,
        old_id: i32,
    },
    GameObjectSpawned {
        object_id: i32,
        tile: Tile,
    },
    GameObjectDespawned {
        object_id: i32,
        tile: Tile,
    },
    AnimationChanged {
        actor: Actor,
        animation_id: i32,
        graphic_id: i32,
    },
    /// Spot graphic changed on an actor. `local_tile` is the actor's sub-tile
    /// position rounded to the nearest tile, which can lead `tile` during movement.
    GraphicChanged {
        actor: Actor,
        graphic_id: i32,
        tile: Tile,
        local_tile: Tile,
    },
    HitsplatApplied {
        target: Actor,
        kind: HitsplatKind,
        amount: i32,
        tile: Option<Tile>,
        /// NPC health ratio after the hit, when the client exposes one
        health_ratio: Option<i32>,
        /// Spot graphic on the target when the hit landed (-1 for none)
        target_graphic: i32,
    },
    ActorDeath {
        actor: Actor,
    },
    ChatMessage {
        kind: ChatKind,
        sender: Option<IStr>,
        text: String,
    },
    /// Text shown over an actor's head
    OverheadTextChanged {
        actor: Actor,
        text: String,
    },
    /// A client variable of the local player changed
    VarbitChanged {
        varbit_id: i32,
        value: i32,
    },
    /// The client is reloading the scene (region change, reconnect)
    Loading,
    /// The party HUD roster changed
    RosterUpdated,
}

impl WorldEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WorldEvent::GraphicsObjectCreated { .. } => EventKind::GraphicsObjectCreated,
            WorldEvent::ProjectileMoved { .. } => EventKind::ProjectileMoved,
            WorldEvent::NpcSpawned { .. } => EventKind::NpcSpawned,
            WorldEvent::NpcDespawned { .. } => EventKind::NpcDespawned,
            WorldEvent::NpcChanged { .. } => EventKind::NpcChanged,
            WorldEvent::GameObjectSpawned { .. } => EventKind::GameObjectSpawned,
            WorldEvent::GameObjectDespawned { .. } => EventKind::GameObjectDespawned,
            WorldEvent::AnimationChanged { .. } => EventKind::AnimationChanged,
            WorldEvent::GraphicChanged { .. } => EventKind::GraphicChanged,
            WorldEvent::HitsplatApplied { .. } => EventKind::HitsplatApplied,
            WorldEvent::ActorDeath { .. } => EventKind::ActorDeath,
            WorldEvent::ChatMessage { .. } => EventKind::ChatMessage,
            WorldEvent::OverheadTextChanged { .. } => EventKind::OverheadTextChanged,
            WorldEvent::VarbitChanged { .. } => EventKind::VarbitChanged,
            WorldEvent::Loading => EventKind::Loading,
            WorldEvent::RosterUpdated => EventKind::RosterUpdated,
        }
    }
}

