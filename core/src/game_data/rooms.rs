//! Raid room identification
//!
//! Maps the observer's region id to a logical room. Many regions map to no room;
//! a region never maps to two rooms.

use std::sync::LazyLock;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::RegistryError;
use crate::world::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidRoom {
    /// Outside the entrance, before the raid starts
    LobbyOutside,
    /// First interior room
    LobbyInside,
    HetPuzzle,
    CrondisPuzzle,
    ScabarasPuzzle,
    ApmekenPuzzle,
    Akkha,
    Zebak,
    Kephri,
    Baba,
    WardensP1P2,
    WardensP3,
}

/// Region table for Tombs of Amascut.
pub static TOMBS_ROOMS: &[(RaidRoom, &[RegionId])] = &[
    (RaidRoom::LobbyOutside, &[13454]),
    (RaidRoom::LobbyInside, &[14160]),
    (RaidRoom::HetPuzzle, &[14674]),
    (RaidRoom::CrondisPuzzle, &[15698]),
    (RaidRoom::ScabarasPuzzle, &[14162]),
    (RaidRoom::ApmekenPuzzle, &[15186]),
    (RaidRoom::Akkha, &[14676]),
    (RaidRoom::Zebak, &[15700]),
    (RaidRoom::Kephri, &[14164]),
    (RaidRoom::Baba, &[15188]),
    (RaidRoom::WardensP1P2, &[15184]),
    (RaidRoom::WardensP3, &[15696]),
];

static TOMBS_REGISTRY: LazyLock<RoomRegistry> = LazyLock::new(RoomRegistry::tombs);

/// Look up a room in the built-in table.
pub fn room_for_region(region: RegionId) -> Option<RaidRoom> {
    TOMBS_REGISTRY.room_for_region(region)
}

pub fn is_pre_raid_lobby(room: RaidRoom) -> bool {
    room == RaidRoom::LobbyOutside
}

/// Immutable region -> room lookup.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    by_region: HashMap<RegionId, RaidRoom>,
}

impl RoomRegistry {
    /// Build from a table of rooms and their regions. A room may span several
    /// regions, but each region belongs to at most one room.
    pub fn from_table(table: &[(RaidRoom, &[RegionId])]) -> Result<Self, RegistryError> {
        let mut by_region = HashMap::with_capacity(table.len());
        for &(room, regions) in table {
            if regions.is_empty() {
                return Err(RegistryError::EmptyRoom(room));
            }
            for &region in regions {
                if let Some(&first) = by_region.get(&region)
                    && first != room
                {
                    return Err(RegistryError::DuplicateRegion {
                        region,
                        first,
                        second: room,
                    });
                }
                by_region.insert(region, room);
            }
        }
        Ok(Self { by_region })
    }

    pub fn tombs() -> Self {
        let by_region = TOMBS_ROOMS
            .iter()
            .flat_map(|&(room, regions)| regions.iter().map(move |&region| (region, room)))
            .collect();
        Self { by_region }
    }

    pub fn room_for_region(&self, region: RegionId) -> Option<RaidRoom> {
        self.by_region.get(&region).copied()
    }

    pub fn regions_for(&self, room: RaidRoom) -> impl Iterator<Item = RegionId> + '_ {
        self.by_region
            .iter()
            .filter(move |&(_, r)| *r == room)
            .map(|(&region, _)| region)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::tombs()
    }
}
