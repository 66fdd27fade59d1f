//! Mistake classifications

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RaidRoom;

/// What a raider did wrong on a given tick. Pure classification, no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mistake {
    /// Any death. Always paired with the room-specific death below.
    Death,
    DeathHet,
    DeathCrondis,
    DeathScabaras,
    DeathApmeken,
    DeathWardens,

    HetPuzzleLight,
    HetPuzzleDarkOrb,

    CrondisPuzzleLowWater,

    ApmekenPuzzleVent,
    ApmekenPuzzlePillar,
    ApmekenPuzzleCorruption,
    ApmekenPuzzleVenom,
    ApmekenPuzzleVolatile,

    AkkhaSpecialQuadrantBomb,
    AkkhaSpecialElementalOrbs,
    AkkhaUnstableOrb,

    ZebakAcidTile,
    ZebakBloodCloud,
    ZebakEarthquake,

    KephriBomb,

    BabaSlam,
    BabaBanana,
    BabaFallingBoulder,
    BabaProjectileBoulder,

    WardensP1Pyramid,
    WardensP2Ddr,
    WardensP2Windmill,
    WardensP2Bombs,
    WardensP2Bind,
    WardensP2SpecialPrayer,

    WardensP3Earthquake,
    WardensP3Kephri,
    WardensP3Baba,
    WardensP3Lightning,
    WardensP3Akkha,
    WardensP3Zebak,
}

impl Mistake {
    /// Display name used by chat and panel collaborators
    pub fn name(self) -> &'static str {
        match self {
            Mistake::Death => "Death",
            Mistake::DeathHet => "Path of Het death",
            Mistake::DeathCrondis => "Path of Crondis death",
            Mistake::DeathScabaras => "Path of Scabaras death",
            Mistake::DeathApmeken => "Path of Apmeken death",
            Mistake::DeathWardens => "Wardens death",
            Mistake::HetPuzzleLight => "Light",
            Mistake::HetPuzzleDarkOrb => "Dark Orb",
            Mistake::CrondisPuzzleLowWater => "Path of Crondis low watering",
            Mistake::ApmekenPuzzleVent => "Apmeken vent",
            Mistake::ApmekenPuzzlePillar => "Apmeken pillar",
            Mistake::ApmekenPuzzleCorruption => "Apmeken corruption",
            Mistake::ApmekenPuzzleVenom => "Apmeken venom",
            Mistake::ApmekenPuzzleVolatile => "Apmeken volatile",
            Mistake::AkkhaSpecialQuadrantBomb => "Akkha special quadrant bomb",
            Mistake::AkkhaSpecialElementalOrbs => "Akkha special elemental orbs",
            Mistake::AkkhaUnstableOrb => "Akkha unstable orb",
            Mistake::ZebakAcidTile => "Zebak acid tile",
            Mistake::ZebakBloodCloud => "Zebak blood heal",
            Mistake::ZebakEarthquake => "Zebak earthquake",
            Mistake::KephriBomb => "Kephri bomb",
            Mistake::BabaSlam => "Ba-Ba slam",
            Mistake::BabaBanana => "Ba-Ba banana",
            Mistake::BabaFallingBoulder => "Ba-Ba falling boulder",
            Mistake::BabaProjectileBoulder => "Ba-Ba projectile boulder",
            Mistake::WardensP1Pyramid => "Wardens P1 pyramid",
            Mistake::WardensP2Ddr => "Wardens P2 DDR",
            Mistake::WardensP2Windmill => "Wardens P2 windmill",
            Mistake::WardensP2Bombs => "Wardens P2 bombs",
            Mistake::WardensP2Bind => "Wardens P2 bind",
            Mistake::WardensP2SpecialPrayer => "Wardens P2 special prayer",
            Mistake::WardensP3Earthquake => "Wardens P3 earthquake",
            Mistake::WardensP3Kephri => "Wardens P3 Kephri bomb",
            Mistake::WardensP3Baba => "Wardens P3 Ba-Ba boulder",
            Mistake::WardensP3Lightning => "Wardens P3 lightning",
            Mistake::WardensP3Akkha => "Wardens P3 Akkha prayer",
            Mistake::WardensP3Zebak => "Wardens P3 Zebak prayer",
        }
    }

    /// Room the mistake belongs to. `None` for the room-agnostic death.
    pub fn room(self) -> Option<RaidRoom> {
        let room = match self {
            Mistake::Death => return None,
            Mistake::DeathHet | Mistake::HetPuzzleLight | Mistake::HetPuzzleDarkOrb => {
                RaidRoom::HetPuzzle
            }
            Mistake::DeathCrondis | Mistake::CrondisPuzzleLowWater => RaidRoom::CrondisPuzzle,
            Mistake::DeathScabaras => RaidRoom::ScabarasPuzzle,
            Mistake::DeathApmeken
            | Mistake::ApmekenPuzzleVent
            | Mistake::ApmekenPuzzlePillar
            | Mistake::ApmekenPuzzleCorruption
            | Mistake::ApmekenPuzzleVenom
            | Mistake::ApmekenPuzzleVolatile => RaidRoom::ApmekenPuzzle,
            Mistake::AkkhaSpecialQuadrantBomb
            | Mistake::AkkhaSpecialElementalOrbs
            | Mistake::AkkhaUnstableOrb => RaidRoom::Akkha,
            Mistake::ZebakAcidTile | Mistake::ZebakBloodCloud | Mistake::ZebakEarthquake => {
                RaidRoom::Zebak
            }
            Mistake::KephriBomb => RaidRoom::Kephri,
            Mistake::BabaSlam
            | Mistake::BabaBanana
            | Mistake::BabaFallingBoulder
            | Mistake::BabaProjectileBoulder => RaidRoom::Baba,
            Mistake::WardensP1Pyramid
            | Mistake::WardensP2Ddr
            | Mistake::WardensP2Windmill
            | Mistake::WardensP2Bombs
            | Mistake::WardensP2Bind
            | Mistake::WardensP2SpecialPrayer => RaidRoom::WardensP1P2,
            Mistake::DeathWardens
            | Mistake::WardensP3Earthquake
            | Mistake::WardensP3Kephri
            | Mistake::WardensP3Baba
            | Mistake::WardensP3Lightning
            | Mistake::WardensP3Akkha
            | Mistake::WardensP3Zebak => RaidRoom::WardensP3,
        };
        Some(room)
    }

    /// Path death credited for dying in `room`. Each path's puzzle and boss share one.
    pub fn room_death(room: RaidRoom) -> Option<Mistake> {
        match room {
            RaidRoom::HetPuzzle | RaidRoom::Akkha => Some(Mistake::DeathHet),
            RaidRoom::CrondisPuzzle | RaidRoom::Zebak => Some(Mistake::DeathCrondis),
            RaidRoom::ScabarasPuzzle | RaidRoom::Kephri => Some(Mistake::DeathScabaras),
            RaidRoom::ApmekenPuzzle | RaidRoom::Baba => Some(Mistake::DeathApmeken),
            RaidRoom::WardensP1P2 | RaidRoom::WardensP3 => Some(Mistake::DeathWardens),
            RaidRoom::LobbyOutside | RaidRoom::LobbyInside => None,
        }
    }

    pub fn is_death(self) -> bool {
        matches!(
            self,
            Mistake::Death
                | Mistake::DeathHet
                | Mistake::DeathCrondis
                | Mistake::DeathScabaras
                | Mistake::DeathApmeken
                | Mistake::DeathWardens
        )
    }
}

impl fmt::Display for Mistake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_deaths_cover_puzzle_and_boss() {
        assert_eq!(Mistake::room_death(RaidRoom::HetPuzzle), Some(Mistake::DeathHet));
        assert_eq!(Mistake::room_death(RaidRoom::Akkha), Some(Mistake::DeathHet));
        assert_eq!(Mistake::room_death(RaidRoom::Baba), Some(Mistake::DeathApmeken));
        assert_eq!(Mistake::room_death(RaidRoom::LobbyInside), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Mistake::AkkhaUnstableOrb.to_string(), "Akkha unstable orb");
        assert_eq!(Mistake::Death.room(), None);
        assert_eq!(Mistake::KephriBomb.room(), Some(RaidRoom::Kephri));
    }
}
