//! Tile coordinates

use serde::{Deserialize, Serialize};

/// World partition identifier reported by the client (64×64 tile squares).
pub type RegionId = i32;

/// A single world tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    /// Tile at region-local coordinates inside the given region.
    pub const fn from_region(region: RegionId, region_x: i32, region_y: i32, plane: i32) -> Self {
        Self {
            x: ((region >> 8) << 6) + region_x,
            y: ((region & 0xFF) << 6) + region_y,
            plane,
        }
    }

    pub const fn region_id(&self) -> RegionId {
        ((self.x >> 6) << 8) | (self.y >> 6)
    }

    pub const fn dx(self, dx: i32) -> Self {
        Self::new(self.x + dx, self.y, self.plane)
    }

    pub const fn dy(self, dy: i32) -> Self {
        Self::new(self.x, self.y + dy, self.plane)
    }

    /// All tiles in the square of the given radius around `self` (radius 1 = 3×3).
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = Tile> {
        (-radius..=radius)
            .flat_map(move |dx| (-radius..=radius).map(move |dy| self.dx(dx).dy(dy)))
    }

    /// `size`×`size` square whose south-west corner is `self`.
    pub fn square_from_south_west(self, size: i32) -> impl Iterator<Item = Tile> {
        (0..size).flat_map(move |dx| (0..size).map(move |dy| self.dx(dx).dy(dy)))
    }

    /// One step from `self` toward `other` on each axis.
    pub fn step_toward(self, other: Tile) -> Self {
        self.dx((other.x - self.x).signum()).dy((other.y - self.y).signum())
    }
}
