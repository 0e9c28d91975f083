#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub lit_chance: f32,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, lit_chance: f32) -> Self {
        Self { size, lit_chance }
    }

    pub fn new((size_x, size_y): Coord2, lit_chance: f32) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let lit_chance = lit_chance.clamp(0.0, 1.0);
        Self::new_unchecked((size_x, size_y), lit_chance)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((3, 3), 0.1)
    }
}
