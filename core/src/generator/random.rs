use ndarray::Array2;

use super::*;

/// Generation strategy that lights each cell with an independent uniform draw
/// against the configured chance. Seeded, so the same seed and config always
/// reproduce the same board.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> GameState {
        use rand::prelude::*;

        let chance = config.lit_chance;
        if !(0.0..=1.0).contains(&chance) {
            log::warn!("Lit chance {} outside [0, 1], clamping", chance);
        }
        let chance = chance.clamp(0.0, 1.0);

        // shortcut the degenerate fills
        if chance <= 0.0 {
            return GameState::from_lit_mask(Array2::default(config.size.to_nd_index()));
        }
        if chance >= 1.0 {
            return GameState::from_lit_mask(Array2::from_elem(config.size.to_nd_index(), true));
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let lights = Array2::from_shape_simple_fn(config.size.to_nd_index(), || {
            rng.random::<f32>() < chance
        });

        GameState::from_lit_mask(lights)
    }
}
