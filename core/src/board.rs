use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Complete state of a game in progress: which cells are lit, plus the cached
/// lit-cell count that the win check derives from.
///
/// A `GameState` is a value. [`GameState::apply_move`] returns a fresh state
/// and leaves `self` untouched, so the state a frontend is currently rendering
/// can never alias the one the next move is computed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    lights: Array2<bool>,
    lit_count: CellCount,
}

impl GameState {
    pub fn from_lit_mask(lights: Array2<bool>) -> Self {
        let lit_count = lights
            .iter()
            .filter(|&&lit| lit)
            .count()
            .try_into()
            .unwrap();
        Self { lights, lit_count }
    }

    /// Builds an all-off board of the given size and lights the listed cells.
    pub fn from_lit_coords(size: Coord2, lit_coords: &[Coord2]) -> Result<Self> {
        let mut lights: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in lit_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            lights[coords.to_nd_index()] = true;
        }

        Ok(Self::from_lit_mask(lights))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.lights.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.lights.len().try_into().unwrap()
    }

    pub fn lit_count(&self) -> CellCount {
        self.lit_count
    }

    /// True iff every cell is off.
    pub fn has_won(&self) -> bool {
        self.lit_count == 0
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Plays a move targeting `coords`: flips the target and its four
    /// orthogonal neighbors in a copy of the board and returns the result.
    ///
    /// Every candidate cell is bounds-checked independently, so near an edge
    /// or corner fewer cells flip, and a target outside the board contributes
    /// no flip of its own while its in-bounds neighbors still toggle.
    #[must_use = "apply_move returns the next state and leaves `self` unchanged"]
    pub fn apply_move(&self, coords: Coord2) -> Self {
        let mut lights = self.lights.clone();

        for pos in self.lights.iter_cross(coords) {
            let cell = &mut lights[pos.to_nd_index()];
            *cell = !*cell;
        }

        Self::from_lit_mask(lights)
    }
}

impl Index<Coord2> for GameState {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.lights[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord2, lit: &[Coord2]) -> GameState {
        GameState::from_lit_coords(size, lit).unwrap()
    }

    fn lit_cells(state: &GameState) -> Vec<Coord2> {
        let (size_x, size_y) = state.size();
        let mut lit = Vec::new();
        for y in 0..size_y {
            for x in 0..size_x {
                if state.is_lit((x, y)) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn constructed_board_has_declared_dimensions() {
        let state = board((4, 7), &[]);

        assert_eq!(state.size(), (4, 7));
        assert_eq!(state.total_cells(), 28);
    }

    #[test]
    fn all_off_board_is_won() {
        let state = board((3, 3), &[]);

        assert!(state.has_won());
        assert_eq!(state.lit_count(), 0);
    }

    #[test]
    fn single_lit_cell_is_not_won() {
        let state = board((3, 3), &[(2, 1)]);

        assert!(!state.has_won());
        assert_eq!(state.lit_count(), 1);
    }

    #[test]
    fn indexing_agrees_with_is_lit() {
        let state = board((3, 3), &[(2, 1)]);

        assert!(state[(2, 1)]);
        assert!(!state[(1, 2)]);
        assert_eq!(state[(2, 1)], state.is_lit((2, 1)));
    }

    #[test]
    fn from_lit_coords_rejects_out_of_bounds_cells() {
        let result = GameState::from_lit_coords((3, 3), &[(0, 0), (3, 0)]);

        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn center_move_flips_exactly_the_cross() {
        let state = board((3, 3), &[]);

        let next = state.apply_move((1, 1));

        assert_eq!(lit_cells(&next), [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
        assert!(!next.is_lit((0, 0)));
        assert!(!next.is_lit((2, 2)));
    }

    #[test]
    fn corner_move_flips_only_in_bounds_arms() {
        let state = board((3, 3), &[]);

        let next = state.apply_move((0, 0));

        assert_eq!(lit_cells(&next), [(0, 0), (1, 0), (0, 1)]);
        assert_eq!(next.lit_count(), 3);
    }

    #[test]
    fn repeating_a_move_restores_the_board() {
        let state = board((3, 3), &[(0, 2), (1, 0), (2, 2)]);

        let twice = state.apply_move((1, 1)).apply_move((1, 1));

        assert_eq!(twice, state);
    }

    #[test]
    fn apply_move_leaves_the_input_state_untouched() {
        let state = board((3, 3), &[(1, 1)]);

        let _next = state.apply_move((1, 1));

        assert_eq!(lit_cells(&state), [(1, 1)]);
        assert_eq!(state.lit_count(), 1);
    }

    #[test]
    fn out_of_bounds_target_still_flips_in_bounds_neighbors() {
        let state = board((3, 3), &[]);

        let next = state.apply_move((3, 1));

        assert_eq!(lit_cells(&next), [(2, 1)]);
    }

    #[test]
    fn solving_the_last_cell_wins() {
        let state = board((1, 1), &[(0, 0)]);
        assert!(!state.has_won());

        let next = state.apply_move((0, 0));

        assert!(next.has_won());
        assert_eq!(next.lit_count(), 0);
    }

    #[test]
    fn state_snapshot_round_trips_through_serde() {
        let state = board((3, 2), &[(0, 0), (2, 1)]);

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
    }
}
