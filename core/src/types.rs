use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for lit-cell counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait CrossIterExt {
    /// Iterates the in-bounds members of the plus-shaped cross centered on
    /// `index`: the cell itself and its four orthogonal neighbors.
    fn iter_cross(&self, index: Coord2) -> CrossIter;
}

impl<T> CrossIterExt for Array2<T> {
    fn iter_cross(&self, index: Coord2) -> CrossIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        CrossIter::new(index, size)
    }
}

// Diagonals are never part of a toggle, only the center and the four
// orthogonal displacements.
const DISPLACEMENTS: [(isize, isize); 5] = [(0, 0), (0, -1), (-1, 0), (1, 0), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct CrossIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl CrossIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for CrossIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn cross_at_center_has_five_members() {
        let grid: Array2<bool> = Array2::default((3, 3));

        let cross: Vec<_> = grid.iter_cross((1, 1)).collect();

        assert_eq!(cross, [(1, 1), (1, 0), (0, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn cross_at_corner_drops_out_of_bounds_arms() {
        let grid: Array2<bool> = Array2::default((3, 3));

        let cross: Vec<_> = grid.iter_cross((0, 0)).collect();

        assert_eq!(cross, [(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn cross_with_out_of_bounds_center_keeps_in_bounds_arms() {
        let grid: Array2<bool> = Array2::default((3, 3));

        let cross: Vec<_> = grid.iter_cross((3, 1)).collect();

        assert_eq!(cross, [(2, 1)]);
    }
}
