//! Uniform grid for neighbour lookup.
//!
//! With cell size equal to the interaction range, any two points closer than
//! that range share a cell or sit in adjacent cells, so only those pairs need
//! checking.

use std::collections::BTreeMap;

type CellKey = (i64, i64);

/// Forward half of the 8-neighbourhood; visiting only these keeps each
/// unordered cell pair to a single visit.
const FORWARD: [CellKey; 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];

#[derive(Debug)]
pub struct SpatialGrid {
    cell: f64,
    cells: BTreeMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn build(points: impl IntoIterator<Item = (f64, f64)>, cell: f64) -> Self {
        let mut grid = Self { cell, cells: BTreeMap::new() };
        for (index, (x, y)) in points.into_iter().enumerate() {
            let key = grid.key(x, y);
            grid.cells.entry(key).or_default().push(index);
        }
        grid
    }

    fn key(&self, x: f64, y: f64) -> CellKey {
        ((x / self.cell).floor() as i64, (y / self.cell).floor() as i64)
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Call `f` once for every unordered pair of indices in the same or
    /// adjacent cells.
    pub fn for_each_candidate_pair(&self, mut f: impl FnMut(usize, usize)) {
        for (&(cx, cy), members) in &self.cells {
            for (a, &i) in members.iter().enumerate() {
                for &j in &members[a + 1..] {
                    f(i, j);
                }
            }
            for (dx, dy) in FORWARD {
                let Some(others) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &i in members {
                    for &j in others {
                        f(i, j);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pairs(grid: &SpatialGrid) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        grid.for_each_candidate_pair(|i, j| out.push((i.min(j), i.max(j))));
        out
    }

    #[test]
    fn test_each_pair_visited_once() {
        let points = [(5.0, 5.0), (95.0, 5.0), (105.0, 5.0), (105.0, 105.0), (305.0, 5.0)];
        let grid = SpatialGrid::build(points, 100.0);
        let visited = pairs(&grid);
        let unique: HashSet<_> = visited.iter().copied().collect();
        assert_eq!(unique.len(), visited.len());
        assert!(unique.contains(&(0, 1)));
        assert!(unique.contains(&(1, 2)));
        assert!(unique.contains(&(0, 3)));
        // three cells away
        assert!(!unique.iter().any(|&(i, j)| i == 4 || j == 4));
    }

    #[test]
    fn test_negative_coordinates_get_their_own_cells() {
        let grid = SpatialGrid::build([(-1.0, 0.0), (1.0, 0.0)], 100.0);
        assert_eq!(grid.occupied_cells(), 2);
        assert_eq!(pairs(&grid), vec![(0, 1)]);
    }
}
