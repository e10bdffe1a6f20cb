//! Toroidal neighbor topology.
//!
//! Every cell of an R×C lattice gets its 8 wrapped neighbors computed once,
//! up front. The result is immutable and can be shared by any number of
//! engines built on the same dimensions.

use serde::{Deserialize, Serialize};

use super::GridError;
use crate::schema::checked_cell_count;

/// Relative offsets of the Moore neighborhood, row-major, center excluded.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Grid dimensions. Both axes are guaranteed non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Dimensions {
    rows: usize,
    columns: usize,
}

impl Dimensions {
    /// Validate and create dimensions.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        if checked_cell_count(rows, columns).is_none() {
            return Err(GridError::TooLarge { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells (rows * columns). Cannot overflow.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }

    /// Row-major index of `coord`, rejecting anything off the lattice.
    pub fn index(&self, coord: Coord) -> Result<usize, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfBounds {
                row: coord.row,
                column: coord.column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(coord.row * self.columns + coord.column)
    }

    /// Inverse of [`Dimensions::index`]. `index` must be below `cell_count()`.
    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index / self.columns, index % self.columns)
    }

    /// Wrap a signed position onto the torus (mathematical modulo on both axes).
    #[inline]
    pub fn wrap(&self, row: isize, column: isize) -> Coord {
        Coord::new(
            row.rem_euclid(self.rows as isize) as usize,
            column.rem_euclid(self.columns as isize) as usize,
        )
    }
}

impl TryFrom<(usize, usize)> for Dimensions {
    type Error = GridError;

    fn try_from((rows, columns): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(rows, columns)
    }
}

impl From<Dimensions> for (usize, usize) {
    fn from(dims: Dimensions) -> Self {
        (dims.rows, dims.columns)
    }
}

/// A lattice position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

/// Precomputed wrapped neighbors for every cell.
///
/// Neighbors are stored as row-major cell indices, one `[usize; 8]` per cell,
/// in [`NEIGHBOR_OFFSETS`] order. On grids with fewer than 3 rows or columns
/// several offsets reduce to the same cell (possibly the cell itself); those
/// entries are kept, so every cell always has exactly 8 neighbor slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    dimensions: Dimensions,
    neighbors: Vec<[usize; 8]>,
}

impl Topology {
    /// Build the neighbor table for `dimensions`.
    pub fn build(dimensions: Dimensions) -> Self {
        let neighbors = (0..dimensions.cell_count())
            .map(|index| {
                let Coord { row, column } = dimensions.coord(index);
                NEIGHBOR_OFFSETS.map(|(dr, dc)| {
                    let n = dimensions.wrap(row as isize + dr, column as isize + dc);
                    n.row * dimensions.columns + n.column
                })
            })
            .collect();

        log::debug!(
            "Built toroidal topology for {}x{} grid",
            dimensions.rows,
            dimensions.columns
        );

        Self {
            dimensions,
            neighbors,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Neighbor indices of the cell at row-major `index`.
    #[inline]
    pub fn neighbor_indices(&self, index: usize) -> &[usize; 8] {
        &self.neighbors[index]
    }

    /// Whole neighbor table, indexed by row-major cell index.
    #[inline]
    pub fn table(&self) -> &[[usize; 8]] {
        &self.neighbors
    }

    /// Neighbor coordinates of `coord`.
    pub fn neighbors(&self, coord: Coord) -> Result<[Coord; 8], GridError> {
        let index = self.dimensions.index(coord)?;
        Ok(self.neighbors[index].map(|n| self.dimensions.coord(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn topology(rows: usize, columns: usize) -> Topology {
        Topology::build(Dimensions::new(rows, columns).unwrap())
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Dimensions::new(0, 5),
            Err(GridError::InvalidDimensions { rows: 0, columns: 5 })
        ));
        assert!(Dimensions::new(5, 0).is_err());
    }

    #[test]
    fn test_overflowing_cell_count_rejected() {
        assert!(matches!(
            Dimensions::new(1 << 32, 1 << 32),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            Dimensions::new(usize::MAX, 1),
            Err(GridError::TooLarge { .. })
        ));
        assert!(serde_json::from_str::<Dimensions>("[4294967296,4294967296]").is_err());
    }

    #[test]
    fn test_wraps_to_opposite_edge() {
        let topo = topology(3, 3);
        let neighbors = topo.neighbors(Coord::new(0, 0)).unwrap();

        for expected in [(2usize, 2usize), (2, 0), (2, 1), (0, 2), (1, 2)] {
            assert!(
                neighbors.contains(&Coord::from(expected)),
                "missing wrapped neighbor {:?}",
                expected
            );
        }
        assert!(neighbors.contains(&Coord::new(0, 1)));
        assert!(neighbors.contains(&Coord::new(1, 0)));
        assert!(neighbors.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn test_offset_order() {
        let topo = topology(5, 7);
        let neighbors = topo.neighbors(Coord::new(2, 3)).unwrap();
        assert_eq!(neighbors[0], Coord::new(1, 2));
        assert_eq!(neighbors[3], Coord::new(2, 2));
        assert_eq!(neighbors[7], Coord::new(3, 4));
    }

    #[test]
    fn test_single_cell_grid() {
        // Every offset folds back onto the only cell.
        let topo = topology(1, 1);
        assert_eq!(topo.neighbor_indices(0), &[0; 8]);
    }

    #[test]
    fn test_single_row_keeps_eight_slots() {
        let topo = topology(1, 4);
        let neighbors = topo.neighbors(Coord::new(0, 0)).unwrap();
        let own = neighbors.iter().filter(|&&c| c == Coord::new(0, 0)).count();
        let left = neighbors.iter().filter(|&&c| c == Coord::new(0, 3)).count();
        let right = neighbors.iter().filter(|&&c| c == Coord::new(0, 1)).count();
        assert_eq!((own, left, right), (2, 3, 3));
    }

    #[test]
    fn test_out_of_range_neighbors() {
        let topo = topology(4, 4);
        assert!(matches!(
            topo.neighbors(Coord::new(4, 0)),
            Err(GridError::OutOfBounds { row: 4, .. })
        ));
    }

    #[test]
    fn test_dimensions_serde() {
        let dims = Dimensions::new(3, 4).unwrap();
        let json = serde_json::to_string(&dims).unwrap();
        assert_eq!(json, "[3,4]");
        assert!(serde_json::from_str::<Dimensions>("[0,4]").is_err());
    }

    proptest! {
        #[test]
        fn prop_every_cell_has_eight_in_range_neighbors(rows in 1usize..24, columns in 1usize..24) {
            let topo = topology(rows, columns);
            prop_assert_eq!(topo.table().len(), rows * columns);
            for &slots in topo.table() {
                prop_assert_eq!(slots.len(), 8);
                prop_assert!(slots.iter().all(|&n| n < rows * columns));
            }
        }

        #[test]
        fn prop_distinct_and_not_self_on_large_grids(rows in 3usize..24, columns in 3usize..24) {
            let topo = topology(rows, columns);
            for (index, slots) in topo.table().iter().enumerate() {
                let mut sorted = *slots;
                sorted.sort_unstable();
                prop_assert!(sorted.windows(2).all(|w| w[0] != w[1]));
                prop_assert!(!slots.contains(&index));
            }
        }

        #[test]
        fn prop_neighborhood_is_symmetric(rows in 3usize..16, columns in 3usize..16) {
            let topo = topology(rows, columns);
            for (index, slots) in topo.table().iter().enumerate() {
                for &n in slots {
                    prop_assert!(topo.neighbor_indices(n).contains(&index));
                }
            }
        }
    }
}
