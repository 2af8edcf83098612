use crate::grid::CellBuffer;
use crate::types::{CellPos, Dimensions};

/// Immutable copy of a grid taken at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridSnapshot {
    dims: Dimensions,
    generation: u64,
    cells: CellBuffer,
}

impl GridSnapshot {
    pub(crate) fn new(dims: Dimensions, generation: u64, cells: CellBuffer) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self {
            dims,
            generation,
            cells,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, row: i64, col: i64) -> Option<bool> {
        self.dims
            .index_of(CellPos::new(row, col))
            .map(|idx| self.cells[idx])
    }

    /// Rows top to bottom, each `cols` long
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.dims.cols)
    }

    /// Live cells as (row, col), row-major order
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / cols, idx % cols))
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Nested `rows x cols` copy of the cells
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.iter_rows().map(<[bool]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;

    #[test]
    fn test_snapshot_is_detached_from_grid() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(0, 1, true);
        let snap = grid.snapshot();

        grid.set(1, 2, true);
        assert_eq!(snap.get(1, 2), Some(false));
        assert_eq!(snap.live_cells(), vec![(0, 1)]);
    }

    #[test]
    fn test_rows_view() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(1, 0, true);
        let snap = grid.snapshot();

        assert_eq!(snap.iter_rows().len(), 2);
        let rows: Vec<&[bool]> = snap.iter_rows().collect();
        assert_eq!(rows[0], &[false, false, false][..]);
        assert_eq!(rows[1], &[true, false, false][..]);
        assert_eq!(
            snap.to_rows(),
            vec![vec![false, false, false], vec![true, false, false]]
        );
    }
}
