//! Dense symmetric adjacency matrix over the canonical vertex order.

/// Square 0/1 matrix where cell `(i, j)` is `1` iff vertices `i` and `j`
/// interact.
///
/// Rows and columns follow [`crate::Interactome::vertices`]. Every edge sets
/// both `(i, j)` and `(j, i)`, so the matrix is symmetric and its diagonal is
/// zero.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use interactome_core::Interactome;
///
/// let graph = Interactome::from_reader("pair", Cursor::new("1\nB A\n"))?;
/// let matrix = graph.matrix();
/// assert_eq!(matrix.dimension(), 2);
/// assert_eq!(matrix.row(0), Some(&[0, 1][..]));
/// assert!(matrix.is_adjacent(1, 0));
/// # Ok::<(), interactome_core::InteractomeError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyMatrix {
    dimension: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    /// Creates an all-zero matrix of the given dimension.
    #[must_use]
    pub fn zeroed(dimension: usize) -> Self {
        Self {
            dimension,
            cells: vec![0; dimension * dimension],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub fn dimension(&self) -> usize { self.dimension }

    /// Marks `left` and `right` as adjacent in both directions.
    ///
    /// Out-of-range indices are ignored.
    pub(crate) fn connect(&mut self, left: usize, right: usize) {
        if left >= self.dimension || right >= self.dimension {
            return;
        }
        let forward = self.offset(left, right);
        let backward = self.offset(right, left);
        self.cells[forward] = 1;
        self.cells[backward] = 1;
    }

    /// Returns the cell `(row, column)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        if row >= self.dimension || column >= self.dimension {
            return None;
        }
        self.cells.get(self.offset(row, column)).copied()
    }

    /// Whether `row` and `column` are adjacent. Out-of-range indices are not.
    #[must_use]
    pub fn is_adjacent(&self, row: usize, column: usize) -> bool {
        self.get(row, column) == Some(1)
    }

    /// Returns a full row, or `None` when `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.dimension {
            return None;
        }
        let start = row * self.dimension;
        self.cells.get(start..start + self.dimension)
    }

    /// Iterates the column indices set in `row`.
    pub fn row_neighbours(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(row)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(column, cell)| (*cell == 1).then_some(column))
    }

    /// Counts set cells strictly above the diagonal.
    #[must_use]
    pub fn upper_triangle_ones(&self) -> usize {
        (0..self.dimension)
            .map(|row| {
                self.row(row)
                    .map_or(0, |cells| cells.iter().skip(row + 1).filter(|cell| **cell == 1).count())
            })
            .sum()
    }

    /// Returns the first `(row, column)` whose mirror differs, if any.
    pub(crate) fn first_asymmetry(&self) -> Option<(usize, usize)> {
        (0..self.dimension).find_map(|row| {
            (row..self.dimension)
                .find(|&column| self.get(row, column) != self.get(column, row))
                .map(|column| (row, column))
        })
    }

    const fn offset(&self, row: usize, column: usize) -> usize {
        row * self.dimension + column
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn connect_sets_both_cells() {
        let mut matrix = AdjacencyMatrix::zeroed(3);
        matrix.connect(0, 2);
        assert_eq!(matrix.get(0, 2), Some(1));
        assert_eq!(matrix.get(2, 0), Some(1));
        assert_eq!(matrix.get(1, 1), Some(0));
        assert_eq!(matrix.upper_triangle_ones(), 1);
        assert_eq!(matrix.first_asymmetry(), None);
    }

    #[rstest]
    #[case(3, 0)]
    #[case(0, 3)]
    fn out_of_range_access_is_none(#[case] row: usize, #[case] column: usize) {
        let matrix = AdjacencyMatrix::zeroed(3);
        assert_eq!(matrix.get(row, column), None);
        assert!(!matrix.is_adjacent(row, column));
    }

    #[rstest]
    fn row_neighbours_lists_set_columns() {
        let mut matrix = AdjacencyMatrix::zeroed(4);
        matrix.connect(1, 0);
        matrix.connect(1, 3);
        assert_eq!(matrix.row_neighbours(1).collect::<Vec<_>>(), [0, 3]);
        assert_eq!(matrix.row_neighbours(9).count(), 0);
    }

    #[rstest]
    fn detects_asymmetry() {
        let mut matrix = AdjacencyMatrix::zeroed(2);
        matrix.cells[1] = 1;
        assert_eq!(matrix.first_asymmetry(), Some((0, 1)));
    }

    #[rstest]
    fn empty_matrix_has_no_rows() {
        let matrix = AdjacencyMatrix::zeroed(0);
        assert_eq!(matrix.dimension(), 0);
        assert_eq!(matrix.row(0), None);
        assert_eq!(matrix.upper_triangle_ones(), 0);
    }
}
