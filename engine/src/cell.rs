//! Cell coordinates and the sparse set of live cells.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

/// Offsets of the Moore neighborhood.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Position of a cell on the grid.
///
/// Coordinates are ordered row by row, so iterating a [`Population`]
/// yields cells in reading order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    column: usize,
    row: usize,
}

impl Coord {
    pub const fn new(column: usize, row: usize) -> Self {
        Coord { column, row }
    }

    /// Builds a coordinate from signed input, rejecting negative components.
    pub fn try_new(column: isize, row: isize) -> Result<Self> {
        match (usize::try_from(column), usize::try_from(row)) {
            (Ok(c), Ok(r)) => Ok(Coord::new(c, r)),
            _ => Err(Error::NegativeCoordinate { column, row }),
        }
    }

    pub const fn column(self) -> usize {
        self.column
    }

    pub const fn row(self) -> usize {
        self.row
    }

    /// Translates the coordinate by a non-negative offset.
    pub const fn offset(self, dx: usize, dy: usize) -> Self {
        Coord::new(self.column + dx, self.row + dy)
    }

    /// Whether the coordinate lies in `[0, columns) x [0, rows)`.
    pub const fn within(self, columns: usize, rows: usize) -> bool {
        self.column < columns && self.row < rows
    }

    /// The Moore neighbors of this cell that lie on a `columns x rows` grid.
    ///
    /// There is no wraparound: neighbors past an edge do not exist.
    pub fn neighbors(self, columns: usize, rows: usize) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let column = self.column.checked_add_signed(dx)?;
            let row = self.row.checked_add_signed(dy)?;
            let neighbor = Coord::new(column, row);
            neighbor.within(columns, rows).then_some(neighbor)
        })
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((column, row): (usize, usize)) -> Self {
        Coord::new(column, row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.column, self.row)
    }
}

/// The set of live cells.
///
/// Only live cells are stored; every coordinate absent from the set is dead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Population {
    cells: BTreeSet<Coord>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Marks a cell alive. Returns `false` if it already was.
    pub fn insert(&mut self, coord: Coord) -> bool {
        self.cells.insert(coord)
    }

    /// Marks a cell dead. Returns `false` if it already was.
    pub fn remove(&mut self, coord: Coord) -> bool {
        self.cells.remove(&coord)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Keeps only the cells for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Coord) -> bool) {
        self.cells.retain(keep);
    }

    /// Iterates the live cells in row-major order.
    pub fn iter(&self) -> btree_set::Iter<'_, Coord> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Coord;
    type IntoIter = btree_set::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Population {
    type Item = Coord;
    type IntoIter = btree_set::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl FromIterator<Coord> for Population {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Population {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coord> for Population {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_are_rejected() {
        assert_eq!(Coord::try_new(3, 4), Ok(Coord::new(3, 4)));
        assert_eq!(
            Coord::try_new(-1, 4),
            Err(Error::NegativeCoordinate { column: -1, row: 4 })
        );
        assert!(Coord::try_new(0, -7).is_err());
    }

    #[test]
    fn neighbors_stop_at_edges() {
        let corner: Vec<_> = Coord::new(0, 0).neighbors(5, 5).collect();
        assert_eq!(
            corner,
            vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
        assert_eq!(Coord::new(2, 2).neighbors(5, 5).count(), 8);
        assert_eq!(Coord::new(4, 2).neighbors(5, 5).count(), 5);
        assert_eq!(Coord::new(0, 0).neighbors(1, 1).count(), 0);
    }

    #[test]
    fn population_iterates_row_major() {
        let population: Population = [(2, 0), (0, 1), (1, 0), (0, 0)]
            .into_iter()
            .map(Coord::from)
            .collect();
        let order: Vec<_> = population.iter().map(|c| (c.column(), c.row())).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1)]);
    }

    #[test]
    fn display_matches_angle_brackets() {
        assert_eq!(Coord::new(7, 3).to_string(), "<7, 3>");
    }
}
