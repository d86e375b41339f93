//! Well-known shapes and placing them on a [`Game`].

use crate::cell::{Coord, Population};
use crate::error::{Error, Result};
use crate::grid::Game;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::fmt;

/// A named, immutable arrangement of live cells anchored at the origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    cells: Population,
    width: usize,
    height: usize,
}

impl Pattern {
    /// Builds a pattern from its live cells.
    ///
    /// The bounding box spans from the origin to the furthest cell, so an
    /// empty pattern is `0x0`.
    pub fn new(name: impl Into<String>, cells: impl IntoIterator<Item = Coord>) -> Self {
        let cells: Population = cells.into_iter().collect();
        let width = cells.iter().map(|c| c.column() + 1).max().unwrap_or(0);
        let height = cells.iter().map(|c| c.row() + 1).max().unwrap_or(0);
        Pattern {
            name: name.into(),
            cells,
            width,
            height,
        }
    }

    /// Parses a picture where every line is a row and `X` (or `x`) marks a
    /// live cell. Surrounding whitespace on each line is ignored.
    pub fn from_plaintext(name: impl Into<String>, text: &str) -> Self {
        Self::from_rows(name, text.lines())
    }

    fn from_rows<'a>(name: impl Into<String>, rows: impl IntoIterator<Item = &'a str>) -> Self {
        let cells = rows.into_iter().enumerate().flat_map(|(row, line)| {
            line.trim()
                .chars()
                .enumerate()
                .filter(|&(_, c)| c == 'X' || c == 'x')
                .map(move |(column, _)| Coord::new(column, row))
        });
        Self::new(name, cells)
    }

    fn from_points(name: &str, points: &[(usize, usize)]) -> Self {
        Self::new(name, points.iter().copied().map(Coord::from))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live cells of the pattern, relative to its top left corner.
    pub fn cells(&self) -> &Population {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the pattern fits on a `columns x rows` grid.
    pub fn fits(&self, columns: usize, rows: usize) -> bool {
        self.width <= columns && self.height <= rows
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Clears `game` and places `pattern` at its center.
///
/// A pattern larger than the grid is rejected with [`Error::PatternTooLarge`]
/// and the game is left untouched.
pub fn seed(game: &mut Game, pattern: &Pattern) -> Result<()> {
    let (columns, rows) = (game.columns(), game.rows());
    if !pattern.fits(columns, rows) {
        warn!(
            "shape {} ({}x{}) does not fit on a {}x{} grid",
            pattern.name, pattern.width, pattern.height, columns, rows
        );
        return Err(Error::PatternTooLarge {
            name: pattern.name.clone(),
            width: pattern.width,
            height: pattern.height,
            columns,
            rows,
        });
    }

    let offset_x = (columns - pattern.width) / 2;
    let offset_y = (rows - pattern.height) / 2;
    game.clear();
    for cell in &pattern.cells {
        let cell = cell.offset(offset_x, offset_y);
        game.set_alive(cell.column(), cell.row())?;
    }
    debug!(
        "seeded {} at offset ({}, {})",
        pattern.name, offset_x, offset_y
    );
    Ok(())
}

/// A read-only, ordered collection of patterns.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    patterns: Vec<Pattern>,
}

impl Catalog {
    /// The built-in shapes, in their fixed presentation order.
    pub fn builtin() -> Self {
        let patterns = vec![
            Pattern::from_points("Block", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
            Pattern::from_points("Boat", &[(0, 0), (0, 1), (1, 0), (1, 2), (2, 1)]),
            Pattern::from_points("Blinker", &[(0, 0), (1, 0), (2, 0)]),
            Pattern::from_points(
                "Toad",
                &[(0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0)],
            ),
            Pattern::from_points("Glider", &[(0, 0), (0, 1), (1, 0), (1, 2), (2, 0)]),
            Pattern::from_points(
                "Spaceship",
                &[
                    (0, 1),
                    (0, 2),
                    (0, 3),
                    (1, 0),
                    (1, 3),
                    (2, 3),
                    (3, 3),
                    (4, 0),
                    (4, 2),
                ],
            ),
            Pattern::from_rows("Pulsar", PULSAR.iter().copied()),
            Pattern::from_points(
                "Small Exploder",
                &[(0, 1), (0, 2), (1, 0), (1, 1), (1, 3), (2, 1), (2, 2)],
            ),
            Pattern::from_rows("Exploder", EXPLODER.iter().copied()),
            Pattern::new("10 Cell Row", (0..10).map(|column| Coord::new(column, 0))),
            Pattern::from_rows("Tumbler", TUMBLER.iter().copied()),
            Pattern::from_rows("Gosper Glider Gun", GOSPER_GLIDER_GUN.iter().copied()),
            Pattern::from_rows("r-Pentomino", R_PENTOMINO.iter().copied()),
            Pattern::from_rows("pi-Heptomino", PI_HEPTOMINO.iter().copied()),
            Pattern::from_rows(
                "Lightweight Spaceship",
                LIGHTWEIGHT_SPACESHIP.iter().copied(),
            ),
            Pattern::from_rows("232P7H3V0", SPACESHIP_232P7H3V0.iter().copied()),
        ];
        Catalog { patterns }
    }

    /// All patterns in insertion order.
    pub fn all(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

static CATALOG: OnceCell<Catalog> = OnceCell::new();

/// Builds the process-wide catalog. Later calls return the same instance.
pub fn init() -> &'static Catalog {
    CATALOG.get_or_init(|| {
        let catalog = Catalog::builtin();
        info!("loaded {} shapes", catalog.len());
        catalog
    })
}

/// The process-wide catalog, built on first use if [`init`] was not called.
pub fn global() -> &'static Catalog {
    init()
}

/// Looks a built-in shape up by name.
pub fn by_name(name: &str) -> Option<&'static Pattern> {
    global().get(name)
}

/// Whether a built-in shape with this name exists.
pub fn exists(name: &str) -> bool {
    global().contains(name)
}

const EXPLODER: &[&str] = &[
    "X.X.X",
    "X...X",
    "X...X",
    "X...X",
    "X.X.X",
];

const PULSAR: &[&str] = &[
    "..XX.....XX..",
    "...XX...XX...",
    "X..X.X.X.X..X",
    "XXX.XX.XX.XXX",
    ".X.X.X.X.X.X.",
    "..XXX...XXX..",
    ".............",
    "..XXX...XXX..",
    ".X.X.X.X.X.X.",
    "XXX.XX.XX.XXX",
    "X..X.X.X.X..X",
    "...XX...XX...",
    "..XX.....XX..",
];

const TUMBLER: &[&str] = &[
    ".XX.XX.",
    ".XX.XX.",
    "..X.X..",
    "X.X.X.X",
    "X.X.X.X",
    "XX...XX",
];

const GOSPER_GLIDER_GUN: &[&str] = &[
    ".......................XX.........XX..",
    "......................X.X.........XX..",
    "XX.......XX...........XX..............",
    "XX......X.X...........................",
    "........XX......XX....................",
    "................X.X...................",
    "................X.....................",
    "...................................XX.",
    "...................................X.X",
    "...................................X..",
    "......................................",
    "......................................",
    "........................XXX...........",
    "........................X.............",
    ".........................X............",
];

const R_PENTOMINO: &[&str] = &[
    ".XX",
    "XX.",
    ".X.",
];

const PI_HEPTOMINO: &[&str] = &[
    "XXX",
    "X.X",
    "X.X",
];

const LIGHTWEIGHT_SPACESHIP: &[&str] = &[
    ".....................X...",
    "..................XXXX...",
    ".............X..X.XX.....",
    ".............X...........",
    "XXXX........X...X.XX.....",
    "X...X.....XX.XX.X.X.XXXXX",
    "X.........XX.X.X.X..XXXXX",
    ".X..X..XX..X...XXX..X.XX.",
    "......X..X.XX............",
    "......X....XX............",
    "......X..X.XX............",
    ".X..X..XX..X...XXX..X.XX.",
    "X.........XX.X.X.X..XXXXX",
    "X...X.....XX.XX.X.X.XXXXX",
    "XXXX........X...X.XX.....",
    ".............X...........",
    ".............X..X.XX.....",
    "..................XXXX...",
    ".....................X...",
];

const SPACESHIP_232P7H3V0: &[&str] = &[
    "...................XXX.........XXX.................",
    "..................X...X.......X...X................",
    ".................X.X...X.....X...X.X...............",
    ".................X...XX.......XX...X...............",
    ".................XXX...X.....X...XXX...............",
    "................X...XX.XXX.XXX.XX...X..............",
    "................XX..X...XX.XX...X..XX..............",
    "...............XXX...XXXXX.XXXXX...XXX.............",
    ".......................X.....X.....................",
    "....................X...........X..................",
    "...............X....X...........X....X.............",
    "...............X....XXXX.....XXXX....X.............",
    "...................X....X...X....X.................",
    "..................XX.XXX.....XXX.XX................",
    "..................XX.X...X.X...X.XX................",
    "..............XXX.......XX.XX.......XXX............",
    ".............X...XX....X.X.X.X....XX...X...........",
    "............X...X...................X...X..........",
    "............X.........XXX...XXX.........X..........",
    "................X......XX...XX......X..............",
    "...........X............X...X............X.........",
    "...........X..XX.....X.........X.....XX..X.........",
    "............XX........X.......X........XX..........",
    "..........X............X.....X............X........",
    ".........XXX.............................XXX.......",
    "........XX..X...........................X..XX......",
    "...........XX...........................XX.........",
    "...........X.............................X.........",
    "...................................................",
    "........X...................................X......",
    ".........XX...............................XX.......",
    ".......X..X...............................X..X.....",
    "......X.......................................X....",
    ".....XX.......................................XX...",
    "....XXXX.....................................XXXX..",
    "...X.............................................X.",
    "...XXX.........................................XXX.",
    "..X...............................................X",
    "....XX.........................................XX..",
    "......X.......................................X....",
    "....XX.........................................XX..",
    ".....X.........................................X...",
    "....X...........................................X..",
    "....X...........................................X..",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_is_fixed() {
        let names: Vec<_> = Catalog::builtin().names().map(String::from).collect();
        assert_eq!(
            names,
            [
                "Block",
                "Boat",
                "Blinker",
                "Toad",
                "Glider",
                "Spaceship",
                "Pulsar",
                "Small Exploder",
                "Exploder",
                "10 Cell Row",
                "Tumbler",
                "Gosper Glider Gun",
                "r-Pentomino",
                "pi-Heptomino",
                "Lightweight Spaceship",
                "232P7H3V0",
            ]
        );
    }

    #[test]
    fn bounding_boxes() {
        let catalog = Catalog::builtin();
        let size = |name| {
            let p = catalog.get(name).unwrap();
            (p.width(), p.height())
        };
        assert_eq!(size("Block"), (2, 2));
        assert_eq!(size("Blinker"), (3, 1));
        assert_eq!(size("10 Cell Row"), (10, 1));
        assert_eq!(size("Pulsar"), (13, 13));
        assert_eq!(size("Gosper Glider Gun"), (38, 15));
        assert_eq!(size("232P7H3V0"), (51, 44));
    }

    #[test]
    fn plaintext_rows_and_case() {
        let pattern = Pattern::from_plaintext("r", "  .Xx\nXX.\n .X. ");
        let cells: Vec<_> = pattern
            .cells()
            .iter()
            .map(|c| (c.column(), c.row()))
            .collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]);
        assert_eq!((pattern.width(), pattern.height()), (3, 3));
    }

    #[test]
    fn empty_pattern_is_zero_sized() {
        let pattern = Pattern::new("nothing", std::iter::empty());
        assert_eq!((pattern.width(), pattern.height()), (0, 0));
        assert!(pattern.fits(1, 1));
    }

    #[test]
    fn seeding_centers_the_pattern() {
        let mut game = Game::new(7, 5).unwrap();
        let blinker = Catalog::builtin().get("Blinker").unwrap().clone();
        seed(&mut game, &blinker).unwrap();
        // offset ((7 - 3) / 2, (5 - 1) / 2) = (2, 2)
        assert_eq!(game.to_string(), ".......\n.......\n..XXX..\n.......\n.......");
    }

    #[test]
    fn oversized_pattern_is_rejected() {
        let mut game = Game::new(4, 4).unwrap();
        game.set_alive(0, 0).unwrap();
        game.next();
        game.set_alive(3, 3).unwrap();
        let gun = Catalog::builtin().get("Gosper Glider Gun").unwrap().clone();
        let before = game.population();

        let err = seed(&mut game, &gun).unwrap_err();
        assert!(matches!(err, Error::PatternTooLarge { width: 38, height: 15, .. }));
        assert!(!err.is_invalid_argument());
        assert_eq!(game.population(), before);
        assert_eq!(game.generations(), 1);
    }

    #[test]
    fn pattern_filling_the_grid_exactly_is_placed_at_the_origin() {
        let mut game = Game::new(2, 2).unwrap();
        let block = Catalog::builtin().get("Block").unwrap().clone();
        assert!(block.fits(2, 2));
        seed(&mut game, &block).unwrap();
        assert_eq!(game.to_string(), "XX\nXX");
    }

    #[test]
    fn pattern_too_wide_on_one_axis_is_rejected() {
        let mut game = Game::new(9, 20).unwrap();
        game.set_alive(4, 10).unwrap();
        let row = Catalog::builtin().get("10 Cell Row").unwrap().clone();
        assert!(!row.fits(9, 20));

        let err = seed(&mut game, &row).unwrap_err();
        assert!(matches!(
            err,
            Error::PatternTooLarge { width: 10, height: 1, columns: 9, rows: 20, .. }
        ));
        assert_eq!(game.population_count(), 1);
        assert!(game.is_alive(4, 10).unwrap());

        // Wide enough but one row short
        let gun = Catalog::builtin().get("Gosper Glider Gun").unwrap().clone();
        let mut game = Game::new(40, 14).unwrap();
        assert!(matches!(
            seed(&mut game, &gun),
            Err(Error::PatternTooLarge { height: 15, rows: 14, .. })
        ));
        assert_eq!(game.population_count(), 0);
    }

    #[test]
    fn global_catalog_is_shared() {
        assert!(std::ptr::eq(init(), global()));
        assert!(exists("Glider"));
        assert!(!exists("glider"));
        assert_eq!(by_name("Toad").map(Pattern::width), Some(4));
    }
}
