/*!
* A live cell dies if it has fewer than two live neighbors.
* A live cell with two or three live neighbors lives on to the next generation.
* A live cell dies if it has more than three live neighbors.
* A dead cell will be brought back to life if it has exactly three live neighbors.
*
* The grid is finite and its borders are hard edges. Only live cells are stored.
*/

pub mod catalog;
pub mod cell;
pub mod config;
mod error;
pub mod grid;
pub mod notifier;

pub use catalog::{seed, Catalog, Pattern};
pub use cell::{Coord, Population};
pub use config::Speed;
pub use error::{Error, Result};
pub use grid::{CellState, Game};
pub use notifier::{Listener, Notifier};
