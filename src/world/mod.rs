mod actor;
mod grid;

pub use actor::{Actor, wrap_degrees};

pub use grid::{EMPTY, Grid, GridError, MAX_VARIANT, Tile, WALL};
