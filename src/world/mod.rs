mod grid;

pub use grid::{Grid, GridError, NO_TILE, OOB_MATERIAL};
