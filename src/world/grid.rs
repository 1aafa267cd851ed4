use glam::Vec2;

/// Flat tile index of a ray that ran out of distance before hitting anything.
pub const NO_TILE: i32 = -1;

/// Material code reported for lookups outside the grid (fails closed).
pub const OOB_MATERIAL: u8 = 1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,

    #[error("grid of {0} tiles is not square")]
    NotSquare(usize),

    #[error("cell size must be positive and finite")]
    BadCellSize,
}

/// Immutable square tile layout.
///
/// * Tile code `0` is passable; any nonzero code is a solid wall whose value
///   doubles as its material id.
/// * Addressed either by `(col, row)` or by flat index `col + row * side`.
/// * Lookups outside the layout answer *solid* rather than failing, so ray
///   and collision math at the edges never has to special-case bounds.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<u8>,
    side: usize,
    cell_size: f32,
}

impl Grid {
    /// Build a grid from a flat row-major tile array.
    ///
    /// `cell_size` is the world-space width (= height) of one tile; callers
    /// typically derive it once from `viewport_height / side`.
    pub fn new(cells: Vec<u8>, cell_size: f32) -> Result<Self, GridError> {
        if cells.is_empty() {
            return Err(GridError::Empty);
        }
        let side = (cells.len() as f64).sqrt() as usize;
        if side * side != cells.len() {
            return Err(GridError::NotSquare(cells.len()));
        }
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(GridError::BadCellSize);
        }
        Ok(Self {
            cells,
            side,
            cell_size,
        })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World-space width (= height) of the whole layout.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.side as f32 * self.cell_size
    }

    /// Column/row of the tile containing world point `p`.
    #[inline]
    pub fn locate(&self, p: Vec2) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    /// Flat index for `(col, row)`, or `NO_TILE` when outside the layout.
    #[inline]
    pub fn flat_index(&self, col: i64, row: i64) -> i32 {
        let n = self.side as i64;
        if col < 0 || row < 0 || col >= n || row >= n {
            NO_TILE
        } else {
            (col + row * n) as i32
        }
    }

    /// Material code at `(col, row)`; out-of-range reads as a solid border.
    #[inline]
    pub fn tile(&self, col: i64, row: i64) -> u8 {
        let idx = self.flat_index(col, row);
        if idx == NO_TILE {
            OOB_MATERIAL
        } else {
            self.cells[idx as usize]
        }
    }

    #[inline]
    pub fn is_solid(&self, col: i64, row: i64) -> bool {
        self.tile(col, row) != 0
    }

    /// Axis-aligned box of tile `(col, row)` as `(min, max)` corners.
    /// Valid for out-of-range tiles too (the collision pass needs them).
    #[inline]
    pub fn tile_box(&self, col: i64, row: i64) -> (Vec2, Vec2) {
        let min = Vec2::new(col as f32 * self.cell_size, row as f32 * self.cell_size);
        (min, min + Vec2::splat(self.cell_size))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
