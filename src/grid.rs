//! 8x8 bitmap flattening for image mode.
//!
//! Image mode is not a fourth codec: the grid is flattened row-major into a
//! 64-symbol string of `'1'`/`'0'` and fed to the RLE codec unchanged.
//! [`unflatten`] reverses the flattening so a caller can rebuild the grid
//! from a decoded string.

use crate::error::{Error, Result};

/// Width and height of the bitmap, in cells.
pub const GRID_SIZE: usize = 8;

/// An 8x8 grid of on/off cells, indexed `[row][column]`.
pub type Grid = [[bool; GRID_SIZE]; GRID_SIZE];

/// Flatten a grid row-major into a 64-symbol `'1'`/`'0'` string.
///
/// # Example
///
/// ```
/// use compresslab::grid::{flatten, Grid};
///
/// let mut grid: Grid = Default::default();
/// grid[0][0] = true;
/// let flat = flatten(&grid);
/// assert_eq!(flat.len(), 64);
/// assert!(flat.starts_with("10000000"));
/// ```
pub fn flatten(grid: &Grid) -> String {
    grid.iter()
        .flat_map(|row| row.iter().map(|&cell| if cell { '1' } else { '0' }))
        .collect()
}

/// Rebuild a grid from a flattened string.
///
/// The input must be exactly 64 symbols, each `'0'` or `'1'`; anything else
/// yields [`Error::GridFormat`].
pub fn unflatten(flat: &str) -> Result<Grid> {
    let cells: Vec<char> = flat.chars().collect();
    if cells.len() != GRID_SIZE * GRID_SIZE {
        return Err(Error::GridFormat(format!(
            "expected {} cells, found {}",
            GRID_SIZE * GRID_SIZE,
            cells.len()
        )));
    }
    let mut grid: Grid = Default::default();
    for (i, &cell) in cells.iter().enumerate() {
        grid[i / GRID_SIZE][i % GRID_SIZE] = match cell {
            '0' => false,
            '1' => true,
            other => {
                return Err(Error::GridFormat(format!("unexpected symbol {:?}", other)));
            }
        };
    }
    Ok(grid)
}
