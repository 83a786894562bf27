//! Static deck layout
//!
//! A grid of tiles drawn behind the action. The simulation does not collide
//! against it; units and hostiles cross walls freely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::consts::TILE_SIZE;

/// Malformed tile grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown layout tile code {0}")]
    UnknownCell(u8),
}

/// Tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Floor,
    Wall,
    Door,
}

impl CellKind {
    /// Decode the compact layout code (0 floor, 1 wall, 2 door)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Floor),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Door),
            _ => None,
        }
    }
}

/// The default deck: three rooms over two decks joined by doors
const DECK_LAYOUT: [[u8; 25]; 9] = [
    [1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1],
];

/// Rectangular tile grid, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub columns: usize,
    pub rows: usize,
    pub tile_size: f32,
    cells: Vec<CellKind>,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        let rows: Vec<&[u8]> = DECK_LAYOUT.iter().map(|row| row.as_slice()).collect();
        // The built-in deck is well-formed
        Self::from_codes(&rows).unwrap_or_else(|_| Self {
            columns: 0,
            rows: 0,
            tile_size: TILE_SIZE,
            cells: Vec::new(),
        })
    }
}

impl ArenaLayout {
    /// Build a layout from rows of tile codes
    pub fn from_codes(rows: &[&[u8]]) -> Result<Self, LayoutError> {
        let columns = rows.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(columns * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(LayoutError::Ragged {
                    row: row_idx,
                    expected: columns,
                    found: row.len(),
                });
            }
            for &code in row.iter() {
                cells.push(CellKind::from_code(code).ok_or(LayoutError::UnknownCell(code))?);
            }
        }

        Ok(Self {
            columns,
            rows: rows.len(),
            tile_size: TILE_SIZE,
            cells,
        })
    }

    /// Tile at grid coordinates
    pub fn tile(&self, column: usize, row: usize) -> Option<CellKind> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Tile under an arena-local point (`None` off the grid)
    pub fn cell_at(&self, point: Vec2) -> Option<CellKind> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.tile_size) as usize;
        let row = (point.y / self.tile_size) as usize;
        self.tile(column, row)
    }

    /// Iterate tiles with their top-left pixel corner, for drawing
    pub fn tiles(&self) -> impl Iterator<Item = (Vec2, CellKind)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &kind)| {
            let column = i % self.columns;
            let row = i / self.columns;
            (
                Vec2::new(column as f32, row as f32) * self.tile_size,
                kind,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deck() {
        let deck = ArenaLayout::default();
        assert_eq!(deck.columns, 25);
        assert_eq!(deck.rows, 9);
        assert_eq!(deck.tile(0, 0), Some(CellKind::Wall));
        assert_eq!(deck.tile(5, 0), Some(CellKind::Door));
        assert_eq!(deck.tile(1, 1), Some(CellKind::Floor));
        assert_eq!(deck.tile(25, 0), None);
        assert_eq!(deck.tiles().count(), 25 * 9);
    }

    #[test]
    fn test_cell_at_pixels() {
        let deck = ArenaLayout::default();
        assert_eq!(deck.cell_at(Vec2::new(40.0, 40.0)), Some(CellKind::Floor));
        assert_eq!(deck.cell_at(Vec2::new(9.0 * 32.0 + 1.0, 2.0 * 32.0 + 1.0)), Some(CellKind::Door));
        assert_eq!(deck.cell_at(Vec2::new(-1.0, 10.0)), None);
        // The deck only covers the top of the arena
        assert_eq!(deck.cell_at(Vec2::new(100.0, 500.0)), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows: [&[u8]; 2] = [&[0, 1], &[0]];
        assert!(matches!(
            ArenaLayout::from_codes(&rows),
            Err(LayoutError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_code_rejected() {
        let rows: [&[u8]; 1] = [&[0, 7]];
        assert!(matches!(
            ArenaLayout::from_codes(&rows),
            Err(LayoutError::UnknownCell(7))
        ));
    }
}
