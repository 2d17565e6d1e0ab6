//! Map text parsing and the validated tile rectangle.

use warehouse_core::Pos;

use crate::MapError;

/// One cell of the warehouse grid.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tile {
    Floor,
    Wall,
    Depot,
}

impl Tile {
    /// Agents may stand on floor and depot cells.
    #[inline]
    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// The map-file character for this tile.
    pub fn to_char(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall  => '#',
            Tile::Depot => 'D',
        }
    }
}

/// A validated rectangular tile grid with exactly one depot.
///
/// Construct via [`Grid::parse`]; the invariants (rectangular shape, one
/// depot, at least one floor cell) hold for every instance.
#[derive(Clone, Debug)]
pub struct Grid {
    height: u16,
    width:  u16,
    tiles:  Vec<Tile>,
    depot:  Pos,
}

impl Grid {
    /// Parse map text: one row per line, `#` wall, `.` floor, `D` depot.
    ///
    /// Trailing newlines are tolerated; interior blank lines are not (they
    /// show up as ragged rows).
    pub fn parse(text: &str) -> Result<Grid, MapError> {
        let rows: Vec<&str> = text.lines().collect();
        let rows = match rows.split_last() {
            Some((last, rest)) if last.is_empty() => rest,
            _ => &rows[..],
        };
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let width = rows[0].chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(rows.len() * width);
        let mut depot = None;
        let mut floor_count = 0usize;
        for (r, row) in rows.iter().enumerate() {
            let got = row.chars().count();
            if got != width {
                return Err(MapError::RaggedRow { row: r, expected: width, got });
            }
            for (c, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '.' => Tile::Floor,
                    '#' => Tile::Wall,
                    'D' => Tile::Depot,
                    _ => return Err(MapError::UnknownTile { row: r, col: c, ch }),
                };
                if tile == Tile::Depot {
                    if depot.is_some() {
                        return Err(MapError::MultipleDepots);
                    }
                    depot = Some(Pos::new(r as u16, c as u16));
                }
                if tile == Tile::Floor {
                    floor_count += 1;
                }
                tiles.push(tile);
            }
        }

        let depot = depot.ok_or(MapError::NoDepot)?;
        if floor_count == 0 {
            return Err(MapError::NoFloor);
        }

        Ok(Grid {
            height: rows.len() as u16,
            width:  width as u16,
            tiles,
            depot,
        })
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Row-major index of `pos` into the tile array.
    #[inline]
    pub fn cell_index(&self, pos: Pos) -> usize {
        pos.r as usize * self.width as usize + pos.c as usize
    }

    #[inline]
    pub fn tile(&self, pos: Pos) -> Tile {
        self.tiles[self.cell_index(pos)]
    }

    #[inline]
    pub fn depot(&self) -> Pos {
        self.depot
    }

    /// `true` if `pos` is inside the rectangle.
    #[inline]
    pub fn in_bounds(&self, r: i32, c: i32) -> bool {
        r >= 0 && (r as u16) < self.height && c >= 0 && (c as u16) < self.width
    }

    /// Floor cells in row-major order — the item spawn domain.  The depot is
    /// deliberately excluded: items never appear on the delivery cell.
    pub fn floor_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for r in 0..self.height {
            for c in 0..self.width {
                if self.tile(Pos::new(r, c)) == Tile::Floor {
                    cells.push(Pos::new(r, c));
                }
            }
        }
        cells
    }
}
