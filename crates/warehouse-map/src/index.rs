//! The immutable precomputed map index.

use std::path::Path;

use warehouse_core::{Action, Pos};

use crate::{Grid, MapError, Tile};

/// Precomputed lookup tables over a [`Grid`].
///
/// Built once at startup and shared read-only with every planner thread.
/// All tables are flat row-major arrays indexed by `cell_index(pos)`; the
/// all-pairs distance matrix is `cell_count²` entries, which for warehouse
/// maps (tens of cells per side) stays comfortably in cache.
pub struct MapIndex {
    grid:        Grid,
    cell_count:  usize,
    floor_cells: Vec<Pos>,
    /// `next_pos[cell][action]` — successor cell; equals `cell` for the
    /// non-moves and for moves blocked by the boundary or a wall.
    next_pos:    Vec<[Pos; Action::COUNT]>,
    /// Movement actions legal at each walkable cell, `Stay` always included.
    /// Empty for walls.
    valid_moves: Vec<Vec<Action>>,
    /// BFS shortest-path lengths on the walkable graph, `u32::MAX` when
    /// unreachable.  Indexed `[from * cell_count + to]`.
    dist:        Vec<u32>,
}

impl MapIndex {
    /// Parse map text and build the index.
    pub fn from_text(text: &str) -> Result<MapIndex, MapError> {
        Ok(MapIndex::build(Grid::parse(text)?))
    }

    /// Read a map file and build the index.
    pub fn load(path: &Path) -> Result<MapIndex, MapError> {
        let text = std::fs::read_to_string(path)?;
        MapIndex::from_text(&text)
    }

    /// Precompute all tables from a validated grid.
    pub fn build(grid: Grid) -> MapIndex {
        let h = grid.height();
        let w = grid.width();
        let cell_count = h as usize * w as usize;

        // ── Successor table and per-cell move sets ────────────────────────
        let mut next_pos = vec![[Pos::NONE; Action::COUNT]; cell_count];
        let mut valid_moves = vec![Vec::new(); cell_count];
        for r in 0..h {
            for c in 0..w {
                let pos = Pos::new(r, c);
                let cell = grid.cell_index(pos);
                for action in Action::ALL {
                    let (dr, dc) = action.delta();
                    let (nr, nc) = (r as i32 + dr, c as i32 + dc);
                    let nxt = if grid.in_bounds(nr, nc) {
                        Pos::new(nr as u16, nc as u16)
                    } else {
                        pos
                    };
                    let nxt = if grid.tile(nxt).is_walkable() { nxt } else { pos };
                    next_pos[cell][action.index()] = nxt;
                }
                if grid.tile(pos).is_walkable() {
                    let mut moves: Vec<Action> = Action::MOVES
                        .iter()
                        .copied()
                        .filter(|a| next_pos[cell][a.index()] != pos)
                        .collect();
                    moves.push(Action::Stay);
                    valid_moves[cell] = moves;
                }
            }
        }

        // ── All-pairs BFS over the walkable graph ─────────────────────────
        let mut dist = vec![u32::MAX; cell_count * cell_count];
        let mut queue = std::collections::VecDeque::new();
        for r in 0..h {
            for c in 0..w {
                let src = Pos::new(r, c);
                if !grid.tile(src).is_walkable() {
                    continue;
                }
                let row = grid.cell_index(src) * cell_count;
                dist[row + grid.cell_index(src)] = 0;
                queue.clear();
                queue.push_back(src);
                while let Some(cur) = queue.pop_front() {
                    let d = dist[row + grid.cell_index(cur)];
                    for mv in Action::MOVES {
                        let nxt = next_pos[grid.cell_index(cur)][mv.index()];
                        let slot = &mut dist[row + grid.cell_index(nxt)];
                        if *slot == u32::MAX {
                            *slot = d + 1;
                            queue.push_back(nxt);
                        }
                    }
                }
            }
        }

        let floor_cells = grid.floor_cells();
        MapIndex {
            grid,
            cell_count,
            floor_cells,
            next_pos,
            valid_moves,
            dist,
        }
    }

    // ── Grid pass-throughs ────────────────────────────────────────────────

    #[inline]
    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    #[inline]
    pub fn depot(&self) -> Pos {
        self.grid.depot()
    }

    #[inline]
    pub fn tile(&self, pos: Pos) -> Tile {
        self.grid.tile(pos)
    }

    /// The item spawn domain (floor cells, depot excluded), row-major.
    #[inline]
    pub fn floor_cells(&self) -> &[Pos] {
        &self.floor_cells
    }

    // ── Lookup tables ─────────────────────────────────────────────────────

    /// Successor of `pos` under `action` (self for blocked or non-moves).
    #[inline]
    pub fn next_pos(&self, pos: Pos, action: Action) -> Pos {
        self.next_pos[self.grid.cell_index(pos)][action.index()]
    }

    /// Movement actions legal at `pos`; always contains `Stay` on walkable
    /// cells.
    #[inline]
    pub fn valid_moves(&self, pos: Pos) -> &[Action] {
        &self.valid_moves[self.grid.cell_index(pos)]
    }

    /// BFS shortest-path length from `a` to `b`; `u32::MAX` if unreachable.
    #[inline]
    pub fn dist(&self, a: Pos, b: Pos) -> u32 {
        self.dist[self.grid.cell_index(a) * self.cell_count + self.grid.cell_index(b)]
    }
}
