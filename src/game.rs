use std::fmt;

use log::warn;
use thiserror::Error;

/// Contents of one grid cell. The player is never a tile; it is tracked as a
/// position on the `Level`, with the terrain underneath preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Goal,
    Box,
    BoxOnGoal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// Raised when a level definition contains no `@` or `+` symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("level {} has no player symbol ('@' or '+')", .0 + 1)]
pub struct NoPlayerFound(pub usize);

/// One playable level: mutable grid, player position, and the immutable mask
/// of cells that were goals in the raw definition.
///
/// Rows may be jagged; any access out of bounds or past a short row's end
/// reads as `Wall`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    grid: Vec<Vec<Tile>>,
    player: (usize, usize),
    goal_mask: Vec<Vec<bool>>,
    index: usize,
}

impl Level {
    /// Parse a level from raw symbol rows.
    ///
    /// Symbols:
    /// - `#` = Wall
    /// - ` ` = Floor (empty space)
    /// - `.` = Goal (target location for boxes)
    /// - `$` = Box
    /// - `@` = Player
    /// - `*` = Box on goal
    /// - `+` = Player on goal
    ///
    /// The player symbol is stripped out of the grid (the cell keeps its
    /// underlying terrain) and recorded as a position. The goal mask is
    /// computed from the raw symbols (`.`, `+`, `*`) before that rewrite.
    /// Unknown symbols are treated as floor.
    pub fn from_rows(rows: &[String], index: usize) -> Result<Self, NoPlayerFound> {
        let mut grid = Vec::with_capacity(rows.len());
        let mut goal_mask = Vec::with_capacity(rows.len());
        let mut player = None;
        let mut warned_unknown = false;

        for (r, row) in rows.iter().enumerate() {
            let mut tiles = Vec::with_capacity(row.len());
            let mut mask = Vec::with_capacity(row.len());
            for (c, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    ' ' => Tile::Floor,
                    '.' => Tile::Goal,
                    '$' => Tile::Box,
                    '*' => Tile::BoxOnGoal,
                    '@' => {
                        player = Some((r, c));
                        Tile::Floor
                    }
                    '+' => {
                        player = Some((r, c));
                        Tile::Goal
                    }
                    _ => {
                        if !warned_unknown {
                            warn!(
                                "level {}: unknown symbol '{}' at ({}, {}), treating as floor",
                                index + 1,
                                ch,
                                r,
                                c
                            );
                            warned_unknown = true;
                        }
                        Tile::Floor
                    }
                };
                tiles.push(tile);
                mask.push(matches!(ch, '.' | '+' | '*'));
            }
            grid.push(tiles);
            goal_mask.push(mask);
        }

        let player = player.ok_or(NoPlayerFound(index))?;

        Ok(Level {
            grid,
            player,
            goal_mask,
            index,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn player(&self) -> (usize, usize) {
        self.player
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.grid
    }

    /// Get the tile at a position. Out-of-bounds (including past the end of a
    /// short row) is a wall.
    pub fn tile(&self, row: i32, col: i32) -> Tile {
        if row < 0 || col < 0 {
            return Tile::Wall;
        }
        self.grid
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    /// Whether the raw definition marked this cell as a goal, independent of
    /// what currently occupies it.
    pub fn is_goal(&self, row: usize, col: usize) -> bool {
        self.goal_mask
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    fn set_tile(&mut self, row: usize, col: usize, tile: Tile) {
        self.grid[row][col] = tile;
    }

    /// Attempt to move the player one cell. Walks onto floor/goal, pushes a
    /// box if the cell beyond it is free, and is otherwise blocked.
    ///
    /// Returns true iff the player moved; a blocked attempt leaves the level
    /// untouched.
    pub fn try_move(&mut self, dir: Direction) -> bool {
        let (dr, dc) = dir.delta();
        let (nr, nc) = (self.player.0 as i32 + dr, self.player.1 as i32 + dc);

        match self.tile(nr, nc) {
            Tile::Wall => false,
            Tile::Floor | Tile::Goal => {
                self.player = (nr as usize, nc as usize);
                true
            }
            next @ (Tile::Box | Tile::BoxOnGoal) => {
                let (br, bc) = (nr + dr, nc + dc);
                match self.tile(br, bc) {
                    Tile::Wall | Tile::Box | Tile::BoxOnGoal => false,
                    Tile::Floor | Tile::Goal => {
                        let dest = if self.is_goal(br as usize, bc as usize) {
                            Tile::BoxOnGoal
                        } else {
                            Tile::Box
                        };
                        self.set_tile(br as usize, bc as usize, dest);
                        // The vacated cell reverts to its terrain. This must
                        // come from the previous tile value, not the mask, so
                        // a BoxOnGoal clears back to Goal.
                        let vacated = if next == Tile::BoxOnGoal {
                            Tile::Goal
                        } else {
                            Tile::Floor
                        };
                        self.set_tile(nr as usize, nc as usize, vacated);
                        self.player = (nr as usize, nc as usize);
                        true
                    }
                }
            }
        }
    }

    /// Check if every goal cell is covered by a box (win condition). A level
    /// with no goal cells is trivially complete.
    pub fn is_complete(&self) -> bool {
        for (r, mask_row) in self.goal_mask.iter().enumerate() {
            for (c, &is_goal) in mask_row.iter().enumerate() {
                if is_goal && self.grid[r][c] != Tile::BoxOnGoal {
                    return false;
                }
            }
        }
        true
    }

    pub(crate) fn restore(&mut self, grid: Vec<Vec<Tile>>, player: (usize, usize)) {
        self.grid = grid;
        self.player = player;
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            let mut line = String::new();
            for (c, &tile) in row.iter().enumerate() {
                let ch = if (r, c) == self.player {
                    match tile {
                        Tile::Goal => '+',
                        _ => '@',
                    }
                } else {
                    match tile {
                        Tile::Wall => '#',
                        Tile::Floor => ' ',
                        Tile::Goal => '.',
                        Tile::Box => '$',
                        Tile::BoxOnGoal => '*',
                    }
                };
                line.push(ch);
            }
            // Trim trailing spaces to match original input format
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
