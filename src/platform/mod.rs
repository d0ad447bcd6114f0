//! Tilting platform of rolling rocks.
//!
//! A grid of round rocks (`O`), fixed cube rocks (`#`) and empty space
//! (`.`). Tilting rolls every round rock as far as it can go in one
//! direction; a spin cycle tilts north, west, south and east in turn.
//! Spin cycles are deterministic over a finite grid, so the load after an
//! arbitrary number of them comes from [`CycleDetector`].

use std::fmt;

use crate::cycle::{CycleDetector, Search};
use crate::error::{PulseError, Result};

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Round,
    Cube,
}

impl Tile {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Tile::Empty),
            'O' => Some(Tile::Round),
            '#' => Some(Tile::Cube),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Round => 'O',
            Tile::Cube => '#',
        }
    }
}

/// Tilt direction; rocks roll towards this edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// Order of tilts in one spin cycle.
    pub const SPIN: [Direction; 4] = [Direction::North, Direction::West, Direction::South, Direction::East];
}

/// A rectangular platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    width: usize,
    height: usize,
    /// Row-major, top row first
    tiles: Vec<Tile>,
}

impl Platform {
    /// Parse a platform from its text form.
    pub fn parse(input: &str) -> Result<Self> {
        let rows: Vec<&str> = input.trim().lines().map(str::trim).collect();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(PulseError::parse(1, "platform is empty"));
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let line = idx + 1;
            if row.chars().count() != width {
                return Err(PulseError::parse(
                    line,
                    format!("expected {} columns, got {}", width, row.chars().count()),
                ));
            }
            for c in row.chars() {
                let tile = Tile::from_char(c)
                    .ok_or_else(|| PulseError::parse(line, format!("unexpected tile '{}'", c)))?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at `(row, col)`, top-left is `(0, 0)`.
    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[row * self.width + col]
    }

    /// Roll every round rock towards `direction`.
    pub fn tilt(&mut self, direction: Direction) {
        let (lanes, len) = match direction {
            Direction::North | Direction::South => (self.width, self.height),
            Direction::West | Direction::East => (self.height, self.width),
        };

        for lane in 0..lanes {
            // Next free slot, counted from the edge rocks roll towards
            let mut free = 0;
            for k in 0..len {
                let idx = self.cell(direction, lane, k);
                match self.tiles[idx] {
                    Tile::Cube => free = k + 1,
                    Tile::Round => {
                        self.tiles[idx] = Tile::Empty;
                        let dst = self.cell(direction, lane, free);
                        self.tiles[dst] = Tile::Round;
                        free += 1;
                    }
                    Tile::Empty => {}
                }
            }
        }
    }

    /// Tilt north, west, south and east.
    pub fn spin_cycle(&mut self) {
        for direction in Direction::SPIN {
            self.tilt(direction);
        }
    }

    /// Sum over round rocks of their distance (in rows) from the south edge,
    /// counting the bottom row as 1.
    pub fn north_load(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == Tile::Round)
            .map(|(idx, _)| self.height - idx / self.width)
            .sum()
    }

    /// North load after `cycles` spin cycles, leaving `self` untouched.
    pub fn load_after_cycles(&self, cycles: u64, detector: &CycleDetector) -> Result<usize> {
        let mut platform = self.clone();
        match detector.detect_toward(&mut platform, cycles, Platform::spin_cycle, Platform::clone)? {
            Search::Cycle(trajectory) => Ok(trajectory.into_state_at(cycles).north_load()),
            Search::Reached => Ok(platform.north_load()),
        }
    }

    /// Tile index of step `k` along `lane`, starting at the edge rocks
    /// roll towards.
    fn cell(&self, direction: Direction, lane: usize, k: usize) -> usize {
        let (row, col) = match direction {
            Direction::North => (k, lane),
            Direction::South => (self.height - 1 - k, lane),
            Direction::West => (lane, k),
            Direction::East => (lane, self.width - 1 - k),
        };
        row * self.width + col
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width) {
            let line: String = row.iter().map(|t| t.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
