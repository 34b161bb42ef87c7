//! Board geometry: a fixed square grid measured with Chebyshev distance.
//!
//! Diagonal and axis-aligned steps cost the same. The board center is only
//! used to break ties between equally good destination cells.

use core::f64::consts::{PI, TAU};
use std::fmt;

/// Discrete board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleVector {
    pub x: i32,
    pub y: i32,
}

impl BattleVector {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    pub fn distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for BattleVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Square battle board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    size: i32,
}

impl Board {
    pub const fn new(size: i32) -> Self {
        Self { size }
    }

    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Center of the board; `(4.5, 4.5)` on the standard 10×10 board.
    pub fn center(&self) -> (f64, f64) {
        let c = f64::from(self.size - 1) / 2.0;
        (c, c)
    }

    pub fn contains(&self, position: BattleVector) -> bool {
        (0..self.size).contains(&position.x) && (0..self.size).contains(&position.y)
    }

    /// Chebyshev distance from a cell to the board center.
    pub fn distance_to_center(&self, position: BattleVector) -> f64 {
        let (cx, cy) = self.center();
        (f64::from(position.x) - cx)
            .abs()
            .max((f64::from(position.y) - cy).abs())
    }

    /// The cell itself followed by every on-board neighbour one step away.
    pub fn neighbourhood(&self, position: BattleVector) -> Vec<BattleVector> {
        let mut cells = vec![position];
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let cell = BattleVector::new(position.x + dx, position.y + dy);
                if self.contains(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Starting cell for each of `player_count` players.
    ///
    /// Two players face each other across the center row; larger battles
    /// spread players evenly on a ring around the center.
    pub fn start_positions(&self, player_count: usize) -> Vec<BattleVector> {
        let last = self.size - 1;
        match player_count {
            0 => Vec::new(),
            1 => vec![BattleVector::new(1.min(last), last / 2)],
            2 => vec![
                BattleVector::new(1.min(last), last / 2),
                BattleVector::new((last - 1).max(0), self.size / 2),
            ],
            n => {
                let (cx, cy) = self.center();
                let radius = (cx - 1.0).max(0.0);
                (0..n)
                    .map(|i| {
                        let angle = PI + TAU * i as f64 / n as f64;
                        let x = (cx + radius * angle.cos()).round() as i32;
                        let y = (cy + radius * angle.sin()).round() as i32;
                        BattleVector::new(x.clamp(0, last), y.clamp(0, last))
                    })
                    .collect()
            }
        }
    }

    /// Tie-break reducer for movement candidates.
    ///
    /// A strictly better candidate replaces the pool. Otherwise the candidate
    /// competes on distance to the board center against the pool, whose
    /// members all share one distance: closer replaces, equal joins, farther
    /// is dropped.
    pub fn update_best_moves(
        &self,
        better: bool,
        new_position: BattleVector,
        mut best_moves: Vec<BattleVector>,
    ) -> Vec<BattleVector> {
        if better {
            return vec![new_position];
        }

        let Some(&current) = best_moves.first() else {
            return vec![new_position];
        };

        let new_distance = self.distance_to_center(new_position);
        let best_distance = self.distance_to_center(current);

        if new_distance < best_distance {
            vec![new_position]
        } else if new_distance == best_distance {
            best_moves.push(new_position);
            best_moves
        } else {
            best_moves
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(10)
    }
}
