// Copyright (C) 2020-2026 Andy Kurnia.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "across")]
    Across,
    #[serde(rename = "down")]
    Down,
}

impl Direction {
    #[inline(always)]
    pub fn other(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Across => "across",
            Direction::Down => "down",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub col: i8,
    pub row: i8,
}

impl Position {
    #[inline(always)]
    pub fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    // the lane a word in this direction lives on, and the index within it.
    #[inline(always)]
    pub fn lane_idx(&self, direction: Direction) -> (i8, i8) {
        match direction {
            Direction::Across => (self.row, self.col),
            Direction::Down => (self.col, self.row),
        }
    }

    #[inline(always)]
    pub fn step(&self, direction: Direction, by: i8) -> Position {
        match direction {
            Direction::Across => Position::new(self.col + by, self.row),
            Direction::Down => Position::new(self.col, self.row + by),
        }
    }
}

impl std::fmt::Display for Position {
    // columns as letters, rows 1-based.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", ((self.col as u8) + 0x61) as char, self.row + 1)
    }
}

#[derive(Clone)]
pub struct Strider {
    base: i16,
    step: i8,
    len: i8,
}

impl Strider {
    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        assert!(
            idx >= 0 && idx < self.len,
            "index {} outside lane of length {}",
            idx,
            self.len
        );
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        assert!(row >= 0 && row < self.rows, "row {} not on board", row);
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        assert!(col >= 0 && col < self.cols, "column {} not on board", col);
        Strider {
            base: col as i16,
            step: self.cols,
            len: self.rows,
        }
    }

    #[inline(always)]
    pub fn lane(&self, direction: Direction, lane: i8) -> Strider {
        match direction {
            Direction::Across => self.across(lane),
            Direction::Down => self.down(lane),
        }
    }

    #[inline(always)]
    pub fn num_lanes(&self, direction: Direction) -> i8 {
        match direction {
            Direction::Across => self.rows,
            Direction::Down => self.cols,
        }
    }

    #[inline(always)]
    pub fn lane_len(&self, direction: Direction) -> i8 {
        match direction {
            Direction::Across => self.cols,
            Direction::Down => self.rows,
        }
    }

    #[inline(always)]
    pub fn contains(&self, pos: Position) -> bool {
        pos.col >= 0 && pos.col < self.cols && pos.row >= 0 && pos.row < self.rows
    }

    #[inline(always)]
    pub fn at(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {:?} not on board", pos);
        (((pos.row as isize) * (self.cols as isize)) + (pos.col as isize)) as usize
    }

    #[inline(always)]
    pub fn area(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_agree_with_positions() {
        let dim = Dim { rows: 15, cols: 15 };
        let pos = Position::new(10, 7);
        let (lane, idx) = pos.lane_idx(Direction::Across);
        assert_eq!(dim.across(lane).at(idx), dim.at(pos));
        let (lane, idx) = pos.lane_idx(Direction::Down);
        assert_eq!(dim.down(lane).at(idx), dim.at(pos));
    }

    #[test]
    #[should_panic]
    fn off_board_is_a_contract_violation() {
        let dim = Dim { rows: 15, cols: 15 };
        dim.at(Position::new(15, 0));
    }

    #[test]
    fn display_is_column_letter_then_row() {
        assert_eq!(Position::new(7, 7).to_string(), "h8");
        assert_eq!(Direction::Down.other(), Direction::Across);
    }
}
