// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, matrix};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

pub static TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
pub static DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
pub static TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
pub static DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
pub static FVS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

impl Premium {
    #[inline(always)]
    pub fn is_plain(&self) -> bool {
        self.word_multiplier == 1 && self.letter_multiplier == 1
    }
}

#[derive(Clone)]
pub struct BoardLayout {
    premiums: Box<[Premium]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

impl BoardLayout {
    // W = triple word, w = double word, L = triple letter, l = double letter.
    // anything else is a plain square.
    pub fn from_rows(rows: &[&str], star_row: i8, star_col: i8) -> error::Returns<BoardLayout> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |row| row.len());
        if num_rows == 0 || num_rows > i8::MAX as usize || num_cols > i8::MAX as usize {
            return_error!(Layout, "bad layout size {}x{}", num_rows, num_cols);
        }
        let mut premiums = Vec::with_capacity(num_rows * num_cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != num_cols {
                return_error!(
                    Layout,
                    "layout row {} has {} squares, expected {}",
                    r,
                    row.len(),
                    num_cols
                );
            }
            premiums.extend(row.bytes().map(|b| match b {
                b'W' => TWS,
                b'w' => DWS,
                b'L' => TLS,
                b'l' => DLS,
                _ => FVS,
            }));
        }
        let dim = matrix::Dim {
            rows: num_rows as i8,
            cols: num_cols as i8,
        };
        if !dim.contains(matrix::Position::new(star_col, star_row)) {
            return_error!(Layout, "star ({}, {}) not on board", star_col, star_row);
        }
        Ok(BoardLayout {
            premiums: premiums.into_boxed_slice(),
            dim,
            star_row,
            star_col,
        })
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        self.star_row
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        self.star_col
    }

    #[inline(always)]
    pub fn star(&self) -> matrix::Position {
        matrix::Position::new(self.star_col, self.star_row)
    }

    #[inline(always)]
    pub fn premiums(&self) -> &[Premium] {
        &self.premiums
    }

    // panics off the board.
    #[inline(always)]
    pub fn premium_at(&self, pos: matrix::Position) -> Premium {
        self.premiums[self.dim.at(pos)]
    }
}

static STANDARD_ROWS: &[&str] = &[
    "W__l___W___l__W",
    "_w___L___L___w_",
    "__w___l_l___w__",
    "___w___l___w___",
    "____w_____w____",
    "_L___L___L___L_",
    "__l___l_l___l__",
    "W__l_______l__W",
    "__l___l_l___l__",
    "_L___L___L___L_",
    "____w_____w____",
    "___w___l___w___",
    "__w___l_l___w__",
    "_w___L___L___w_",
    "W__l___W___l__W",
];

pub fn make_standard_board_layout() -> BoardLayout {
    match BoardLayout::from_rows(STANDARD_ROWS, 7, 7) {
        Ok(layout) => layout,
        Err(err) => panic!("builtin layout is malformed: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_corners_and_center() {
        let layout = make_standard_board_layout();
        assert_eq!(layout.dim(), matrix::Dim { rows: 15, cols: 15 });
        assert_eq!(layout.premium_at(matrix::Position::new(0, 0)), TWS);
        assert_eq!(layout.premium_at(matrix::Position::new(14, 14)), TWS);
        assert_eq!(layout.premium_at(matrix::Position::new(1, 1)), DWS);
        assert_eq!(layout.premium_at(matrix::Position::new(5, 1)), TLS);
        assert_eq!(layout.premium_at(matrix::Position::new(3, 0)), DLS);
        // the star carries no premium in this layout.
        assert!(layout.premium_at(layout.star()).is_plain());
        assert!(layout.premium_at(matrix::Position::new(10, 7)).is_plain());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(BoardLayout::from_rows(&["___", "__"], 0, 0).is_err());
        assert!(BoardLayout::from_rows(&["___", "___"], 5, 0).is_err());
    }
}
