// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, bag, board_layout, error, game_config, matrix, movegen, pattern};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub position: matrix::Position,
    pub letter: u8,
}

// all or nothing.
fn use_tiles<II: IntoIterator<Item = u8>>(
    rack: &mut Vec<u8>,
    tiles_iter: II,
) -> error::Returns<()> {
    let mut remaining = rack.clone();
    for tile in tiles_iter {
        let Some(pos) = remaining.iter().rposition(|&t| t == tile) else {
            return_error!(Supply, "{:?} is not on the rack", tile as char);
        };
        remaining.swap_remove(pos);
    }
    *rack = remaining;
    Ok(())
}

pub struct Board<'a> {
    pub game_config: &'a game_config::GameConfig<'a>,
    // 0 for an empty square.
    pub tiles: Box<[u8]>,
    pub bag: bag::Bag,
    pub racks: Box<[Vec<u8>]>,
    pub turn: u8,
}

impl Clone for Board<'_> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            game_config: self.game_config,
            tiles: self.tiles.clone(),
            bag: self.bag.clone(),
            racks: self.racks.clone(),
            turn: self.turn,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.game_config = source.game_config;
        self.tiles.clone_from(&source.tiles);
        self.bag.clone_from(&source.bag);
        self.racks.clone_from(&source.racks);
        self.turn = source.turn;
    }
}

impl<'a> Board<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        let dim = game_config.board_layout().dim();
        let rack_size = game_config.rack_size() as usize;
        Self {
            game_config,
            tiles: vec![0u8; dim.area()].into_boxed_slice(),
            bag: bag::Bag::new(game_config.alphabet()),
            racks: (0..game_config.num_players())
                .map(|_| Vec::with_capacity(rack_size))
                .collect(),
            turn: 0,
        }
    }

    // A position given as text, one string per row. '_', '.' and ' ' are empty
    // squares. The letters come out of the bag.
    pub fn from_rows<S: AsRef<str>>(
        game_config: &'a game_config::GameConfig,
        rows: &[S],
    ) -> error::Returns<Self> {
        let mut board = Self::new(game_config);
        let dim = board.dim();
        if rows.len() != dim.rows as usize {
            return_error!(Position, "expected {} rows, got {}", dim.rows, rows.len());
        }
        let mut moves = Vec::new();
        for (row, s) in (0..).zip(rows.iter()) {
            let s = s.as_ref();
            if s.len() != dim.cols as usize {
                return_error!(
                    Position,
                    "row {} has {} squares, expected {}",
                    row + 1,
                    s.len(),
                    dim.cols
                );
            }
            for (col, c) in (0..).zip(s.bytes()) {
                match c {
                    b'_' | b'.' | b' ' => {}
                    c if c.is_ascii_alphabetic() => moves.push(Move {
                        position: matrix::Position::new(col, row),
                        letter: c.to_ascii_uppercase(),
                    }),
                    _ => {
                        return_error!(
                            Position,
                            "invalid square {:?} on row {}",
                            c as char,
                            row + 1
                        );
                    }
                }
            }
        }
        let letters = moves.iter().map(|m| m.letter).collect::<Vec<_>>();
        if let Err(c) = board.bag.remove_letters(&letters) {
            return_error!(Supply, "too many {:?} on the board", c as char);
        }
        board.place(&moves);
        Ok(board)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.game_config.board_layout().dim()
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet<'a> {
        self.game_config.alphabet()
    }

    // panics off the board.
    #[inline(always)]
    pub fn letter_at(&self, pos: matrix::Position) -> Option<u8> {
        match self.tiles[self.dim().at(pos)] {
            0 => None,
            c => Some(c),
        }
    }

    // panics off the board.
    #[inline(always)]
    pub fn premium_at(&self, pos: matrix::Position) -> board_layout::Premium {
        self.game_config.board_layout().premium_at(pos)
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(|&t| t == 0)
    }

    // one row (across) or column (down), with pattern::BLANK for empty squares.
    pub fn template(&self, direction: matrix::Direction, lane: i8) -> Vec<u8> {
        let strider = self.dim().lane(direction, lane);
        (0..strider.len())
            .map(|i| match self.tiles[strider.at(i)] {
                0 => pattern::BLANK,
                c => c,
            })
            .collect()
    }

    #[inline(always)]
    pub fn template_for_row(&self, row: i8) -> Vec<u8> {
        self.template(matrix::Direction::Across, row)
    }

    #[inline(always)]
    pub fn template_for_column(&self, col: i8) -> Vec<u8> {
        self.template(matrix::Direction::Down, col)
    }

    #[inline(always)]
    pub fn current_rack(&self) -> &[u8] {
        &self.racks[self.turn as usize]
    }

    // Writes the letters as given. The tiles do not come out of any rack, so
    // this is for speculative copies and for setting up positions.
    pub fn place(&mut self, moves: &[Move]) {
        let dim = self.dim();
        for m in moves {
            assert!(alphabet::is_letter(m.letter), "{:?} is not a letter", m.letter);
            self.tiles[dim.at(m.position)] = m.letter;
        }
    }

    // The opening tile: drawn from the bag and put straight on the board.
    pub fn bootstrap(&mut self, pos: matrix::Position) -> Option<u8> {
        let letter = self.bag.pop()?;
        self.place(&[Move {
            position: pos,
            letter,
        }]);
        Some(letter)
    }

    pub fn shuffle_bag(&mut self, rng: &mut dyn RngCore) {
        self.bag.shuffle(rng);
    }

    pub fn deal_racks(&mut self) {
        let rack_size = self.game_config.rack_size() as usize;
        for rack in self.racks.iter_mut() {
            self.bag.replenish(rack, rack_size);
        }
    }

    // Hands the current player a specific rack, returning what they held to
    // the bag first.
    pub fn set_current_rack(&mut self, letters: &[u8]) -> error::Returns<()> {
        let turn = self.turn as usize;
        let mut pool = self.bag.clone();
        pool.0.extend_from_slice(&self.racks[turn]);
        if let Err(c) = pool.remove_letters(letters) {
            return_error!(
                Supply,
                "not enough {:?} left for rack {:?}",
                c as char,
                String::from_utf8_lossy(letters)
            );
        }
        self.bag = pool;
        self.racks[turn].clear();
        self.racks[turn].extend_from_slice(letters);
        Ok(())
    }

    // Commits a move found by the engine: lays the new tiles, takes them out
    // of the current rack, and refills the rack from the bag.
    pub fn apply(&mut self, result: &movegen::MoveResult) -> error::Returns<()> {
        let dim = self.dim();
        for (m, &is_new) in result.to_moves().iter().zip(result.is_new.iter()) {
            let existing = self.tiles[dim.at(m.position)];
            if is_new {
                if existing != 0 {
                    return_error!(Position, "{} is already occupied", m.position);
                }
            } else if existing != m.letter {
                return_error!(
                    Position,
                    "{} holds {:?}, not {:?}",
                    m.position, existing as char, m.letter as char
                );
            }
        }
        let rack_size = self.game_config.rack_size() as usize;
        let rack = &mut self.racks[self.turn as usize];
        use_tiles(rack, result.used.bytes())?;
        for (m, &is_new) in result.to_moves().iter().zip(result.is_new.iter()) {
            if is_new {
                self.tiles[dim.at(m.position)] = m.letter;
            }
        }
        self.bag.replenish(rack, rack_size);
        Ok(())
    }

    pub fn next_turn(&mut self) {
        let num_players = self.racks.len() as u8;
        self.turn = (self.turn + 1) % num_players;
    }

    // bag + racks + board. Constant over a game.
    pub fn total_tiles(&self) -> usize {
        self.bag.len()
            + self.racks.iter().map(|rack| rack.len()).sum::<usize>()
            + self.tiles.iter().filter(|&&t| t != 0).count()
    }

    pub fn moves(&self) -> Vec<Move> {
        let dim = self.dim();
        let mut moves = Vec::new();
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                let position = matrix::Position::new(col, row);
                if let Some(letter) = self.letter_at(position) {
                    moves.push(Move { position, letter });
                }
            }
        }
        moves
    }
}
