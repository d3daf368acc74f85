// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, board_layout, matrix};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, pos: matrix::Position) -> char {
    if pos == board_layout.star() {
        return '*';
    }
    let premium = board_layout.premium_at(pos);
    match (premium.word_multiplier, premium.letter_multiplier) {
        (3, _) => '=',
        (2, _) => '-',
        (_, 3) => '"',
        (_, 2) => '\'',
        _ => ' ',
    }
}

fn write_column_labels(s: &mut String, cols: i8) {
    s.push_str("  ");
    for c in 0..cols {
        let _ = write!(s, " {}", ((c as u8) + 0x61) as char);
    }
    s.push('\n');
}

fn write_border(s: &mut String, cols: i8) {
    s.push_str("  +");
    for _ in 1..cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
}

pub fn fmt_board(board: &board::Board) -> String {
    let board_layout = board.game_config.board_layout();
    let dim = board_layout.dim();
    let mut s = String::new();
    write_column_labels(&mut s, dim.cols);
    write_border(&mut s, dim.cols);
    for r in 0..dim.rows {
        let _ = write!(s, "{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            let pos = matrix::Position::new(c, r);
            s.push(match board.letter_at(pos) {
                Some(letter) => letter as char,
                None => empty_label(board_layout, pos),
            });
        }
        let _ = writeln!(s, "|{}", r + 1);
    }
    write_border(&mut s, dim.cols);
    write_column_labels(&mut s, dim.cols);
    s
}

pub fn print_board(board: &board::Board) {
    print!("{}", fmt_board(board));
}

pub fn print_racks(board: &board::Board) {
    for (i, rack) in board.racks.iter().enumerate() {
        println!(
            "{} p{}: {}",
            if i == board.turn as usize { '>' } else { ' ' },
            i + 1,
            board.alphabet().fmt_rack(rack)
        );
    }
    println!("bag: {} tiles", board.bag.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_config;

    #[test]
    fn board_shows_tiles_and_premiums() {
        let game_config = game_config::make_standard_game_config();
        let mut b = board::Board::new(&game_config);
        let rendered = fmt_board(&b);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines[0], "   a b c d e f g h i j k l m n o");
        assert_eq!(lines[2], " 1|=     '       =       '     =|1");
        assert_eq!(lines[9], " 8|=     '       *       '     =|8");

        b.place(&[board::Move {
            position: matrix::Position::new(7, 7),
            letter: b'Q',
        }]);
        let rendered = fmt_board(&b);
        assert_eq!(
            rendered.lines().nth(9),
            Some(" 8|=     '       Q       '     =|8")
        );
    }
}
