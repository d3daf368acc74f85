// Copyright (C) 2020-2026 Andy Kurnia.

use std::io::Read;
use wordlane::{board, display, error, game_config, logging, move_picker, word_index};

// rack: the letters to play from, e.g. "SAT".
// board: one string per row, '_' (or '.' or ' ') for an empty square.
// count: maximum number of moves returned.
// anchored: if true, an empty board gets opening moves over the star.
#[derive(serde::Deserialize)]
struct Question {
    rack: String,
    board: Vec<String>,
    #[serde(rename = "count")]
    max_gen: usize,
    #[serde(default)]
    anchored: bool,
}

#[derive(serde::Serialize)]
struct Answer<'a> {
    moves: &'a [wordlane::movegen::MoveResult],
}

// json <word list> [question file]
// the question is read from stdin when no file is given.
pub fn main() -> error::Returns<()> {
    logging::init_logger(logging::debug_requested());
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        wordlane::return_error!(
            Usage,
            "usage: {} <word list> [question file]",
            args.first().map_or("json", |s| s.as_str())
        );
    }
    let words = word_index::parse_word_list(&std::fs::read_to_string(&args[1])?)?;
    let word_index = word_index::WordIndex::from_words(&words);

    let data = match args.get(2) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let question = serde_json::from_str::<Question>(&data)?;

    let game_config = if question.anchored {
        game_config::make_anchored_game_config()
    } else {
        game_config::make_standard_game_config()
    };
    let mut board = board::Board::from_rows(&game_config, &question.board)?;
    let rack = question.rack.to_ascii_uppercase();
    board.set_current_rack(rack.as_bytes())?;
    display::print_board(&board);

    let move_picker = move_picker::MovePicker::new(&word_index);
    let t0 = std::time::Instant::now();
    let moves = move_picker.gen_moves(
        &board,
        board.current_rack(),
        &move_picker::SearchParams {
            max_gen: question.max_gen,
            ..move_picker::SearchParams::default()
        },
    );
    log::info!("found {} moves in {:?}", moves.len(), t0.elapsed());
    for result in moves.iter() {
        println!("{}", result);
    }

    let ret = serde_json::to_value(Answer { moves: &moves })?;
    println!("{}", serde_json::to_string_pretty(&ret)?);

    Ok(())
}
