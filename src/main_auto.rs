// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use wordlane::{board, display, error, game_config, logging, move_picker, word_index};

// auto <word list> [csv log] [seed]
pub fn main() -> error::Returns<()> {
    logging::init_logger(logging::debug_requested());
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        wordlane::return_error!(
            Usage,
            "usage: {} <word list> [csv log] [seed]",
            args.first().map_or("auto", |s| s.as_str())
        );
    }
    let words = word_index::parse_word_list(&std::fs::read_to_string(&args[1])?)?;
    let word_index = word_index::WordIndex::from_words(&words);
    log::info!(
        "loaded {} words into {} nodes",
        word_index.len(),
        word_index.num_nodes()
    );
    let mut csv_log = match args.get(2).filter(|s| !s.is_empty()) {
        Some(path) => {
            let mut w = csv::Writer::from_path(path)?;
            w.serialize((
                "turn", "player", "rack", "position", "direction", "word", "score", "used",
                "totalscore", "tilesremaining",
            ))?;
            Some(w)
        }
        None => None,
    };
    let mut rng = match args.get(3) {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed.parse()?),
        None => rand_chacha::ChaCha20Rng::from_os_rng(),
    };

    let game_config = game_config::make_standard_game_config();
    let move_picker = move_picker::MovePicker::new(&word_index);
    let search_params = move_picker::SearchParams::default();
    let mut board = board::Board::new(&game_config);
    board.shuffle_bag(&mut rng);
    let star = game_config.board_layout().star();
    if let Some(letter) = board.bootstrap(star) {
        log::info!("opening tile {} at {}", letter as char, star);
    }
    board.deal_racks();

    let total_tiles = board.total_tiles();
    let mut scores = vec![0i32; game_config.num_players() as usize];
    let mut num_turns = 0u32;
    let mut zero_turns = 0;
    loop {
        display::print_board(&board);
        display::print_racks(&board);
        let turn = board.turn as usize;
        let rack = board.alphabet().fmt_rack(board.current_rack());
        match move_picker.pick_a_move(&board, &search_params) {
            Some(result) => {
                board.apply(&result)?;
                scores[turn] += result.points as i32;
                zero_turns = 0;
                println!("player {}: {} (total {})", turn + 1, result, scores[turn]);
                if let Some(w) = csv_log.as_mut() {
                    w.serialize((
                        num_turns,
                        turn + 1,
                        &rack,
                        result.position.to_string(),
                        result.direction.to_string(),
                        &result.word,
                        result.points,
                        &result.used,
                        scores[turn],
                        board.bag.len(),
                    ))?;
                }
            }
            None => {
                zero_turns += 1;
                println!("player {}: pass", turn + 1);
            }
        }
        num_turns += 1;
        debug_assert_eq!(board.total_tiles(), total_tiles);
        if board.current_rack().is_empty() && board.bag.is_empty() {
            println!("player {} went out", turn + 1);
            break;
        }
        if zero_turns >= board.racks.len() {
            println!("nobody can move");
            break;
        }
        board.next_turn();
    }

    display::print_board(&board);
    for (i, score) in (1..).zip(scores.iter()) {
        println!("player {}: {}", i, score);
    }
    log::info!("game over after {} turns", num_turns);
    if let Some(mut w) = csv_log {
        w.flush()?;
    }
    Ok(())
}
