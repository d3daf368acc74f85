// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, game_config, matrix, movegen, play_scorer, word_index};

#[derive(Clone, Copy, Debug)]
pub struct SearchParams {
    // 0 means one per cpu.
    pub num_threads: usize,
    pub max_gen: usize,
    // lanes not started by then are skipped.
    pub deadline: Option<std::time::Instant>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            num_threads: 0,
            max_gen: usize::MAX,
            deadline: None,
        }
    }
}

// best first, then by word, position and direction so that the order does not
// depend on which worker finished first.
pub fn rank(results: &mut [movegen::MoveResult]) {
    results.sort_unstable_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.word.cmp(&b.word))
            .then_with(|| a.position.cmp(&b.position))
            .then_with(|| a.direction.cmp(&b.direction))
    });
}

pub struct MovePicker<'a> {
    move_generator: movegen::MoveGenerator<'a>,
    play_scorer: play_scorer::PlayScorer<'a>,
}

impl<'a> MovePicker<'a> {
    pub fn new(word_index: &'a word_index::WordIndex) -> Self {
        Self {
            move_generator: movegen::MoveGenerator::new(word_index),
            play_scorer: play_scorer::PlayScorer::new(word_index),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn gen_lane_moves<'b>(
        &self,
        board: &board::Board<'b>,
        direction: matrix::Direction,
        lane: i8,
        rack: &[u8],
        scratch: &mut board::Board<'b>,
        candidates: &mut Vec<movegen::Candidate>,
        primaries: &mut Vec<movegen::MoveResult>,
        out: &mut Vec<movegen::MoveResult>,
    ) {
        candidates.clear();
        self.move_generator
            .gen_lane_candidates(board, direction, lane, rack, candidates);
        for candidate in candidates.iter() {
            primaries.clear();
            self.play_scorer
                .score_candidate(board, candidate, rack, primaries);
            for primary in primaries.drain(..) {
                if let Some(result) = self.play_scorer.finish(board, scratch, primary) {
                    out.push(result);
                }
            }
        }
    }

    fn gen_opening_moves(&self, board: &board::Board, rack: &[u8]) -> Vec<movegen::MoveResult> {
        let dim = board.dim();
        let max_len = dim.rows.max(dim.cols) as usize;
        let mut out = Vec::new();
        for word in self.move_generator.gen_opening_words(rack, max_len) {
            self.play_scorer.score_opening(board, word, rack, &mut out);
        }
        out
    }

    // Every legal move for rack, best first. The board is only read.
    pub fn gen_moves(
        &self,
        board: &board::Board,
        rack: &[u8],
        params: &SearchParams,
    ) -> Vec<movegen::MoveResult> {
        let mut results = if board.is_empty() {
            match board.game_config.first_move_rule() {
                game_config::FirstMoveRule::Unanchored => {
                    log::debug!("empty board, nothing to anchor to");
                    Vec::new()
                }
                game_config::FirstMoveRule::CoverStar => self.gen_opening_moves(board, rack),
            }
        } else {
            self.gen_anchored_moves(board, rack, params)
        };
        rank(&mut results);
        results.truncate(params.max_gen);
        results
    }

    fn gen_anchored_moves(
        &self,
        board: &board::Board,
        rack: &[u8],
        params: &SearchParams,
    ) -> Vec<movegen::MoveResult> {
        let dim = board.dim();
        let lanes = (0..dim.rows)
            .map(|lane| (matrix::Direction::Across, lane))
            .chain((0..dim.cols).map(|lane| (matrix::Direction::Down, lane)))
            .collect::<Vec<_>>();
        let num_threads = match params.num_threads {
            0 => num_cpus::get(),
            n => n,
        }
        .clamp(1, lanes.len().max(1));
        let next_lane = std::sync::atomic::AtomicUsize::new(0);
        let timed_out = std::sync::atomic::AtomicBool::new(false);
        let (tx, rx) = std::sync::mpsc::channel::<Vec<movegen::MoveResult>>();
        let mut results = Vec::new();
        std::thread::scope(|s| {
            for _ in 0..num_threads {
                let tx = tx.clone();
                let lanes = &lanes;
                let next_lane = &next_lane;
                let timed_out = &timed_out;
                s.spawn(move || {
                    let mut scratch = board.clone();
                    let mut candidates = Vec::new();
                    let mut primaries = Vec::new();
                    loop {
                        if params
                            .deadline
                            .is_some_and(|deadline| std::time::Instant::now() >= deadline)
                        {
                            timed_out.store(true, std::sync::atomic::Ordering::Relaxed);
                            break;
                        }
                        let i = next_lane.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        let Some(&(direction, lane)) = lanes.get(i) else {
                            break;
                        };
                        let mut lane_results = Vec::new();
                        self.gen_lane_moves(
                            board,
                            direction,
                            lane,
                            rack,
                            &mut scratch,
                            &mut candidates,
                            &mut primaries,
                            &mut lane_results,
                        );
                        if tx.send(lane_results).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);
            for lane_results in rx.iter() {
                results.extend(lane_results);
            }
        });
        if timed_out.load(std::sync::atomic::Ordering::Relaxed) {
            log::warn!(
                "deadline passed, ranking {} moves from a partial search",
                results.len()
            );
        }
        log::debug!(
            "{} moves over {} lanes with {} threads",
            results.len(),
            lanes.len(),
            num_threads
        );
        results
    }

    // The best move for whoever is to play, or None if there is nothing.
    pub fn pick_a_move(
        &self,
        board: &board::Board,
        params: &SearchParams,
    ) -> Option<movegen::MoveResult> {
        let params = SearchParams {
            max_gen: 1,
            ..*params
        };
        let best = self
            .gen_moves(board, board.current_rack(), &params)
            .into_iter()
            .next();
        match &best {
            Some(result) => log::info!(
                "player {} with {:?}: {}",
                board.turn + 1,
                String::from_utf8_lossy(board.current_rack()),
                result
            ),
            None => log::info!(
                "player {} with {:?}: no move",
                board.turn + 1,
                String::from_utf8_lossy(board.current_rack())
            ),
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix::{Direction, Position};

    fn place_word(b: &mut board::Board, word: &str, start: Position, direction: Direction) {
        let moves = (0..)
            .zip(word.bytes())
            .map(|(i, letter)| board::Move {
                position: start.step(direction, i),
                letter,
            })
            .collect::<Vec<_>>();
        b.place(&moves);
    }

    fn summary(results: &[movegen::MoveResult]) -> Vec<(String, Position, Direction, i16)> {
        results
            .iter()
            .map(|r| (r.word.clone(), r.position, r.direction, r.points))
            .collect()
    }

    #[test]
    fn ranked_moves_around_cat() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["CAT", "CATS", "SCAT", "AS"]);
        let picker = MovePicker::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);

        let results = picker.gen_moves(&b, b"S", &SearchParams::default());
        assert_eq!(
            summary(&results),
            vec![
                ("CATS".to_string(), Position::new(7, 7), Direction::Across, 6),
                ("SCAT".to_string(), Position::new(6, 7), Direction::Across, 6),
                ("AS".to_string(), Position::new(8, 7), Direction::Down, 4),
            ]
        );
    }

    #[test]
    fn invalid_cross_words_never_rank() {
        let game_config = game_config::make_standard_game_config();
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);
        place_word(&mut b, "Z", Position::new(10, 8), Direction::Across);

        let index = word_index::WordIndex::from_words(["CAT", "TO"]);
        let picker = MovePicker::new(&index);
        assert!(picker.gen_moves(&b, b"O", &SearchParams::default()).is_empty());

        let index = word_index::WordIndex::from_words(["CAT", "TO", "OZ"]);
        let picker = MovePicker::new(&index);
        assert_eq!(
            summary(&picker.gen_moves(&b, b"O", &SearchParams::default())),
            vec![
                ("OZ".to_string(), Position::new(9, 8), Direction::Across, 13),
                ("TO".to_string(), Position::new(9, 7), Direction::Down, 13),
            ]
        );
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words([
            "CAT", "CATS", "SCAT", "ACT", "ACTS", "TA", "AT", "AS", "TAS", "SAT", "TACT",
        ]);
        let picker = MovePicker::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);
        let one = picker.gen_moves(
            &b,
            b"SAT",
            &SearchParams {
                num_threads: 1,
                ..SearchParams::default()
            },
        );
        let many = picker.gen_moves(
            &b,
            b"SAT",
            &SearchParams {
                num_threads: 4,
                ..SearchParams::default()
            },
        );
        assert!(!one.is_empty());
        assert_eq!(one, many);
        let top = picker.gen_moves(
            &b,
            b"SAT",
            &SearchParams {
                max_gen: 2,
                ..SearchParams::default()
            },
        );
        assert_eq!(top, one[..2].to_vec());
    }

    #[test]
    fn expired_deadline_skips_the_search() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["CAT", "CATS"]);
        let picker = MovePicker::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);
        let params = SearchParams {
            deadline: Some(std::time::Instant::now()),
            ..SearchParams::default()
        };
        assert!(picker.gen_moves(&b, b"S", &params).is_empty());
    }

    #[test]
    fn empty_board_follows_the_first_move_rule() {
        let index = word_index::WordIndex::from_words(["CAT", "AT"]);
        let picker = MovePicker::new(&index);

        let game_config = game_config::make_standard_game_config();
        let mut b = board::Board::new(&game_config);
        b.set_current_rack(b"CAT").unwrap();
        assert!(picker.pick_a_move(&b, &SearchParams::default()).is_none());

        let game_config = game_config::make_anchored_game_config();
        let mut b = board::Board::new(&game_config);
        b.set_current_rack(b"CAT").unwrap();
        let best = picker.pick_a_move(&b, &SearchParams::default()).unwrap();
        assert_eq!(best.word, "CAT");
        assert_eq!(best.points, 5);
        assert_eq!(best.position, Position::new(5, 7));
        assert_eq!(best.direction, Direction::Across);
    }
}
