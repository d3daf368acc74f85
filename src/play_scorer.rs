// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, matrix, movegen, word_index};

// One way of laying a word on the board, before any legality checks beyond
// letters agreeing with what is already there.
struct Placement {
    points: i16,
    num_intersected: usize,
    is_new: Box<[bool]>,
    used: String,
}

pub struct PlayScorer<'a> {
    word_index: &'a word_index::WordIndex,
}

impl<'a> PlayScorer<'a> {
    pub fn new(word_index: &'a word_index::WordIndex) -> Self {
        Self { word_index }
    }

    // None when an occupied square disagrees with the word, when the word runs
    // off the lane, or when the squares right before or after it hold tiles.
    fn lay_word(
        &self,
        board: &board::Board,
        direction: matrix::Direction,
        start: matrix::Position,
        word: &[u8],
    ) -> Option<Placement> {
        let dim = board.dim();
        let alphabet = board.alphabet();
        let (lane, idx) = start.lane_idx(direction);
        let strider = dim.lane(direction, lane);
        let word_len = word.len() as isize;
        if idx < 0 || idx as isize + word_len > strider.len() as isize {
            return None;
        }
        let end = idx + word.len() as i8;
        if (idx > 0 && board.tiles[strider.at(idx - 1)] != 0)
            || (end < strider.len() && board.tiles[strider.at(end)] != 0)
        {
            return None;
        }
        let premiums = board.game_config.board_layout().premiums();
        let mut word_multiplier = 1i16;
        let mut word_score = 0i16;
        let mut num_intersected = 0;
        let mut is_new = Vec::with_capacity(word.len());
        let mut used = String::new();
        for (i, &letter) in (idx..).zip(word.iter()) {
            let strider_at_i = strider.at(i);
            match board.tiles[strider_at_i] {
                0 => {
                    let premium = premiums[strider_at_i];
                    word_multiplier *= premium.word_multiplier as i16;
                    // a letter premium adds its value to the tile.
                    let letter_bonus = match premium.letter_multiplier {
                        1 => 0,
                        x => x as i16,
                    };
                    word_score += alphabet.score(letter) as i16 + letter_bonus;
                    is_new.push(true);
                    used.push(letter as char);
                }
                existing if existing == letter => {
                    word_score += alphabet.score(letter) as i16;
                    num_intersected += 1;
                    is_new.push(false);
                }
                _ => return None,
            }
        }
        Some(Placement {
            points: word_score * word_multiplier,
            num_intersected,
            is_new: is_new.into_boxed_slice(),
            used,
        })
    }

    // Slides the word over every offset of its lane. An offset counts when it
    // reuses a tile already there, adds at least one tile, and only needs
    // letters the rack has.
    pub fn score_candidate(
        &self,
        board: &board::Board,
        candidate: &movegen::Candidate,
        rack: &[u8],
        out: &mut Vec<movegen::MoveResult>,
    ) {
        let word = candidate.word.as_bytes();
        let lane_len = board.dim().lane_len(candidate.direction) as usize;
        if word.is_empty() || word.len() > lane_len {
            return;
        }
        let rack_tally = alphabet::tally_of(rack);
        let lane_start = candidate.lane_start();
        for offset in 0..=(lane_len - word.len()) as i8 {
            let position = lane_start.step(candidate.direction, offset);
            let Some(placement) = self.lay_word(board, candidate.direction, position, word) else {
                continue;
            };
            if placement.num_intersected == 0 || placement.used.is_empty() {
                continue;
            }
            if !fits_rack(&placement.used, &rack_tally) {
                log::trace!(
                    "{} {} {} (fits the pattern at {}): rack lacks {}",
                    position,
                    candidate.direction,
                    candidate.word,
                    candidate.offset,
                    placement.used
                );
                continue;
            }
            out.push(movegen::MoveResult {
                word: candidate.word.clone(),
                position,
                direction: candidate.direction,
                points: placement.points,
                used: placement.used,
                is_new: placement.is_new,
            });
        }
    }

    // Opening words on an empty board, across and down over the star.
    pub fn score_opening(
        &self,
        board: &board::Board,
        word: &str,
        rack: &[u8],
        out: &mut Vec<movegen::MoveResult>,
    ) {
        let bytes = word.as_bytes();
        if bytes.is_empty() || !fits_rack(word, &alphabet::tally_of(rack)) {
            return;
        }
        let star = board.game_config.board_layout().star();
        for direction in [matrix::Direction::Across, matrix::Direction::Down] {
            let (_, star_idx) = star.lane_idx(direction);
            let lane_len = board.dim().lane_len(direction) as isize;
            let word_len = bytes.len() as isize;
            let first = (star_idx as isize - word_len + 1).max(0);
            let last = (star_idx as isize).min(lane_len - word_len);
            for idx in first..=last {
                let position = star.step(direction, idx as i8 - star_idx);
                if let Some(placement) = self.lay_word(board, direction, position, bytes) {
                    out.push(movegen::MoveResult {
                        word: word.to_string(),
                        position,
                        direction,
                        points: placement.points,
                        used: placement.used,
                        is_new: placement.is_new,
                    });
                }
            }
        }
    }

    // Points from the perpendicular runs through the placed word, on a board
    // that already has it. None if any such run is not a word.
    pub fn secondary_score(
        &self,
        board_after: &board::Board,
        result: &movegen::MoveResult,
    ) -> Option<i16> {
        let dim = board_after.dim();
        let alphabet = board_after.alphabet();
        let cross_direction = result.direction.other();
        let mut total = 0i16;
        let mut cross_word = Vec::new();
        for (i, &is_new) in (0..).zip(result.is_new.iter()) {
            let position = result.position.step(result.direction, i);
            let (lane, idx) = position.lane_idx(cross_direction);
            let strider = dim.lane(cross_direction, lane);
            let mut j = idx;
            while j > 0 && board_after.tiles[strider.at(j - 1)] != 0 {
                j -= 1;
            }
            let mut k = idx + 1;
            while k < strider.len() && board_after.tiles[strider.at(k)] != 0 {
                k += 1;
            }
            if k - j <= 1 {
                continue;
            }
            cross_word.clear();
            cross_word.extend((j..k).map(|x| board_after.tiles[strider.at(x)]));
            let Ok(cross_str) = std::str::from_utf8(&cross_word) else {
                return None;
            };
            if !self.word_index.contains(cross_str) {
                log::trace!(
                    "{} {} {}: {} is not a word",
                    result.position,
                    result.direction,
                    result.word,
                    cross_str
                );
                return None;
            }
            if !is_new {
                continue;
            }
            let premium = board_after.premium_at(position);
            let mut word_score = 0i16;
            for x in j..k {
                let tile_score = alphabet.score(board_after.tiles[strider.at(x)]) as i16;
                word_score += if x == idx {
                    tile_score * premium.letter_multiplier as i16
                } else {
                    tile_score
                };
            }
            total += word_score * premium.word_multiplier as i16;
        }
        Some(total)
    }

    // Lays the new tiles on scratch (a copy of board) and adds the cross
    // scores. None if a cross word is invalid.
    pub fn finish<'b>(
        &self,
        board: &board::Board<'b>,
        scratch: &mut board::Board<'b>,
        mut result: movegen::MoveResult,
    ) -> Option<movegen::MoveResult> {
        scratch.clone_from(board);
        scratch.place(&result.new_moves());
        let cross_points = self.secondary_score(scratch, &result)?;
        result.points += cross_points;
        Some(result)
    }
}

fn fits_rack(used: &str, rack_tally: &alphabet::Tally) -> bool {
    let used_tally = alphabet::tally_of(used.as_bytes());
    used.bytes().all(alphabet::is_letter)
        && used_tally
            .iter()
            .zip(rack_tally.iter())
            .all(|(&u, &r)| u <= r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_config;
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

    fn candidate(direction: Direction, lane: i8, word: &str) -> movegen::Candidate {
        movegen::Candidate {
            direction,
            lane,
            offset: 0,
            word: word.to_string(),
        }
    }

    #[test]
    fn extending_cat_to_cats() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["CAT", "CATS"]);
        let scorer = PlayScorer::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);

        let mut out = Vec::new();
        scorer.score_candidate(&b, &candidate(Direction::Across, 7, "CATS"), b"S", &mut out);
        assert_eq!(out.len(), 1);
        let result = &out[0];
        assert_eq!(result.position, Position::new(7, 7));
        assert_eq!(result.points, 6);
        assert_eq!(result.used, "S");
        assert_eq!(&*result.is_new, &[false, false, false, true]);

        let mut scratch = b.clone();
        let finished = scorer.finish(&b, &mut scratch, result.clone()).unwrap();
        assert_eq!(finished.points, 6);
        assert_eq!(scratch.letter_at(Position::new(10, 7)), Some(b'S'));
        assert_eq!(b.letter_at(Position::new(10, 7)), None);
    }

    #[test]
    fn mismatches_and_missing_letters_are_rejected() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["COT", "CATS", "SCAT"]);
        let scorer = PlayScorer::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);

        let mut out = Vec::new();
        scorer.score_candidate(&b, &candidate(Direction::Across, 7, "COT"), b"O", &mut out);
        assert!(out.is_empty());
        // the S is not on the rack.
        scorer.score_candidate(&b, &candidate(Direction::Across, 7, "CATS"), b"X", &mut out);
        assert!(out.is_empty());
        // placing nothing new is not a move.
        scorer.score_candidate(&b, &candidate(Direction::Across, 7, "CAT"), b"CAT", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn neighbouring_tiles_block_the_offset() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["AT"]);
        let scorer = PlayScorer::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);

        // AT on top of the A of CAT would leave C and T glued to it.
        let mut out = Vec::new();
        scorer.score_candidate(&b, &candidate(Direction::Across, 7, "AT"), b"T", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn scores_are_reproducible() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["CAT", "ACT", "TACT"]);
        let scorer = PlayScorer::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "A", Position::new(7, 7), Direction::Across);
        let cand = candidate(Direction::Down, 7, "CAT");
        let mut first = Vec::new();
        let mut second = Vec::new();
        scorer.score_candidate(&b, &cand, b"CTT", &mut first);
        scorer.score_candidate(&b, &cand, b"CTT", &mut second);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].position, Position::new(7, 6));
    }

    #[test]
    fn invalid_cross_word_rejects_the_move() {
        let game_config = game_config::make_standard_game_config();
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);
        place_word(&mut b, "Z", Position::new(10, 8), Direction::Across);
        let cand = candidate(Direction::Down, 9, "TO");

        let without_oz = word_index::WordIndex::from_words(["CAT", "TO"]);
        let scorer = PlayScorer::new(&without_oz);
        let mut out = Vec::new();
        scorer.score_candidate(&b, &cand, b"O", &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].points, 2);
        let mut scratch = b.clone();
        assert!(scorer.finish(&b, &mut scratch, out[0].clone()).is_none());

        let with_oz = word_index::WordIndex::from_words(["CAT", "TO", "OZ"]);
        let scorer = PlayScorer::new(&with_oz);
        let finished = scorer.finish(&b, &mut scratch, out[0].clone()).unwrap();
        assert_eq!(finished.points, 2 + 11);
    }

    #[test]
    fn cross_multipliers_only_at_the_new_tile() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["CAT", "XA", "BOX"]);
        let scorer = PlayScorer::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);
        // B sits on a double letter square but was played earlier.
        place_word(&mut b, "BO", Position::new(6, 6), Direction::Across);
        assert_eq!(b.premium_at(Position::new(6, 6)).letter_multiplier, 2);
        assert_eq!(b.premium_at(Position::new(8, 6)).letter_multiplier, 2);

        let mut out = Vec::new();
        scorer.score_candidate(&b, &candidate(Direction::Down, 8, "XA"), b"X", &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].points, (8 + 2) + 1);
        let mut scratch = b.clone();
        let finished = scorer.finish(&b, &mut scratch, out[0].clone()).unwrap();
        // BOX: 3 + 1 + 8 * 2.
        assert_eq!(finished.points, 11 + 20);
    }

    #[test]
    fn letter_premium_adds_to_the_new_tile() {
        let game_config = game_config::make_standard_game_config();
        let index = word_index::WordIndex::from_words(["CAT", "AS"]);
        let scorer = PlayScorer::new(&index);
        let mut b = board::Board::new(&game_config);
        place_word(&mut b, "CAT", Position::new(7, 7), Direction::Across);
        assert_eq!(b.premium_at(Position::new(8, 8)).letter_multiplier, 2);

        let mut out = Vec::new();
        scorer.score_candidate(&b, &candidate(Direction::Down, 8, "AS"), b"S", &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, Position::new(8, 7));
        // A as played, S plus the double letter bonus.
        assert_eq!(out[0].points, 1 + (1 + 2));
    }

    #[test]
    fn opening_words_cover_the_star() {
        let game_config = game_config::make_anchored_game_config();
        let index = word_index::WordIndex::from_words(["CAT"]);
        let scorer = PlayScorer::new(&index);
        let b = board::Board::new(&game_config);
        let mut out = Vec::new();
        scorer.score_opening(&b, "CAT", b"TAC", &mut out);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|r| r.points == 5 && r.used == "CAT"));
        assert!(out.iter().any(|r| r.position == Position::new(5, 7)));
        assert!(out.iter().any(|r| r.position == Position::new(7, 5)));
        out.clear();
        scorer.score_opening(&b, "CAT", b"CA", &mut out);
        assert!(out.is_empty());
    }
}
