// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, matrix, pattern, word_index};
use serde::Serialize;

// A word that fits some pattern of one lane. Where exactly it goes is up to
// the scorer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub direction: matrix::Direction,
    pub lane: i8,
    // where the matched fragment starts on the lane. The scorer still slides
    // the word over every offset; this one is only reported.
    pub offset: usize,
    pub word: String,
}

impl Candidate {
    // first square of the lane.
    #[inline(always)]
    pub fn lane_start(&self) -> matrix::Position {
        match self.direction {
            matrix::Direction::Across => matrix::Position::new(0, self.lane),
            matrix::Direction::Down => matrix::Position::new(self.lane, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub word: String,
    pub position: matrix::Position,
    pub direction: matrix::Direction,
    pub points: i16,
    // rack letters that went onto empty squares.
    pub used: String,
    // per letter of word, whether it went onto an empty square.
    #[serde(skip)]
    pub is_new: Box<[bool]>,
}

impl MoveResult {
    pub fn to_moves(&self) -> Vec<board::Move> {
        (0..)
            .zip(self.word.bytes())
            .map(|(i, letter)| board::Move {
                position: self.position.step(self.direction, i),
                letter,
            })
            .collect()
    }

    pub fn new_moves(&self) -> Vec<board::Move> {
        self.to_moves()
            .into_iter()
            .zip(self.is_new.iter())
            .filter_map(|(m, &is_new)| if is_new { Some(m) } else { None })
            .collect()
    }
}

impl std::fmt::Display for MoveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} (used {})",
            self.position, self.direction, self.word, self.points, self.used
        )
    }
}

// word ⊆ line ⊎ rack, as multisets.
#[inline(always)]
pub fn composable(
    word: &alphabet::Tally,
    line: &alphabet::Tally,
    rack: &alphabet::Tally,
) -> bool {
    word.iter()
        .zip(line.iter().zip(rack.iter()))
        .all(|(&w, (&l, &r))| w as u16 <= l as u16 + r as u16)
}

struct WordEntry {
    word: String,
    tally: alphabet::Tally,
}

pub struct MoveGenerator<'a> {
    word_index: &'a word_index::WordIndex,
    entries: Box<[WordEntry]>,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(word_index: &'a word_index::WordIndex) -> Self {
        let mut words = word_index.words();
        words.sort_unstable();
        let entries = words
            .into_iter()
            .filter(|word| word.bytes().all(alphabet::is_letter))
            .map(|word| WordEntry {
                tally: alphabet::tally_of(word.as_bytes()),
                word,
            })
            .collect();
        Self {
            word_index,
            entries,
        }
    }

    #[inline(always)]
    pub fn word_index(&self) -> &'a word_index::WordIndex {
        self.word_index
    }

    // Appends every candidate for one lane. Blank lanes give nothing.
    pub fn gen_lane_candidates(
        &self,
        board: &board::Board,
        direction: matrix::Direction,
        lane: i8,
        rack: &[u8],
        out: &mut Vec<Candidate>,
    ) {
        let template = board.template(direction, lane);
        if template.iter().all(|&c| c == pattern::BLANK) {
            return;
        }
        let line_tally = alphabet::tally_of(&template);
        let rack_tally = alphabet::tally_of(rack);
        let available = self
            .entries
            .iter()
            .filter(|entry| {
                entry.word.len() <= template.len()
                    && composable(&entry.tally, &line_tally, &rack_tally)
            })
            .collect::<Vec<_>>();
        if available.is_empty() {
            return;
        }
        let patterns = pattern::compile(&template, rack);
        log::debug!(
            "{} {}: {} available words, patterns {:?}",
            direction,
            lane,
            available.len(),
            patterns.iter().map(|p| p.expression()).collect::<Vec<_>>()
        );
        // sorted words, so one pass per word keeps the first pattern it fits.
        let out_start = out.len();
        for entry in available {
            if let Some(pattern) = patterns.iter().find(|p| p.is_match(&entry.word)) {
                out.push(Candidate {
                    direction,
                    lane,
                    offset: pattern.offset,
                    word: entry.word.clone(),
                });
            }
        }
        log::trace!(
            "{} {} {}: {} candidates",
            direction,
            lane,
            String::from_utf8_lossy(&template),
            out.len() - out_start
        );
    }

    // Words the rack alone spells, for an empty board.
    pub fn gen_opening_words(&self, rack: &[u8], max_len: usize) -> Vec<&str> {
        let rack_tally = alphabet::tally_of(rack);
        let no_line = [0u8; alphabet::NUM_LETTERS];
        self.entries
            .iter()
            .filter(|entry| {
                entry.word.len() <= max_len && composable(&entry.tally, &no_line, &rack_tally)
            })
            .map(|entry| entry.word.as_str())
            .collect()
    }

    pub fn gen_candidates(&self, board: &board::Board, rack: &[u8]) -> Vec<Candidate> {
        let dim = board.dim();
        let mut out = Vec::new();
        for lane in 0..dim.rows.max(dim.cols) {
            for direction in [matrix::Direction::Across, matrix::Direction::Down] {
                if lane < dim.num_lanes(direction) {
                    self.gen_lane_candidates(board, direction, lane, rack, &mut out);
                }
            }
        }
        out
    }
}
