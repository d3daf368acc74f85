// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error};

// What the engine does when nothing has been played yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstMoveRule {
    // No search on an empty board. The caller places the opening tiles itself.
    Unanchored,
    // Opening words come from the rack alone and must cover the star.
    CoverStar,
}

pub struct StaticGameConfig<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    first_move_rule: FirstMoveRule,
}

pub enum GameConfig<'a> {
    Static(StaticGameConfig<'a>),
}

impl<'a> GameConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet<'a> {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_players,
        }
    }

    #[inline(always)]
    pub fn first_move_rule(&self) -> FirstMoveRule {
        match self {
            GameConfig::Static(x) => x.first_move_rule,
        }
    }

    pub fn with_first_move_rule(self, first_move_rule: FirstMoveRule) -> Self {
        match self {
            GameConfig::Static(x) => GameConfig::Static(StaticGameConfig {
                first_move_rule,
                ..x
            }),
        }
    }
}

// For layouts and rack sizes other than the standard ones.
pub fn make_game_config<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    first_move_rule: FirstMoveRule,
) -> error::Returns<GameConfig<'a>> {
    if rack_size <= 0 {
        return_error!(Usage, "rack size {} must be positive", rack_size);
    }
    if num_players == 0 {
        return_error!(Usage, "a game needs at least one player");
    }
    let dim = board_layout.dim();
    let max_lane_len = dim.rows.max(dim.cols);
    if max_lane_len < 2 {
        return_error!(Layout, "{}x{} board has no room for words", dim.rows, dim.cols);
    }
    let needed = rack_size as u16 * num_players as u16;
    if needed > alphabet.num_tiles() {
        return_error!(
            Supply,
            "{} racks of {} need {} tiles, alphabet has {}",
            num_players,
            rack_size,
            needed,
            alphabet.num_tiles()
        );
    }
    Ok(GameConfig::Static(StaticGameConfig {
        alphabet,
        board_layout,
        rack_size,
        num_players,
        first_move_rule,
    }))
}

pub fn make_standard_game_config<'a>() -> GameConfig<'a> {
    GameConfig::Static(StaticGameConfig {
        alphabet: &alphabet::ENGLISH_ALPHABET,
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: 6,
        num_players: 2,
        first_move_rule: FirstMoveRule::Unanchored,
    })
}

pub fn make_anchored_game_config<'a>() -> GameConfig<'a> {
    make_standard_game_config().with_first_move_rule(FirstMoveRule::CoverStar)
}
