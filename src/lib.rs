// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod display;
pub mod game_config;
pub mod logging;
pub mod matrix;
pub mod move_picker;
pub mod movegen;
pub mod pattern;
pub mod play_scorer;
pub mod word_index;
