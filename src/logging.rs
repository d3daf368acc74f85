// Copyright (C) 2020-2026 Andy Kurnia.

use log::LevelFilter;

// WORDLANE_DEBUG set to anything but "" or "0".
pub fn debug_requested() -> bool {
    std::env::var("WORDLANE_DEBUG").is_ok_and(|v| !v.is_empty() && v != "0")
}

// For the binaries. The library itself only emits through the log facade.
// RUST_LOG, when set, overrides the level chosen here. Calling this twice
// keeps the first logger.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
