//! Shared constants for the stepgraph CLI.

/// Name of the optional config file in the working directory.
pub const CONFIG_FILE_NAME: &str = ".stepgraphrc.toml";

/// Auto-mode tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
