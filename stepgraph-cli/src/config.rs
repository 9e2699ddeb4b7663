//! stepgraph configuration loading from `.stepgraphrc.toml`.
//!
//! Configuration is optional - stepgraph uses sensible defaults if no config
//! file exists. Command-line flags override anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [scheduler]
//! tick_interval_ms = 50
//! skip_noop_steps = true
//! start_in_step_mode = false
//!
//! [graph]
//! strict_edges = false
//!
//! [output]
//! format = "table"
//! color = true
//! ```

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_TICK_INTERVAL_MS};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use stepgraph_core::EdgePolicy;

/// Contents of `.stepgraphrc.toml`. Every section may be omitted.
#[derive(Debug, Deserialize, Default)]
pub struct StepgraphConfig {
    /// Step cadence and stepping behavior.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Graph input validation.
    #[serde(default)]
    pub graph: GraphConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Scheduler configuration.
#[derive(Debug, Deserialize)]
pub struct SchedulerConfig {
    /// Interval between auto-mode ticks, in milliseconds.
    ///
    /// Default: 50
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Whether a manual step keeps stepping past no-op pops (already visited
    /// nodes) until something visible changes.
    ///
    /// Default: `true`
    #[serde(default = "default_true")]
    pub skip_noop_steps: bool,

    /// Start interactive sessions in step mode.
    #[serde(default)]
    pub start_in_step_mode: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            skip_noop_steps: true,
            start_in_step_mode: false,
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_true() -> bool {
    true
}

/// Graph input validation settings.
#[derive(Debug, Deserialize, Default)]
pub struct GraphConfig {
    /// Reject edges whose endpoints are outside the node range instead of
    /// silently dropping them.
    #[serde(default)]
    pub strict_edges: bool,
}

/// `[output]`: default format and color choice; `--format` wins over both.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format. Valid values: `table`, `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Defaults to auto-detection.
    #[serde(default)]
    pub color: Option<bool>,
}

impl StepgraphConfig {
    /// Read `.stepgraphrc.toml` from `root`.
    ///
    /// A missing file means defaults. An unreadable or malformed file is
    /// reported with `warn!` and also falls back to defaults.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                return Self::default();
            }
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Tick interval, with `override_ms` taking precedence. Never zero.
    pub fn tick_interval(&self, override_ms: Option<u64>) -> Duration {
        let ms = override_ms.unwrap_or(self.scheduler.tick_interval_ms).max(1);
        Duration::from_millis(ms)
    }

    /// Edge policy; `strict` from the command line forces rejection.
    pub fn edge_policy(&self, strict: bool) -> EdgePolicy {
        if strict || self.graph.strict_edges {
            EdgePolicy::Reject
        } else {
            EdgePolicy::Drop
        }
    }

    /// Configured format name, parsed by the caller.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured color preference, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StepgraphConfig::default();
        assert_eq!(config.scheduler.tick_interval_ms, 50);
        assert!(config.scheduler.skip_noop_steps);
        assert!(!config.scheduler.start_in_step_mode);
        assert!(!config.graph.strict_edges);
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[scheduler]
tick_interval_ms = 300
skip_noop_steps = false
start_in_step_mode = true

[graph]
strict_edges = true

[output]
format = "json"
color = false
"#;
        let config: StepgraphConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.tick_interval(None), Duration::from_millis(300));
        assert!(!config.scheduler.skip_noop_steps);
        assert!(config.scheduler.start_in_step_mode);
        assert_eq!(config.edge_policy(false), EdgePolicy::Reject);
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let toml_content = r#"
[scheduler]
start_in_step_mode = true
"#;
        let config: StepgraphConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.scheduler.tick_interval_ms, 50);
        assert!(config.scheduler.skip_noop_steps);
    }

    #[test]
    fn test_overrides() {
        let config = StepgraphConfig::default();
        assert_eq!(config.tick_interval(Some(10)), Duration::from_millis(10));
        assert_eq!(config.tick_interval(Some(0)), Duration::from_millis(1));
        assert_eq!(config.edge_policy(false), EdgePolicy::Drop);
        assert_eq!(config.edge_policy(true), EdgePolicy::Reject);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StepgraphConfig::load(dir.path());
        assert_eq!(config.scheduler.tick_interval_ms, 50);
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[scheduler\nbroken").unwrap();
        let config = StepgraphConfig::load(dir.path());
        assert_eq!(config.scheduler.tick_interval_ms, 50);
    }
}
