//! Rendering for everything the CLI prints.
//!
//! Two formats: `table` for people and `json` for scripts. Interactive
//! sessions and step traces print many records in a row; those use
//! [`OutputConfig::streaming`] so JSON output stays one object per line.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;
mod table;
mod view;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;
pub use self::view::{GraphSummary, HelpText, RunView, StepLine};

const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Status line plus node and edge tables
    #[default]
    Table,
    /// JSON snapshots
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}' (expected table or json)", s)),
        }
    }
}

/// How to render: format, color and layout.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    /// One record per line: minified JSON, borderless tables.
    pub compact: bool,
    /// Fixed table width; the terminal width is used when unset.
    pub width: Option<usize>,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: false,
            compact: false,
            width: None,
        }
    }

    /// Colors follow `color_override` when set, otherwise whether stdout is
    /// a terminal.
    pub fn detect(format: OutputFormat, color_override: Option<bool>) -> Self {
        Self {
            color: color_override.unwrap_or_else(|| std::io::stdout().is_terminal()),
            ..Self::new(format)
        }
    }

    /// Variant for output that prints many records in sequence. Only JSON
    /// changes; tables keep their borders.
    pub fn streaming(&self) -> Self {
        let mut config = self.clone();
        if config.format == OutputFormat::Json {
            config.compact = true;
        }
        config
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn table_width(&self) -> usize {
        self.width.unwrap_or_else(|| {
            terminal_size::terminal_size()
                .map(|(w, _)| w.0 as usize)
                .unwrap_or(FALLBACK_WIDTH)
        })
    }
}

/// Anything the CLI can print in either format.
pub trait Outputter: Serialize {
    fn to_table(&self, config: &OutputConfig) -> String;

    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => JsonOutput::format(self, config),
        }
    }

    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("TABLE".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_streaming_only_compacts_json() {
        let json = OutputConfig::new(OutputFormat::Json);
        assert!(!json.compact);
        assert!(json.streaming().compact);

        let table = OutputConfig::new(OutputFormat::Table);
        assert!(!table.streaming().compact);
    }

    #[test]
    fn test_color_override() {
        assert!(!OutputConfig::detect(OutputFormat::Table, Some(false)).color);
        assert!(OutputConfig::detect(OutputFormat::Table, Some(true)).color);
    }

    #[test]
    fn test_fixed_width() {
        let config = OutputConfig::new(OutputFormat::Table).with_width(120);
        assert_eq!(config.table_width(), 120);
    }
}
