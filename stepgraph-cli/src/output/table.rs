//! Table rendering with `tabled`.

use super::OutputConfig;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
    Table,
};

pub struct TableOutput;

impl TableOutput {
    /// Two-column table of labels and values, labels right-aligned.
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();
        for (label, value) in pairs {
            builder.push_record([*label, value.as_str()]);
        }

        let mut table = builder.build();
        table.with(Modify::new(Columns::first()).with(Alignment::right()));
        Self::finish(table, config)
    }

    /// Table with a header row. Columns are right-aligned from `numeric_from`
    /// onwards so ids and distances line up.
    pub fn from_rows(
        headers: &[&str],
        rows: &[Vec<String>],
        numeric_from: usize,
        config: &OutputConfig,
    ) -> String {
        if rows.is_empty() {
            return "(none)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());
        for row in rows {
            builder.push_record(row.iter().map(String::as_str));
        }

        let mut table = builder.build();
        table.with(Modify::new(Columns::single(0)).with(Alignment::right()));
        if numeric_from > 0 {
            table.with(Modify::new(Columns::new(numeric_from..headers.len())).with(Alignment::right()));
        }
        Self::finish(table, config)
    }

    fn finish(mut table: Table, config: &OutputConfig) -> String {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
        table.with(Width::wrap(config.table_width()));
        table.to_string()
    }
}
