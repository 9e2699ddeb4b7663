//! JSON rendering.

use super::OutputConfig;
use serde::Serialize;

pub struct JsonOutput;

impl JsonOutput {
    /// Pretty JSON, or a single line when `config.compact` is set.
    ///
    /// Serialization of the CLI's own view types cannot fail; should it
    /// anyway, the error is reported as a JSON object in the same layout.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        let rendered = if config.compact {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}
