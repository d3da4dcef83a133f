//! JSON report formatting

use super::{ReportFormatter, ReportPayload};
use crate::error::LoopError;

/// Serializes the payload as JSON, pretty-printed unless built with
/// [`JsonFormatter::compact`]
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter {
    pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, payload: &ReportPayload<'_>) -> Result<String, LoopError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(payload)?
        } else {
            serde_json::to_string(payload)?
        };
        Ok(text)
    }
}
