//! Edge stream parsing
//!
//! Recorded edge streams are UTF-8 text holding either a JSON array of edge
//! records or JSON Lines with one record per line.

use miette::NamedSource;

use crate::core::Edge;
use crate::error::{EdgeParseError, LoopError};

/// Parse a recorded edge stream
///
/// `name` is only used to label diagnostics.
pub fn parse_edge_stream(name: &str, content: &str) -> Result<Vec<Edge>, LoopError> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str::<Vec<Edge>>(content)
            .map_err(|err| parse_error(name, content, 0, err));
    }

    let mut edges = Vec::new();
    let mut line_start = 0;

    for line in content.split_inclusive('\n') {
        let record = line.trim();
        if !record.is_empty() {
            let edge = serde_json::from_str::<Edge>(record).map_err(|err| {
                let leading = line.len() - line.trim_start().len();
                parse_error(name, content, line_start + leading, err)
            })?;
            edges.push(edge);
        }
        line_start += line.len();
    }

    Ok(edges)
}

/// Build a labelled diagnostic for a serde_json failure
///
/// `base` is the byte offset where the parsed text starts inside `content`.
/// serde_json counts lines from the start of the parsed text, so its
/// position is translated into one within the whole stream.
fn parse_error(name: &str, content: &str, base: usize, source: serde_json::Error) -> LoopError {
    let offset = base + offset_in(&content[base..], source.line(), source.column());
    let span = (offset < content.len()).then(|| (offset, 1).into());
    let (line, column) = line_column(content, offset);

    let message = source.to_string();
    let position = format!(" at line {} column {}", source.line(), source.column());
    let reason = message.strip_suffix(&position).unwrap_or(&message).to_string();

    LoopError::EdgeParseError(Box::new(EdgeParseError {
        file: name.to_string(),
        source_code: NamedSource::new(name, content.to_string()),
        span,
        line,
        column,
        reason,
    }))
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(content.len());
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let before = &content[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before.len() - line_start + 1)
}

/// Byte offset of a 1-based (line, column) position reported by serde_json
fn offset_in(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    offset.min(text.len())
}
