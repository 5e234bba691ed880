//! Loading of backend responses and event logs from disk.
//!
//! Files ending in `.br` are Brotli-decompressed transparently.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use anyhow::{Context, Result};
use brotli::Decompressor;
use log::debug;
use serde::Deserialize;
use crate::app::DashboardEvent;
use crate::model::HistorySummaryRecord;
use crate::state::HistoryPage;

/// Shapes the backend uses for history responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryResponse {
    Records(Vec<HistorySummaryRecord>),
    Page(HistoryPage),
}

/// Parses a history response.
///
/// Accepts either a bare array of records, which is treated as page 0 with
/// nothing further to fetch, or a page envelope
/// `{"page": .., "has_more": .., "records" | "data": [..]}`.
pub fn parse_history_response(text: &str) -> Result<HistoryPage> {
    let response: HistoryResponse = serde_json::from_str(text)
        .context("Failed to parse history response")?;

    Ok(match response {
        HistoryResponse::Records(records) => HistoryPage {
            page: 0,
            has_more: false,
            records,
        },
        HistoryResponse::Page(page) => page,
    })
}

/// Opens `path` for buffered reading, decompressing `.br` files.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let reader: Box<dyn BufRead> = if is_brotli(path) {
        let decompressor = Decompressor::new(file, 4096);
        Box::new(BufReader::new(decompressor))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Loads one history response from disk.
pub fn load_history_page(path: impl AsRef<Path>) -> Result<HistoryPage> {
    let path = path.as_ref();
    let mut text = String::new();
    open_reader(path)?
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let page = parse_history_response(&text)
        .with_context(|| format!("Invalid history file: {}", path.display()))?;
    debug!("Loaded {} history records from {}", page.records.len(), path.display());
    Ok(page)
}

/// Loads an event log: one JSON-encoded [`DashboardEvent`] per line.
///
/// Blank lines are skipped.
pub fn load_event_log(path: impl AsRef<Path>) -> Result<Vec<DashboardEvent>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let mut events = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        let event: DashboardEvent = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse event at line {}", line_num + 1))?;
        events.push(event);
    }

    debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Loads the history records from a snapshot written by
/// [`SnapshotWriter`](crate::io::SnapshotWriter).
///
/// Lines of other types are skipped.
pub fn load_snapshot_history(path: impl AsRef<Path>) -> Result<Vec<HistorySummaryRecord>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        let mut value: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse snapshot line {}", line_num + 1))?;
        if value["type"] != "history" {
            continue;
        }

        let record = serde_json::from_value(value["record"].take())
            .with_context(|| format!("Invalid history record at line {}", line_num + 1))?;
        records.push(record);
    }

    debug!("Restored {} history records from {}", records.len(), path.display());
    Ok(records)
}

pub(crate) fn is_brotli(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "br")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let page = parse_history_response(r#"[{"SIMULATION_ID": 2}, {"SIMULATION_ID": 9}]"#).unwrap();
        assert_eq!(page.page, 0);
        assert!(!page.has_more);
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn test_parse_envelope_with_data_alias() {
        let page = parse_history_response(r#"{"page": 3, "has_more": true, "data": [{"SIMULATION_ID": 4}]}"#)
            .unwrap();
        assert_eq!(page.page, 3);
        assert!(page.has_more);
        assert_eq!(page.records[0].id, Some(4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_history_response("42").is_err());
        assert!(parse_history_response("{not json").is_err());
    }

    #[test]
    fn test_is_brotli() {
        assert!(is_brotli(Path::new("history.json.br")));
        assert!(!is_brotli(Path::new("history.json")));
        assert!(!is_brotli(Path::new("br")));
    }
}
