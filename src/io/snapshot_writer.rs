use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use anyhow::{Context, Result};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;
use serde::Serialize;
use crate::app::{AppState, SelectionScope};
use crate::model::HistorySummaryRecord;
use crate::state::SelectionState;
use super::page_loader::is_brotli;

/// Snapshot format version written in the header line.
pub const SNAPSHOT_VERSION: &str = "1.0";

enum SnapshotOutput {
    Plain(BufWriter<File>),
    Brotli(CompressorWriter<BufWriter<File>>),
}

impl Write for SnapshotOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SnapshotOutput::Plain(w) => w.write(buf),
            SnapshotOutput::Brotli(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SnapshotOutput::Plain(w) => w.flush(),
            SnapshotOutput::Brotli(w) => w.flush(),
        }
    }
}

/// Writes dashboard state snapshots as JSON Lines.
///
/// Each line carries a `"type"` tag: one `header`, any number of `history`
/// and `selection` lines, then a `footer` with line counts.
///
/// Call [`finish`](Self::finish) to complete the file. A writer that is only
/// dropped still flushes, but write errors at that point are lost.
pub struct SnapshotWriter {
    writer: SnapshotOutput,
    history_count: usize,
    selection_count: usize,
}

impl SnapshotWriter {
    /// Creates a new SnapshotWriter for the specified file path.
    ///
    /// Automatically enables Brotli compression if the file path ends with `.br`
    /// (e.g., `snapshot.jsonl.br`).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use railsim::SnapshotWriter;
    /// # fn main() -> anyhow::Result<()> {
    /// let mut writer = SnapshotWriter::new("snapshot.jsonl.br")?;
    /// writer.write_header()?;
    /// writer.write_footer()?;
    /// writer.finish()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let file = File::create(file_path)
            .with_context(|| format!("Failed to create file: {}", file_path.display()))?;

        let writer = if is_brotli(file_path) {
            let buf_writer = BufWriter::new(file);
            let params = BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            };
            SnapshotOutput::Brotli(CompressorWriter::with_params(buf_writer, 4096, &params))
        } else {
            SnapshotOutput::Plain(BufWriter::new(file))
        };

        Ok(SnapshotWriter {
            writer,
            history_count: 0,
            selection_count: 0,
        })
    }

    pub fn write_header(&mut self) -> Result<()> {
        let header = serde_json::json!({
            "type": "header",
            "version": SNAPSHOT_VERSION,
        });
        self.write_line(&header)
    }

    pub fn write_history(&mut self, records: &[HistorySummaryRecord]) -> Result<()> {
        for record in records {
            let line = serde_json::json!({
                "type": "history",
                "record": record,
            });
            self.write_line(&line)?;
            self.history_count += 1;
        }
        Ok(())
    }

    pub fn write_selection<D: Serialize>(&mut self, scope: SelectionScope, selection: &SelectionState<D>) -> Result<()> {
        let line = serde_json::json!({
            "type": "selection",
            "scope": scope,
            "state": selection,
        });
        self.write_line(&line)?;
        self.selection_count += 1;
        Ok(())
    }

    pub fn write_footer(&mut self) -> Result<()> {
        let footer = serde_json::json!({
            "type": "footer",
            "total_history": self.history_count,
            "total_selections": self.selection_count,
        });
        self.write_line(&footer)
    }

    /// Writes a complete snapshot of `state`: header, history, both
    /// selections and footer.
    pub fn write_app_state(&mut self, state: &AppState) -> Result<()> {
        self.write_header()?;
        self.write_history(state.history.records())?;
        self.write_selection(SelectionScope::Results, state.results.selection_state())?;
        self.write_selection(SelectionScope::Ui, state.ui.selection_state())?;
        self.write_footer()
    }

    /// Completes the snapshot: ends the Brotli stream if any, then flushes
    /// and syncs the file.
    pub fn finish(self) -> Result<()> {
        let mut buf_writer = match self.writer {
            SnapshotOutput::Plain(w) => w,
            SnapshotOutput::Brotli(w) => w.into_inner(),
        };
        buf_writer.flush().context("Failed to flush snapshot")?;
        buf_writer.get_ref().sync_all().context("Failed to sync snapshot")?;
        Ok(())
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .context("Failed to serialize to JSON")?;

        writeln!(self.writer, "{}", json)
            .context("Failed to write line")?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{load_snapshot_history, open_reader};
    use std::env;
    use std::io::BufRead;

    fn write_and_read(name: &str) -> Result<Vec<serde_json::Value>> {
        let path = env::temp_dir().join(name);
        let mut state = AppState::new();
        state.history.load_initial(vec![HistorySummaryRecord::new(3), HistorySummaryRecord::new(8)]);
        state.ui.selection_mut().select_station(Some(2));

        let mut writer = SnapshotWriter::new(&path)?;
        writer.write_app_state(&state)?;
        writer.finish()?;

        let mut lines = Vec::new();
        for line in open_reader(&path)?.lines() {
            lines.push(serde_json::from_str(&line?)?);
        }
        let _ = std::fs::remove_file(&path);
        Ok(lines)
    }

    #[test]
    fn test_snapshot_lines() -> Result<()> {
        let lines = write_and_read("railsim_snapshot_test.jsonl")?;

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["type"], "header");
        assert_eq!(lines[1]["record"]["SIMULATION_ID"], 8);
        assert_eq!(lines[2]["record"]["SIMULATION_ID"], 3);
        assert_eq!(lines[4]["scope"], "ui");
        assert_eq!(lines[4]["state"]["selectedStationId"], 2);
        assert_eq!(lines[5]["total_history"], 2);
        Ok(())
    }

    #[test]
    fn test_snapshot_brotli() -> Result<()> {
        let lines = write_and_read("railsim_snapshot_test.jsonl.br")?;
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5]["total_selections"], 2);
        Ok(())
    }

    #[test]
    fn test_finish_then_restore_history() -> Result<()> {
        let path = env::temp_dir().join("railsim_snapshot_restore_test.jsonl.br");
        let mut state = AppState::new();
        state.history.load_initial(vec![HistorySummaryRecord::new(4), HistorySummaryRecord::new(11)]);

        let mut writer = SnapshotWriter::new(&path)?;
        writer.write_app_state(&state)?;
        assert!(writer.finish().is_ok());

        let restored = load_snapshot_history(&path)?;
        assert_eq!(restored, state.history.records());

        let _ = std::fs::remove_file(&path);
        Ok(())
    }
}
