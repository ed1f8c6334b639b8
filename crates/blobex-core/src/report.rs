//! Run summary output.
//!
//! The text form is the fixed banner operators read at the end of a run;
//! the JSON form carries the same counters for scripts.

use std::io::{self, Write};

use crate::types::RunCounters;

/// Summary output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// Human-readable banner
    #[default]
    Text,
    /// Pretty-printed JSON object
    Json,
}

/// Writes run summaries to any `Write` sink.
pub struct SummaryWriter<W: Write> {
    writer: W,
    format: SummaryFormat,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(writer: W, format: SummaryFormat) -> Self {
        Self { writer, format }
    }

    /// Write the summary for `counters`.
    pub fn write(&mut self, counters: &RunCounters) -> io::Result<()> {
        match self.format {
            SummaryFormat::Text => self.writer.write_all(render_text(counters).as_bytes())?,
            SummaryFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, counters)
                    .map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Render the banner summary.
pub fn render_text(counters: &RunCounters) -> String {
    let mut out = String::new();
    out.push_str("\n===== SUMMARY =====\n");
    out.push_str(&format!("Total images in DB:      {}\n", counters.total_in_db));
    out.push_str(&format!("Non-null images:         {}\n", counters.non_null_count));
    if counters.selected_count != counters.non_null_count {
        out.push_str(&format!("Selected (limit):        {}\n", counters.selected_count));
    }
    out.push_str(&format!(
        "Images already on disk:  {}\n",
        counters.existing_on_disk_count
    ));
    out.push_str(&format!("Corrupt images skipped:  {}\n", counters.corrupt_count));
    out.push_str(&format!(
        "Existing skipped:        {}\n",
        counters.skipped_existing_count
    ));
    out.push_str(&format!("New images exported:     {}\n", counters.exported_count));
    out.push_str("====================\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunCounters {
        RunCounters {
            total_in_db: 5,
            non_null_count: 4,
            selected_count: 4,
            existing_on_disk_count: 1,
            corrupt_count: 1,
            skipped_existing_count: 1,
            exported_count: 2,
            converted_count: 2,
        }
    }

    #[test]
    fn test_text_banner() {
        let text = render_text(&sample());
        let expected = "\n===== SUMMARY =====\n\
            Total images in DB:      5\n\
            Non-null images:         4\n\
            Images already on disk:  1\n\
            Corrupt images skipped:  1\n\
            Existing skipped:        1\n\
            New images exported:     2\n\
            ====================\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_banner_shows_limit_only_when_truncated() {
        let mut counters = sample();
        counters.selected_count = 2;
        assert!(render_text(&counters).contains("Selected (limit):        2"));
        assert!(!render_text(&sample()).contains("Selected"));
    }

    #[test]
    fn test_json_summary() {
        let mut writer = SummaryWriter::new(Vec::new(), SummaryFormat::Json);
        writer.write(&sample()).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();

        let parsed: RunCounters = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample());
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_text_writer_matches_render() {
        let mut writer = SummaryWriter::new(Vec::new(), SummaryFormat::Text);
        writer.write(&sample()).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), render_text(&sample()).into_bytes());
    }
}
