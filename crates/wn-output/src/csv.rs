//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `mobility_trace.csv`
//! - `traffic_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MobilityTraceRow, OutputResult, SourceStatsRow};

pub const TRACE_FILE: &str = "mobility_trace.csv";
pub const STATS_FILE: &str = "traffic_stats.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trace:    Writer<File>,
    stats:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join(TRACE_FILE))?;
        trace.write_record(["node", "time_s", "x", "y", "z", "vx", "vy", "vz", "paused"])?;

        let mut stats = Writer::from_path(dir.join(STATS_FILE))?;
        stats.write_record([
            "node",
            "source",
            "transmitted_packets",
            "transmitted_bytes",
            "queue_overflow",
            "next_invoke_ns",
        ])?;

        Ok(Self { trace, stats, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trace(&mut self, rows: &[MobilityTraceRow]) -> OutputResult<()> {
        for row in rows {
            self.trace.write_record(&[
                row.node.to_string(),
                format!("{:.9}", row.time),
                format!("{:.6}", row.x),
                format!("{:.6}", row.y),
                format!("{:.6}", row.z),
                format!("{:.6}", row.vx),
                format!("{:.6}", row.vy),
                format!("{:.6}", row.vz),
                (row.paused as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_statistics(&mut self, rows: &[SourceStatsRow]) -> OutputResult<()> {
        for row in rows {
            self.stats.write_record(&[
                row.node.to_string(),
                row.source.to_string(),
                row.transmitted_packets.to_string(),
                row.transmitted_bytes.to_string(),
                row.queue_overflow.to_string(),
                row.next_invoke_ns.map(|ns| ns.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.stats.flush()?;
        Ok(())
    }
}
