//! `TraceRecorder<W>` — samples engines and managers into an `OutputWriter`.

use wn_mobility::MobilityEngine;
use wn_traffic::TrafficStatistics;

use crate::row::{MobilityTraceRow, SourceStatsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Records mobility samples and traffic statistics to any [`OutputWriter`].
///
/// Sampling happens inside the host's event loop, so errors are stored
/// rather than returned.  Check [`take_error`][Self::take_error] once the
/// run is over.
pub struct TraceRecorder<W: OutputWriter> {
    writer:     W,
    trace_rows: usize,
    stats_rows: usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, trace_rows: 0, stats_rows: 0, last_error: None }
    }

    /// Advance `engine` to `t` (s) and write one trace row for it.
    pub fn sample(&mut self, engine: &mut MobilityEngine, t: f64) {
        let result = engine.kinematics(t).map_err(OutputError::from).and_then(|k| {
            let row = MobilityTraceRow::from_kinematics(engine.node(), &k, engine.is_paused());
            self.writer.write_trace(&[row])
        });
        if result.is_ok() {
            self.trace_rows += 1;
        }
        self.store_err(result);
    }

    /// Write one row per source of `stats`.
    pub fn record_statistics(&mut self, stats: &TrafficStatistics) {
        let rows = SourceStatsRow::from_statistics(stats);
        if rows.is_empty() {
            return;
        }
        let result = self.writer.write_statistics(&rows);
        if result.is_ok() {
            self.stats_rows += rows.len();
        }
        self.store_err(result);
    }

    /// Flush the writer.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    pub fn trace_rows(&self) -> usize {
        self.trace_rows
    }

    pub fn stats_rows(&self) -> usize {
        self.stats_rows
    }

    /// Take the stored error, if any.  Only the first one is kept.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
