//! The `OutputWriter` trait implemented by backend writers.

use crate::{MobilityTraceRow, OutputResult, SourceStatsRow};

/// Sink for trace samples and traffic statistics.
///
/// [`TraceRecorder`][crate::TraceRecorder] drives a writer and keeps the
/// first error it returns.
pub trait OutputWriter {
    /// Write a batch of mobility samples.
    fn write_trace(&mut self, rows: &[MobilityTraceRow]) -> OutputResult<()>;

    /// Write per-source traffic statistics.
    fn write_statistics(&mut self, rows: &[SourceStatsRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
