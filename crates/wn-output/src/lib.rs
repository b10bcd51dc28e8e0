//! `wn-output` — CSV export for the rust_wn framework.
//!
//! | File                 | Row type           | Contents                          |
//! |----------------------|--------------------|-----------------------------------|
//! | `mobility_trace.csv` | `MobilityTraceRow` | position/velocity samples         |
//! | `traffic_stats.csv`  | `SourceStatsRow`   | per-source counters at run end    |
//!
//! [`CsvWriter`] implements [`OutputWriter`]; [`TraceRecorder`] drives any
//! writer from inside an event loop.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wn_output::{CsvWriter, TraceRecorder};
//!
//! let mut rec = TraceRecorder::new(CsvWriter::new(Path::new("./output"))?);
//! rec.sample(&mut engine, t);
//! rec.record_statistics(&manager.statistics());
//! rec.finish();
//! if let Some(e) = rec.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod recorder;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use recorder::TraceRecorder;
pub use row::{MobilityTraceRow, SourceStatsRow};
pub use writer::OutputWriter;
