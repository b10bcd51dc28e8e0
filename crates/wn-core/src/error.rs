//! Framework error type.
//!
//! Sub-crates define their own error enums (`MobilityError`, `TrafficError`,
//! `OutputError`); `WnError` covers failures of the core primitives
//! themselves (time conversion, node lookup).

use thiserror::Error;

use crate::NodeId;

/// The top-level error type for `wn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WnError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("time {0} ns cannot be represented")]
    TimeOverflow(u128),
}

/// Shorthand result type for all `wn-*` crates.
pub type WnResult<T> = Result<T, WnError>;
