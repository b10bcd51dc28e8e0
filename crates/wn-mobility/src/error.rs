use thiserror::Error;
use wn_core::NodeId;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("mobility configuration error: {0}")]
    Config(String),

    #[error("{node}: time {requested} s precedes last update at {last_update} s")]
    TimeReversal {
        node:        NodeId,
        requested:   f64,
        last_update: f64,
    },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
