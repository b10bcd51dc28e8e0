use thiserror::Error;
use wn_core::SourceId;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("{0} is not registered with this traffic manager")]
    UnknownSource(SourceId),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
