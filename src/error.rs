use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
