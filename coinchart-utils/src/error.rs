use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TaError {
    #[error("window length must be a positive integer, got {length}")]
    InvalidWindow { length: usize },
}
