use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("Invalid bin capacity: {capacity} (must be greater than zero)")]
    InvalidCapacity { capacity: u32 },
    #[error("Item #{index} has size {size}, which exceeds the bin capacity {capacity}")]
    OversizedItem { index: usize, size: u32, capacity: u32 },
    #[error("Item #{index} has size 0; item sizes must be positive")]
    ZeroSizedItem { index: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, PackError>;
