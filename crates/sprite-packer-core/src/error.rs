use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    /// A rectangle was registered with a zero side. The entry is not stored.
    #[error("Invalid rectangle dimensions: {width}x{height} (both sides must be > 0)")]
    InvalidDimension { width: u32, height: u32 },
    /// Growth failed to admit a rectangle. Indicates an engine bug, not bad input.
    #[error("Packing exhausted after placing {placed} of {total} rectangles")]
    PackingExhausted { placed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, PackError>;
