//! Protocol error types

use thiserror::Error;

/// Errors that can occur when constructing protocol types
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Logical payload length points past the backing buffer
    #[error("payload length {len} exceeds buffer of {capacity} bytes")]
    LengthOutOfBounds {
        /// Claimed logical length
        len: usize,
        /// Actual buffer length
        capacity: usize,
    },
}

impl ProtocolError {
    /// Create a LengthOutOfBounds error
    pub fn length_out_of_bounds(len: usize, capacity: usize) -> Self {
        Self::LengthOutOfBounds { len, capacity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_out_of_bounds_display() {
        let err = ProtocolError::length_out_of_bounds(8, 3);
        assert!(err.to_string().contains("length 8"));
        assert!(err.to_string().contains("3 bytes"));
    }
}
