use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<CoreError> for String {
    fn from(err: CoreError) -> Self {
        err.to_string()
    }
}

/// Reject sigma values that would divide by zero or produce NaN weights.
pub fn ensure_positive(name: &'static str, value: f32) -> Result<f32, CoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::InvalidParameter { name, value })
    }
}
