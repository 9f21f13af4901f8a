//! Error types for stratus-core
//!
//! Provides error handling for:
//! - Trace/buffer validation
//! - Rendering
//! - Export configuration

use thiserror::Error;

/// Errors related to trace construction and buffer validation
#[derive(Error, Debug)]
pub enum TraceError {
    /// Position buffer length does not match the point count
    #[error("Position buffer has {actual} values, expected {expected} ({npoints} points x 3)")]
    PositionLength {
        npoints: usize,
        expected: usize,
        actual: usize,
    },

    /// Color buffer length does not match the point count
    #[error("Color buffer has {actual} values, expected {expected} ({npoints} points x {channels})")]
    ColorLength {
        npoints: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// Selection index outside the trace
    #[error("Selection index {index} out of range for {npoints} points")]
    IndexOutOfRange { index: usize, npoints: usize },
}

/// Errors related to rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// Viewport with non-positive dimensions
    #[error("Invalid viewport: {width}x{height} (dimensions must be positive)")]
    InvalidViewport { width: f32, height: f32 },
}

/// Errors related to export configuration
#[derive(Error, Debug)]
pub enum ExportError {
    /// Invalid dimensions
    #[error("Invalid dimensions: {width}x{height} (must be positive and within limits)")]
    InvalidDimensions { width: u32, height: u32 },

    /// Rendering failed during export
    #[error("Render failed during export: {0}")]
    Render(#[from] RenderError),
}

/// Result type alias for trace operations
pub type TraceResult<T> = Result<T, TraceError>;

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate export dimensions
    pub fn validate_dimensions(width: u32, height: u32) -> ExportResult<()> {
        const MAX_DIMENSION: u32 = 16384;
        const MIN_DIMENSION: u32 = 1;

        if width < MIN_DIMENSION
            || height < MIN_DIMENSION
            || width > MAX_DIMENSION
            || height > MAX_DIMENSION
        {
            return Err(ExportError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Validate viewport dimensions
    pub fn validate_viewport(width: f32, height: f32) -> RenderResult<()> {
        if !(width > 0.0) || !(height > 0.0) {
            return Err(RenderError::InvalidViewport { width, height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_error_display() {
        let err = TraceError::PositionLength {
            npoints: 2,
            expected: 6,
            actual: 5,
        };
        assert!(err.to_string().contains("expected 6"));
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::InvalidViewport {
            width: 0.0,
            height: 100.0,
        };
        assert!(err.to_string().contains("0x100"));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validation::validate_dimensions(1920, 1080).is_ok());
        assert!(validation::validate_dimensions(0, 100).is_err());
        assert!(validation::validate_dimensions(20000, 1000).is_err());
    }

    #[test]
    fn test_validate_viewport() {
        assert!(validation::validate_viewport(800.0, 600.0).is_ok());
        assert!(validation::validate_viewport(-1.0, 600.0).is_err());
        assert!(validation::validate_viewport(f32::NAN, 600.0).is_err());
    }
}
