//! Error types for rendering.

use osmnx_mapping_core::MappingError;
use thiserror::Error;

/// Errors raised while validating a render request or producing a figure.
#[derive(Error, Debug)]
pub enum VizError {
    /// More than one result column was supplied
    #[error("StaticVisualiser only supports a single result column (got {0})")]
    MultipleResultColumns(usize),

    /// An empty collection of result columns was supplied
    #[error("a result column is required")]
    NoResultColumn,

    /// Target selector outside the accepted set
    #[error("target must be 'nodes', 'edges', or 'both' (got '{0}')")]
    InvalidTarget(String),

    #[error("unknown colormap '{0}'")]
    UnknownColormap(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Option value outside its documented domain
    #[error("invalid render option: {0}")]
    InvalidOption(String),

    /// Attribute table or graph lookup failed
    #[error(transparent)]
    Data(#[from] MappingError),

    /// SVG parsing or rasterization failed
    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("unsupported output format '{0}' (expected svg or png)")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VizResult<T> = Result<T, VizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_names_accepted_values() {
        let msg = VizError::InvalidTarget("roads".into()).to_string();
        assert!(msg.contains("'nodes'"));
        assert!(msg.contains("'edges'"));
        assert!(msg.contains("'both'"));
    }

    #[test]
    fn mapping_errors_pass_through() {
        let err: VizError = MappingError::Geometry("bad".into()).into();
        assert_eq!(err.to_string(), "Geometry error: bad");
    }
}
