//! Structured error types for biggrid.

/// Which layout axis a configuration problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// All errors that can occur while building or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// No mount target was supplied.
    #[error("Mount needs to be defined")]
    MissingMount,

    /// A mount selector did not match any element.
    #[error("Mount `{0}` could not be resolved")]
    UnresolvedMount(String),

    /// No dataset was supplied.
    #[error("Data needs to be defined")]
    MissingData,

    /// A row height or column width is negative or not finite.
    #[error("Invalid {axis} size {size} at index {index}")]
    InvalidSize { axis: Axis, index: usize, size: f64 },

    /// The visual surface rejected an operation.
    #[error("Surface error: {0}")]
    Surface(String),

    /// The cell renderer failed.
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Malformed configuration value.
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(GridError::MissingData.to_string(), "Data needs to be defined");
        let err = GridError::InvalidSize {
            axis: Axis::Column,
            index: 3,
            size: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid column size -1 at index 3");
    }
}
