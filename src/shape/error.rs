//! Error types for shape generation.

/// Errors that can occur while generating or post-processing a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// A parameter violates a generator precondition.
    InvalidArgument {
        /// Which precondition failed.
        what: &'static str,
    },
    /// The requested mesh would exceed the maximum mesh size.
    TooLarge {
        /// Computed vertex count.
        vertices: u64,
        /// Computed index count.
        indices: u64,
    },
    /// The operation requires `PrimitiveMode::Triangles`.
    UnsupportedMode,
    /// A required attribute array is not populated.
    MissingAttributes(&'static str),
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { what } => write!(f, "invalid argument: {what}"),
            Self::TooLarge { vertices, indices } => {
                write!(
                    f,
                    "mesh too large: {vertices} vertices / {indices} indices exceed the maximum"
                )
            }
            Self::UnsupportedMode => write!(f, "operation requires triangle-list topology"),
            Self::MissingAttributes(name) => write!(f, "shape has no {name}"),
        }
    }
}

impl std::error::Error for ShapeError {}
