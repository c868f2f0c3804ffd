//! Error types for hull_vision.
//!
//! The geometric kernels themselves never fail; every variant here is raised at
//! the boundary (batch construction, launch configuration, worker dispatch, I/O).

/// Result type alias
pub type Result<T> = std::result::Result<T, GeometryError>;

/// hull_vision error types
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// A batch must contain at least one point set.
    #[error("Batch contains no point sets")]
    EmptyBatch,

    /// Every point set must contain at least one point.
    #[error("Point sets must contain at least one point")]
    EmptyPointSet,

    /// All rows of a batch must share the same capacity.
    #[error("Ragged batch: set {set} has {found} points, expected {expected}")]
    RaggedBatch {
        set: usize,
        expected: usize,
        found: usize,
    },

    /// A flat coordinate buffer does not match the declared shape.
    #[error("Shape mismatch: {len} coordinates cannot form [{sets}][{capacity}][2]")]
    ShapeMismatch {
        len: usize,
        sets: usize,
        capacity: usize,
    },

    /// NaN or infinite coordinate.
    #[error("Non-finite coordinate at set {set}, point {point}")]
    NonFiniteCoordinate { set: usize, point: usize },

    /// Rotating calipers needs at least one hull vertex.
    #[error("Hull has no vertices")]
    EmptyHull,

    /// A set index past the end of the batch.
    #[error("Set {set} out of range for batch of {sets} sets")]
    SetOutOfRange { set: usize, sets: usize },

    /// Invalid device launch configuration.
    #[error("Invalid launch configuration: {0}")]
    InvalidLaunchConfig(String),

    /// A data-parallel worker did not complete; the whole batch is discarded.
    #[error("Worker failed: {0}")]
    WorkerFailed(String),

    /// Malformed point-set input text.
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio::task::JoinError> for GeometryError {
    fn from(e: tokio::task::JoinError) -> Self {
        GeometryError::WorkerFailed(e.to_string())
    }
}
