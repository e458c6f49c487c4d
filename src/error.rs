use thiserror::Error;

/// Errors produced while building coordinate sets or matching them.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude or longitude is outside the valid range.
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate { lat: f64, lon: f64, reason: String },

    /// A token could not be read as a coordinate component.
    #[error("malformed input {input:?}: {reason}")]
    MalformedInput { input: String, reason: String },

    /// Matching was requested against a target set with no points.
    #[error("target set is empty, no nearest point exists")]
    EmptyTargetSet,

    /// A selected CSV column is not present in the header row.
    #[error("column {0:?} not found in CSV header")]
    MissingColumn(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeoError {
    pub(crate) fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        GeoError::MalformedInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
