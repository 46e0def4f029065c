use super::params::SpringFamily;

/// Failures surfaced to the caller of a generator.
///
/// Missing inputs never show up here: the normalizer resolves them. Near-zero
/// vectors never show up either: they take deterministic fallback directions.
#[derive(Debug, thiserror::Error)]
pub enum SpringError {
    #[error("{family} spring: degenerate geometry in `{field}`: {reason}")]
    DegenerateGeometry {
        family: SpringFamily,
        field: &'static str,
        reason: String,
    },
    #[error("invalid generation option `{field}`: {reason}")]
    InvalidOptions { field: &'static str, reason: String },
    #[error("invalid spring design: {0}")]
    InvalidDesign(String),
}

impl SpringError {
    pub(crate) fn degenerate(
        family: SpringFamily,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::DegenerateGeometry {
            family,
            field,
            reason: reason.into(),
        }
    }

    /// Field named by a geometry or option failure.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::DegenerateGeometry { field, .. } | Self::InvalidOptions { field, .. } => {
                Some(*field)
            }
            Self::InvalidDesign(_) => None,
        }
    }
}

impl From<serde_json::Error> for SpringError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDesign(err.to_string())
    }
}
