//! Error taxonomy shared by the lookup service, the ranker and the API layer.
//!
//! "No containing polygon" and "no nearby facilities" are valid results and are
//! never represented here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HazardError {
    /// Point outside WGS84 bounds or not a finite number
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinate(String),

    /// Malformed facility query (bad point, non-positive radius)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Spatial store or facility provider failed or timed out
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl HazardError {
    /// Caller-side mistakes; surfaced immediately and never worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCoordinate(_) | Self::InvalidQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(HazardError::InvalidCoordinate("lat=91".into()).is_client_error());
        assert!(HazardError::InvalidQuery("radius=0".into()).is_client_error());
        assert!(!HazardError::UpstreamUnavailable("timeout".into()).is_client_error());
    }

    #[test]
    fn test_display_messages() {
        let err = HazardError::UpstreamUnavailable("spatial store timed out".into());
        assert_eq!(err.to_string(), "Upstream unavailable: spatial store timed out");
    }
}
