use thiserror::Error;

/// Fatal pipeline failures.
///
/// Per-feature problems (unsupported geometry, a boolean op that fails on
/// one part) never surface here; they degrade to a skip counter or a
/// documented fallback inside the stage that hit them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("input collection has no features")]
    EmptyInput,
    #[error("landmask feature has no geometry")]
    MissingBoundary,
    #[error("failed to convert the landmask geometry to clipping format")]
    BoundaryConversion,
    #[error("no landmass geometry was captured for the configured regions")]
    NoGeometry,
}
