use thiserror::Error;

/// Errors surfaced by engine construction and configuration.
///
/// Runtime conditions (missing edge endpoints, out-of-range zoom, pointer
/// misses) are not errors and never show up here.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The canvas element or its 2D context could not be obtained.
	#[error("drawing surface unavailable: {0}")]
	SurfaceUnavailable(String),

	#[error("invalid engine configuration: {0}")]
	InvalidConfig(String),

	#[error("failed to parse configuration: {0}")]
	Config(#[from] serde_json::Error),

	#[error("animation frame request failed: {0}")]
	FrameRequest(String),
}
