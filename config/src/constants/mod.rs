//! # Configuration Constants
//!
//! Centralized constants for profile construction, extrusion and welding.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison and weld tolerances
//! - **Resolution**: Segment defaults and topological minimums
//! - **Extrusion**: Depth defaults

use thiserror::Error;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons inside the geometry kernel.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-12)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Default tolerance used when welding near-coincident vertices.
///
/// Two vertices whose every attribute component differs by less than this
/// value collapse into one.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_WELD_TOLERANCE;
/// assert_eq!(DEFAULT_WELD_TOLERANCE, 1e-4);
/// ```
pub const DEFAULT_WELD_TOLERANCE: f64 = 1e-4;

/// Smallest tolerance the welder accepts. Requested tolerances below this
/// are raised to it.
///
/// # Examples
/// ```
/// use config::constants::MIN_WELD_TOLERANCE;
/// assert_eq!(MIN_WELD_TOLERANCE, f64::EPSILON);
/// ```
pub const MIN_WELD_TOLERANCE: f64 = f64::EPSILON;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default angular segment count for disc and ring profiles.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SEGMENTS, MIN_RADIAL_SEGMENTS};
/// assert!(DEFAULT_SEGMENTS >= MIN_RADIAL_SEGMENTS);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Minimum angular segment count; fewer cannot enclose an area.
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Minimum segment count along an axis where one span suffices
/// (rectangle width/height, ring phi).
pub const MIN_GRID_SEGMENTS: u32 = 1;

// =============================================================================
// EXTRUSION CONSTANTS
// =============================================================================

/// Default extrusion depth.
pub const DEFAULT_DEPTH: f64 = 1.0;

/// Default depth rate. `1.0` means no taper: the solid keeps full depth at
/// every radial distance.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_DEPTH_RATE;
/// let scale = 1.0 - (1.0 - DEFAULT_DEPTH_RATE) * 0.5;
/// assert_eq!(scale, 1.0);
/// ```
pub const DEFAULT_DEPTH_RATE: f64 = 1.0;

// =============================================================================
// GEOMETRY CONFIG
// =============================================================================

/// Immutable snapshot of geometry settings that can be shared between
/// crates.
///
/// # Examples
/// ```
/// use config::constants::GeometryConfig;
/// let config = GeometryConfig::default();
/// assert!(config.weld_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Weld tolerance propagated into the vertex welder.
    pub weld_tolerance: f64,
    /// Default segment count for radial profiles.
    pub default_segments: u32,
}

impl GeometryConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and default segments.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let cfg = GeometryConfig::new(1.0e-5, 24).expect("valid config");
    /// assert_eq!(cfg.default_segments, 24);
    /// ```
    pub fn new(weld_tolerance: f64, default_segments: u32) -> Result<Self, ConfigError> {
        if weld_tolerance <= 0.0 || !weld_tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(weld_tolerance));
        }
        if default_segments < MIN_RADIAL_SEGMENTS {
            return Err(ConfigError::InvalidSegments(default_segments));
        }
        Ok(Self {
            weld_tolerance: weld_tolerance.max(MIN_WELD_TOLERANCE),
            default_segments,
        })
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            default_segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    #[error("tolerance must be positive and finite: {0}")]
    InvalidTolerance(f64),
    /// Raised when the requested segment count is too small to form a polygon.
    #[error("default_segments must be >= 3: {0}")]
    InvalidSegments(u32),
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
