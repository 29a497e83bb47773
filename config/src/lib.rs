//! # Config Crate
//!
//! Centralized configuration constants for the extrude-mesh pipeline.
//! Tolerances, segment minimums and construction defaults are defined here
//! so the geometry kernel never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_WELD_TOLERANCE, MIN_WELD_TOLERANCE};
//!
//! let requested: f64 = 0.0;
//! let tolerance = requested.max(MIN_WELD_TOLERANCE);
//! assert!(tolerance > 0.0);
//! assert!(DEFAULT_WELD_TOLERANCE > tolerance);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Pure**: No platform-specific values, no I/O

pub mod constants;
