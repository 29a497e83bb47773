//! # Error Types
//!
//! Error types for solid construction. All errors are explicit and provide
//! clear debugging information.
//!
//! ## Error Policy
//!
//! - NO fallback mechanisms when construction fails
//! - No partial mesh is ever returned alongside an error
//! - `TopologyMismatch` signals a bug in the builders, not bad user input

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building or validating a mesh.
///
/// ## Example
///
/// ```rust
/// use extrude_mesh::{build_cap, DiscParams, MeshError, ProfileParams};
///
/// let profile = ProfileParams::Disc(DiscParams { radius: -1.0, ..Default::default() });
/// match build_cap(&profile) {
///     Err(MeshError::InvalidParameter { message }) => assert!(message.contains("radius")),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A profile, depth or weld parameter is out of range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Which parameter and why
        message: String,
    },

    /// Internal invariant violation between cooperating builders.
    #[error("Topology mismatch: {message}")]
    TopologyMismatch {
        /// Description of the mismatch
        message: String,
    },

    /// Attribute or morph buffer has the wrong shape.
    #[error("Invalid attribute: {message}")]
    InvalidAttribute {
        /// Channel name and the offending sizes
        message: String,
    },

    /// Index buffer is not a triangle list or references a missing vertex.
    #[error("Invalid index: {message}")]
    InvalidIndex {
        /// Description of the bad index
        message: String,
    },

    /// Groups do not tile the index buffer.
    #[error("Invalid groups: {message}")]
    InvalidGroups {
        /// Description of the gap or overlap
        message: String,
    },
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a topology mismatch error.
    pub fn topology_mismatch(message: impl Into<String>) -> Self {
        Self::TopologyMismatch {
            message: message.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            message: message.into(),
        }
    }

    /// Creates an invalid index error.
    pub fn invalid_index(message: impl Into<String>) -> Self {
        Self::InvalidIndex {
            message: message.into(),
        }
    }

    /// Creates an invalid groups error.
    pub fn invalid_groups(message: impl Into<String>) -> Self {
        Self::InvalidGroups {
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for mesh construction.
pub type MeshResult<T> = Result<T, MeshError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_parameter("radius must be positive: -1");
        assert!(err.to_string().contains("Invalid parameter"));
        assert!(err.to_string().contains("radius"));

        let err = MeshError::topology_mismatch("front has 8 boundary vertices, back has 7");
        assert!(err.to_string().starts_with("Topology mismatch"));
    }

    /// Errors cross thread boundaries in batch builds.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
