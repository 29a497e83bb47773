//! # Profile Caps
//!
//! Triangulates a 2D profile into a flat cap on the `z = 0` plane.
//!
//! ## Profiles
//!
//! - **Disc**: center vertex plus one ring; an open fan when
//!   `theta_length < 2π`
//! - **Ring**: `phi_segments + 1` concentric rings between two radii
//! - **Rectangle**: centered planar grid
//!
//! Every cap has a constant `+Z` normal, CCW winding seen from `+Z`, and
//! reports its boundary loops so the skirt can connect front and back.
//!
//! ## Closed vs open
//!
//! A full turn (`theta_length >= 2π`) shares the seam vertex: the last
//! segment wraps to the first ring vertex. Anything shorter emits one extra
//! ring vertex to end the arc.

mod disc;
mod rectangle;
mod ring;


use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::{
    GeometryConfig, DEFAULT_SEGMENTS, EPSILON, MIN_GRID_SEGMENTS, MIN_RADIAL_SEGMENTS,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

// =============================================================================
// PARAMETERS
// =============================================================================

/// Disc (closed) or fan (open) profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscParams {
    /// Disc radius
    pub radius: f64,
    /// Number of angular segments
    pub segments: u32,
    /// Angle of the first ring vertex, radians
    pub theta_start: f64,
    /// Angular extent, radians; `>= 2π` closes the disc
    pub theta_length: f64,
}

impl Default for DiscParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: DEFAULT_SEGMENTS,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

impl DiscParams {
    /// Unit disc at the configured resolution.
    pub fn from_config(config: &GeometryConfig) -> Self {
        Self {
            segments: config.default_segments,
            ..Default::default()
        }
    }
}

/// Annulus profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingParams {
    /// Radius of the hole
    pub inner_radius: f64,
    /// Radius of the outer edge
    pub outer_radius: f64,
    /// Number of angular segments
    pub theta_segments: u32,
    /// Number of radial segments between the two radii
    pub phi_segments: u32,
    /// Angle of the first vertex of each ring, radians
    pub theta_start: f64,
    /// Angular extent, radians; `>= 2π` closes the ring
    pub theta_length: f64,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            inner_radius: 0.5,
            outer_radius: 1.0,
            theta_segments: DEFAULT_SEGMENTS,
            phi_segments: 1,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

impl RingParams {
    /// Default ring at the configured resolution.
    pub fn from_config(config: &GeometryConfig) -> Self {
        Self {
            theta_segments: config.default_segments,
            ..Default::default()
        }
    }
}

/// Centered rectangular grid profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleParams {
    /// Extent along X
    pub width: f64,
    /// Extent along Y
    pub height: f64,
    /// Grid columns
    pub width_segments: u32,
    /// Grid rows
    pub height_segments: u32,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// A profile, tagged by kind.
///
/// ## Example
///
/// ```rust
/// use extrude_mesh::{DiscParams, ProfileParams};
///
/// let params = DiscParams { radius: 1.0, segments: 8, ..Default::default() };
/// let profile = ProfileParams::Disc(params);
/// assert_eq!(profile.cap_vertex_count(), 9);
/// assert_eq!(profile.cap_index_count(), 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileParams {
    /// Disc or fan
    Disc(DiscParams),
    /// Ring or ring sector
    Ring(RingParams),
    /// Rectangular grid
    Rectangle(RectangleParams),
}

/// Kind of a profile, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// See [`ProfileParams::Disc`]
    Disc,
    /// See [`ProfileParams::Ring`]
    Ring,
    /// See [`ProfileParams::Rectangle`]
    Rectangle,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Disc => write!(f, "disc"),
            ProfileKind::Ring => write!(f, "ring"),
            ProfileKind::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// True when an angular extent covers a full turn.
#[inline]
pub(crate) fn is_full_turn(theta_length: f64) -> bool {
    theta_length >= TAU - EPSILON
}

/// Angle actually covered: a closed profile turns exactly once however
/// far past `2π` it was asked to go.
#[inline]
pub(crate) fn sweep(theta_length: f64) -> f64 {
    if is_full_turn(theta_length) {
        TAU
    } else {
        theta_length
    }
}

/// Vertices per angular row: the seam is shared when closed.
#[inline]
fn row_len(segments: u32, closed: bool) -> usize {
    if closed {
        segments as usize
    } else {
        segments as usize + 1
    }
}

impl ProfileParams {
    /// The profile's kind.
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileParams::Disc(_) => ProfileKind::Disc,
            ProfileParams::Ring(_) => ProfileKind::Ring,
            ProfileParams::Rectangle(_) => ProfileKind::Rectangle,
        }
    }

    /// Whether the boundary loops wrap around.
    pub fn is_closed(&self) -> bool {
        match self {
            ProfileParams::Disc(p) => is_full_turn(p.theta_length),
            ProfileParams::Ring(p) => is_full_turn(p.theta_length),
            ProfileParams::Rectangle(_) => true,
        }
    }

    /// Largest radial distance of any profile vertex; the depth taper
    /// reaches its final rate there.
    pub fn outer_radius(&self) -> f64 {
        match self {
            ProfileParams::Disc(p) => p.radius,
            ProfileParams::Ring(p) => p.outer_radius,
            ProfileParams::Rectangle(p) => p.width.hypot(p.height) / 2.0,
        }
    }

    /// Number of cap vertices.
    pub fn cap_vertex_count(&self) -> usize {
        let closed = self.is_closed();
        match self {
            ProfileParams::Disc(p) => 1 + row_len(p.segments, closed),
            ProfileParams::Ring(p) => {
                (p.phi_segments as usize + 1) * row_len(p.theta_segments, closed)
            }
            ProfileParams::Rectangle(p) => {
                (p.width_segments as usize + 1) * (p.height_segments as usize + 1)
            }
        }
    }

    /// Number of cap indices (3 per triangle).
    pub fn cap_index_count(&self) -> usize {
        match self {
            ProfileParams::Disc(p) => 3 * p.segments as usize,
            ProfileParams::Ring(p) => 6 * p.theta_segments as usize * p.phi_segments as usize,
            ProfileParams::Rectangle(p) => {
                6 * p.width_segments as usize * p.height_segments as usize
            }
        }
    }

    /// Total vertices across all boundary loops.
    pub fn boundary_vertex_count(&self) -> usize {
        let closed = self.is_closed();
        match self {
            ProfileParams::Disc(p) => row_len(p.segments, closed),
            ProfileParams::Ring(p) => 2 * row_len(p.theta_segments, closed),
            ProfileParams::Rectangle(p) => 2 * (p.width_segments + p.height_segments) as usize,
        }
    }

    /// Total edges across all boundary loops; each becomes one skirt quad.
    pub fn boundary_edge_count(&self) -> usize {
        match self {
            ProfileParams::Disc(p) => p.segments as usize,
            ProfileParams::Ring(p) => 2 * p.theta_segments as usize,
            ProfileParams::Rectangle(_) => self.boundary_vertex_count(),
        }
    }

    /// Rejects parameters that cannot produce a cap.
    pub fn validate(&self) -> MeshResult<()> {
        match self {
            ProfileParams::Disc(p) => {
                require_positive("radius", p.radius)?;
                require_segments("segments", p.segments, MIN_RADIAL_SEGMENTS)?;
                require_angle(p.theta_start, p.theta_length)
            }
            ProfileParams::Ring(p) => {
                require_positive("inner_radius", p.inner_radius)?;
                require_positive("outer_radius", p.outer_radius)?;
                if p.inner_radius >= p.outer_radius {
                    return Err(MeshError::invalid_parameter(format!(
                        "inner_radius {} must be smaller than outer_radius {}",
                        p.inner_radius, p.outer_radius
                    )));
                }
                require_segments("theta_segments", p.theta_segments, MIN_RADIAL_SEGMENTS)?;
                require_segments("phi_segments", p.phi_segments, MIN_GRID_SEGMENTS)?;
                require_angle(p.theta_start, p.theta_length)
            }
            ProfileParams::Rectangle(p) => {
                require_positive("width", p.width)?;
                require_positive("height", p.height)?;
                require_segments("width_segments", p.width_segments, MIN_GRID_SEGMENTS)?;
                require_segments("height_segments", p.height_segments, MIN_GRID_SEGMENTS)
            }
        }
    }
}

fn require_positive(name: &str, value: f64) -> MeshResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::invalid_parameter(format!(
            "{name} must be positive and finite: {value}"
        )))
    }
}

fn require_segments(name: &str, value: u32, min: u32) -> MeshResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(MeshError::invalid_parameter(format!(
            "{name} must be at least {min}: {value}"
        )))
    }
}

fn require_angle(theta_start: f64, theta_length: f64) -> MeshResult<()> {
    if !theta_start.is_finite() {
        return Err(MeshError::invalid_parameter(format!(
            "theta_start must be finite: {theta_start}"
        )));
    }
    require_positive("theta_length", theta_length)
}

// =============================================================================
// CAP OUTPUT
// =============================================================================

/// Which side of a boundary loop the solid lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Outer edge: side normals point away from the axis.
    Outward,
    /// Hole edge: side normals point toward the axis.
    Inward,
}

/// An ordered loop of cap vertex indices, CCW seen from `+Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Cap vertex indices in loop order
    pub vertices: Vec<u32>,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
    /// Orientation of the side wall built on this loop
    pub facing: Facing,
}

/// Boundary positions read back from a cap mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRing {
    /// Positions in loop order
    pub positions: Vec<DVec3>,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
    /// Orientation of the side wall built on this loop
    pub facing: Facing,
}

impl Boundary {
    /// Reads this loop's positions from `cap`. Mirrored caps keep vertex
    /// order, so the same loop reads the back cap too.
    pub fn ring(&self, cap: &Mesh) -> BoundaryRing {
        BoundaryRing {
            positions: self.vertices.iter().map(|&v| cap.position(v as usize)).collect(),
            closed: self.closed,
            facing: self.facing,
        }
    }

    /// Number of edges along the loop.
    pub fn edge_count(&self) -> usize {
        match (self.closed, self.vertices.len()) {
            (_, 0) => 0,
            (true, n) => n,
            (false, n) => n - 1,
        }
    }
}

/// A flat cap and its boundary loops.
#[derive(Debug, Clone, PartialEq)]
pub struct Cap {
    /// Cap geometry on the `z = 0` plane
    pub mesh: Mesh,
    /// Outer loop first, then holes
    pub boundaries: Vec<Boundary>,
}

/// Builds the flat cap for `profile`.
///
/// # Errors
///
/// `InvalidParameter` for non-positive sizes or too few segments.
///
/// # Example
///
/// ```rust
/// use extrude_mesh::{build_cap, DiscParams, ProfileParams};
///
/// let profile = ProfileParams::Disc(DiscParams { segments: 8, ..Default::default() });
/// let cap = build_cap(&profile).unwrap();
/// assert_eq!(cap.mesh.vertex_count(), 9);
/// assert_eq!(cap.mesh.index().len(), 24);
/// ```
pub fn build_cap(profile: &ProfileParams) -> MeshResult<Cap> {
    profile.validate()?;

    let cap = match profile {
        ProfileParams::Disc(p) => disc::build(p)?,
        ProfileParams::Ring(p) => ring::build(p)?,
        ProfileParams::Rectangle(p) => rectangle::build(p)?,
    };

    log::trace!(
        "{} cap: {} vertices, {} triangles, {} boundary loops",
        profile.kind(),
        cap.mesh.vertex_count(),
        cap.mesh.triangle_count(),
        cap.boundaries.len()
    );
    Ok(cap)
}
