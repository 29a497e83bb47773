//! # Side Skirt
//!
//! Connects the front cap's boundary loops to the back cap's with a
//! triangulated side wall.
//!
//! ## Layout
//!
//! Each boundary vertex contributes two skirt vertices, front then back.
//! Skirt vertices are not shared with the caps, so side normals stay radial
//! and the cap/skirt seam renders as a hard edge.
//!
//! ## Depth taper
//!
//! With `depth_rate != 1` the half depth changes linearly with radial
//! distance, reaching `depth_rate * depth / 2` at the outer radius (thinner
//! rim below 1, flared rim above). The same
//! offset is used for caps and skirt so the solid stays watertight.

use crate::error::{MeshError, MeshResult};
use crate::mesh::{AttributeBuffer, AttributeName, Attributes, Mesh, VertexArena};
use crate::profile::{BoundaryRing, Facing};
use config::constants::approx_zero;
use glam::DVec2;
use std::f64::consts::{PI, TAU};

// =============================================================================
// DEPTH PROFILE
// =============================================================================

/// Extrusion depth with optional radial taper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthProfile {
    depth: f64,
    depth_rate: f64,
    outer_radius: f64,
}

impl DepthProfile {
    /// Validates and creates a depth profile.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `depth` or `outer_radius` is not positive, or
    /// `depth_rate` is negative or not finite. Rates above 1 flare the solid
    /// outwards.
    pub fn new(depth: f64, depth_rate: f64, outer_radius: f64) -> MeshResult<Self> {
        if !(depth.is_finite() && depth > 0.0) {
            return Err(MeshError::invalid_parameter(format!(
                "depth must be positive and finite: {depth}"
            )));
        }
        if !(depth_rate.is_finite() && depth_rate >= 0.0) {
            return Err(MeshError::invalid_parameter(format!(
                "depth_rate must be finite and non-negative: {depth_rate}"
            )));
        }
        if !(outer_radius.is_finite() && outer_radius > 0.0) {
            return Err(MeshError::invalid_parameter(format!(
                "outer_radius must be positive and finite: {outer_radius}"
            )));
        }
        Ok(Self {
            depth,
            depth_rate,
            outer_radius,
        })
    }

    /// Full depth at the axis.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Fraction of the depth kept at the outer radius.
    #[inline]
    pub fn depth_rate(&self) -> f64 {
        self.depth_rate
    }

    /// Whether the depth varies with radial distance.
    #[inline]
    pub fn is_tapered(&self) -> bool {
        !approx_zero(1.0 - self.depth_rate)
    }

    /// Distance from the `z = 0` plane to either face at radial distance `r`.
    pub fn half_depth_at(&self, r: f64) -> f64 {
        let scale = 1.0 - (1.0 - self.depth_rate) * (r / self.outer_radius);
        self.depth / 2.0 * scale
    }

    /// Lifts a flat cap onto the front face, `z = +half_depth_at(r)`.
    pub fn extrude_front(&self, cap: &Mesh) -> MeshResult<Mesh> {
        let Some(position) = cap.attribute(&AttributeName::Position) else {
            return Err(MeshError::invalid_attribute("cap has no position channel"));
        };
        let Some(values) = position.as_f32() else {
            return Err(MeshError::invalid_attribute("position channel must be float32"));
        };

        let mut lifted = values.to_vec();
        for p in lifted.chunks_exact_mut(3) {
            let r = DVec2::new(f64::from(p[0]), f64::from(p[1])).length();
            p[2] = self.half_depth_at(r) as f32;
        }

        let mut attributes: Attributes = cap.attributes().clone();
        attributes.insert(AttributeName::Position, AttributeBuffer::float32(lifted, 3)?);
        Mesh::new(attributes, cap.index().to_vec(), cap.groups().to_vec())
    }
}

// =============================================================================
// SKIRT
// =============================================================================

/// Builds the side wall between matching front and back boundary loops.
///
/// # Errors
///
/// `TopologyMismatch` if the loops differ in number, length or closure;
/// that means the caps were not mirrors of each other.
///
/// # Example
///
/// ```rust
/// use extrude_mesh::{build_cap, build_skirt, DiscParams, ProfileParams};
///
/// let profile = ProfileParams::Disc(DiscParams { segments: 8, ..Default::default() });
/// let cap = build_cap(&profile).unwrap();
/// let ring = cap.boundaries[0].ring(&cap.mesh);
/// let mut back = ring.clone();
/// back.positions.iter_mut().for_each(|p| p.z = -1.0);
/// let skirt = build_skirt(&[ring], &[back]).unwrap();
/// assert_eq!(skirt.vertex_count(), 16);
/// assert_eq!(skirt.index().len(), 48);
/// ```
pub fn build_skirt(front: &[BoundaryRing], back: &[BoundaryRing]) -> MeshResult<Mesh> {
    if front.len() != back.len() {
        return Err(MeshError::topology_mismatch(format!(
            "front has {} boundary loops, back has {}",
            front.len(),
            back.len()
        )));
    }
    for (i, (f, b)) in front.iter().zip(back).enumerate() {
        if f.positions.len() != b.positions.len() {
            return Err(MeshError::topology_mismatch(format!(
                "loop {i}: front has {} boundary vertices, back has {}",
                f.positions.len(),
                b.positions.len()
            )));
        }
        if f.closed != b.closed || f.facing != b.facing {
            return Err(MeshError::topology_mismatch(format!(
                "loop {i}: front and back disagree on closure or facing"
            )));
        }
    }

    let vertex_count: usize = front.iter().map(|f| 2 * f.positions.len()).sum();
    let index_count: usize = front.iter().map(|f| 6 * edge_count(f)).sum();
    let mut arena = VertexArena::new(vertex_count, index_count);

    for (f, b) in front.iter().zip(back) {
        wall(&mut arena, f, b);
    }

    let skirt = arena.finish(Vec::new())?;
    log::trace!(
        "skirt: {} loops, {} vertices, {} triangles",
        front.len(),
        skirt.vertex_count(),
        skirt.triangle_count()
    );
    Ok(skirt)
}

fn edge_count(ring: &BoundaryRing) -> usize {
    match (ring.closed, ring.positions.len()) {
        (_, 0) => 0,
        (true, n) => n,
        (false, n) => n - 1,
    }
}

/// Emits one loop's wall into `arena`.
fn wall(arena: &mut VertexArena, front: &BoundaryRing, back: &BoundaryRing) {
    let base = arena.vertex_count() as u32;
    let n = front.positions.len();

    for (f, b) in front.positions.iter().zip(&back.positions) {
        let radial = f.truncate().normalize_or_zero();
        let normal = match front.facing {
            Facing::Outward => radial,
            Facing::Inward => -radial,
        }
        .extend(0.0);
        let u = f.y.atan2(f.x).rem_euclid(TAU) / PI;
        arena.push_vertex(*f, normal, DVec2::new(u, 0.0));
        arena.push_vertex(*b, normal, DVec2::new(u, 1.0));
    }

    for i in 0..edge_count(front) {
        let j = (i + 1) % n;
        let (fi, bi) = (base + 2 * i as u32, base + 2 * i as u32 + 1);
        let (fj, bj) = (base + 2 * j as u32, base + 2 * j as u32 + 1);
        match front.facing {
            Facing::Outward => {
                arena.push_triangle(fi, bi, fj);
                arena.push_triangle(fj, bi, bj);
            }
            Facing::Inward => {
                arena.push_triangle(fi, fj, bi);
                arena.push_triangle(fj, bj, bi);
            }
        }
    }
}
