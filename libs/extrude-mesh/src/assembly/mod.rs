//! # Solid Assembly
//!
//! Wires the pipeline into one mesh:
//!
//! ```text
//! build_cap → extrude_front → mirror_cap → build_skirt → assign_groups
//! ```
//!
//! Vertex buffers are laid out front, back, side. Groups follow the same
//! order, so group 2 is always the side surface.

use crate::error::MeshResult;
use crate::groups::{assign_groups, Surface};
use crate::mesh::{AttributeBuffer, AttributeName, Attributes, Mesh};
use crate::mirror::{mirror_cap, MirrorAxis};
use crate::profile::{build_cap, DiscParams, ProfileKind, ProfileParams};
use crate::skirt::{build_skirt, DepthProfile};
use crate::weld::{merge_vertices, WeldOptions};
use config::constants::{GeometryConfig, DEFAULT_DEPTH, DEFAULT_DEPTH_RATE};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything needed to build one solid.
///
/// ## Example
///
/// ```rust
/// use extrude_mesh::{build_solid, SolidParams};
///
/// let params: SolidParams = serde_json::from_str(
///     r#"{ "profile": { "kind": "disc", "segments": 8 }, "depth": 2.0 }"#,
/// ).unwrap();
/// let solid = build_solid(&params).unwrap();
/// assert_eq!(solid.index().len(), 96);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidParams {
    /// Cross-section profile
    pub profile: ProfileParams,
    /// Extrusion depth along `Z`, centered on `z = 0`
    pub depth: f64,
    /// Depth at the outer radius as a fraction of the axis depth (`>= 0`)
    pub depth_rate: f64,
    /// Weld the result when set
    pub weld: Option<WeldOptions>,
}

impl Default for SolidParams {
    fn default() -> Self {
        Self {
            profile: ProfileParams::Disc(DiscParams::default()),
            depth: DEFAULT_DEPTH,
            depth_rate: DEFAULT_DEPTH_RATE,
            weld: None,
        }
    }
}

impl SolidParams {
    /// A straight extrusion of `profile`, welded with the configured tolerance.
    pub fn with_config(profile: ProfileParams, config: &GeometryConfig) -> Self {
        Self {
            profile,
            weld: Some(WeldOptions::new(config.weld_tolerance)),
            ..Default::default()
        }
    }
}

/// Builds the extruded solid for `profile`.
///
/// # Errors
///
/// `InvalidParameter` for bad profile parameters, `depth <= 0` or a
/// negative or non-finite `depth_rate`.
///
/// # Example
///
/// ```rust
/// use extrude_mesh::{build, DiscParams, Group, ProfileParams};
///
/// let profile = ProfileParams::Disc(DiscParams { segments: 8, ..Default::default() });
/// let solid = build(&profile, 1.0, 1.0).unwrap();
/// assert_eq!(solid.index().len(), 96);
/// assert_eq!(solid.groups()[2], Group::new(48, 48, 2));
/// ```
pub fn build(profile: &ProfileParams, depth: f64, depth_rate: f64) -> MeshResult<Mesh> {
    let cap = build_cap(profile)?;
    let depth = DepthProfile::new(depth, depth_rate, profile.outer_radius())?;

    let front = depth.extrude_front(&cap.mesh)?;
    let back = mirror_cap(&front, MirrorAxis::Z)?;

    let front_rings: Vec<_> = cap.boundaries.iter().map(|b| b.ring(&front)).collect();
    let back_rings: Vec<_> = cap.boundaries.iter().map(|b| b.ring(&back)).collect();
    let side = build_skirt(&front_rings, &back_rings)?;

    let grouped = assign_groups(
        Surface {
            indices: front.index(),
            vertex_count: front.vertex_count(),
        },
        Surface {
            indices: back.index(),
            vertex_count: back.vertex_count(),
        },
        Surface {
            indices: side.index(),
            vertex_count: side.vertex_count(),
        },
    );

    let surfaces = [&front, &back, &side];
    let mut attributes = Attributes::new();
    for (name, item_size) in [
        (AttributeName::Position, 3),
        (AttributeName::Normal, 3),
        (AttributeName::Uv, 2),
    ] {
        attributes.insert(name.clone(), concat_channel(&surfaces, &name, item_size)?);
    }

    let solid = Mesh::new(attributes, grouped.index, grouped.groups)?;
    log::debug!(
        "{} solid: {} vertices, {} triangles (depth {}, rate {})",
        profile.kind(),
        solid.vertex_count(),
        solid.triangle_count(),
        depth.depth(),
        depth.depth_rate()
    );
    Ok(solid)
}

/// Joins one float channel of every surface, in order.
fn concat_channel(
    surfaces: &[&Mesh],
    name: &AttributeName,
    item_size: usize,
) -> MeshResult<AttributeBuffer> {
    let total: usize = surfaces.iter().map(|m| m.vertex_count() * item_size).sum();
    let mut values = Vec::with_capacity(total);
    for mesh in surfaces {
        let channel = mesh
            .attribute(name)
            .and_then(AttributeBuffer::as_f32)
            .unwrap_or(&[]);
        values.extend_from_slice(channel);
    }
    AttributeBuffer::float32(values, item_size)
}

/// Builds a solid and welds it if requested.
///
/// Rectangle solids skip the weld; their grids are emitted without
/// duplicate vertices.
pub fn build_solid(params: &SolidParams) -> MeshResult<Mesh> {
    let solid = build(&params.profile, params.depth, params.depth_rate)?;
    match params.weld {
        Some(options) if params.profile.kind() != ProfileKind::Rectangle => {
            Ok(merge_vertices(&solid, &options))
        }
        _ => Ok(solid),
    }
}

/// Builds independent solids in parallel. Results keep the input order.
pub fn build_batch(params: &[SolidParams]) -> Vec<MeshResult<Mesh>> {
    params.par_iter().map(build_solid).collect()
}
