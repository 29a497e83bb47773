//! Disc and fan caps.

use super::{is_full_turn, row_len, sweep, Boundary, Cap, DiscParams, Facing, ProfileParams};
use crate::error::MeshResult;
use crate::mesh::VertexArena;
use glam::{DVec2, DVec3};

pub(super) fn build(params: &DiscParams) -> MeshResult<Cap> {
    let profile = ProfileParams::Disc(*params);
    let closed = is_full_turn(params.theta_length);
    let ring = row_len(params.segments, closed);
    let mut arena = VertexArena::new(profile.cap_vertex_count(), profile.cap_index_count());

    let center = arena.push_vertex(DVec3::ZERO, DVec3::Z, DVec2::splat(0.5));

    let step = sweep(params.theta_length) / f64::from(params.segments);
    let first = center + 1;
    for s in 0..ring {
        let theta = params.theta_start + step * s as f64;
        let dir = DVec2::from_angle(theta);
        let p = dir * params.radius;
        arena.push_vertex(p.extend(0.0), DVec3::Z, (dir + 1.0) / 2.0);
    }

    for s in 0..params.segments {
        let next = if closed { (s + 1) % params.segments } else { s + 1 };
        arena.push_triangle(center, first + s, first + next);
    }

    let boundary = Boundary {
        vertices: (first..first + ring as u32).collect(),
        closed,
        facing: Facing::Outward,
    };
    Ok(Cap {
        mesh: arena.finish(Vec::new())?,
        boundaries: vec![boundary],
    })
}
