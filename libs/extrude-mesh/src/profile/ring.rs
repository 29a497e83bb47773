//! Ring (annulus) caps.

use super::{is_full_turn, row_len, sweep, Boundary, Cap, Facing, ProfileParams, RingParams};
use crate::error::MeshResult;
use crate::mesh::VertexArena;
use glam::{DVec2, DVec3};

pub(super) fn build(params: &RingParams) -> MeshResult<Cap> {
    let profile = ProfileParams::Ring(*params);
    let closed = is_full_turn(params.theta_length);
    let row = row_len(params.theta_segments, closed) as u32;
    let mut arena = VertexArena::new(profile.cap_vertex_count(), profile.cap_index_count());

    let theta_step = sweep(params.theta_length) / f64::from(params.theta_segments);
    let radius_step = (params.outer_radius - params.inner_radius) / f64::from(params.phi_segments);

    for j in 0..=params.phi_segments {
        let radius = params.inner_radius + radius_step * f64::from(j);
        for i in 0..row {
            let theta = params.theta_start + theta_step * f64::from(i);
            let p = DVec2::from_angle(theta) * radius;
            let uv = (p / params.outer_radius + 1.0) / 2.0;
            arena.push_vertex(p.extend(0.0), DVec3::Z, uv);
        }
    }

    let next = |i: u32| if closed { (i + 1) % row } else { i + 1 };
    for j in 0..params.phi_segments {
        for i in 0..params.theta_segments {
            // a-b on the inner row, d-c on the outer row
            let a = j * row + i;
            let b = j * row + next(i);
            let c = (j + 1) * row + next(i);
            let d = (j + 1) * row + i;
            arena.push_triangle(a, d, b);
            arena.push_triangle(b, d, c);
        }
    }

    let outer_start = params.phi_segments * row;
    let boundaries = vec![
        Boundary {
            vertices: (outer_start..outer_start + row).collect(),
            closed,
            facing: Facing::Outward,
        },
        Boundary {
            vertices: (0..row).collect(),
            closed,
            facing: Facing::Inward,
        },
    ];
    Ok(Cap {
        mesh: arena.finish(Vec::new())?,
        boundaries,
    })
}
