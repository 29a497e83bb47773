//! Rectangular grid caps.

use super::{Boundary, Cap, Facing, ProfileParams, RectangleParams};
use crate::error::MeshResult;
use crate::mesh::VertexArena;
use glam::{DVec2, DVec3};

pub(super) fn build(params: &RectangleParams) -> MeshResult<Cap> {
    let profile = ProfileParams::Rectangle(*params);
    let (ws, hs) = (params.width_segments, params.height_segments);
    let columns = ws + 1;
    let mut arena = VertexArena::new(profile.cap_vertex_count(), profile.cap_index_count());

    let cell = DVec2::new(params.width / f64::from(ws), params.height / f64::from(hs));
    let half = DVec2::new(params.width, params.height) / 2.0;

    // Rows run top to bottom so v decreases with the row index.
    for iy in 0..=hs {
        for ix in 0..=ws {
            let x = f64::from(ix) * cell.x - half.x;
            let y = half.y - f64::from(iy) * cell.y;
            let uv = DVec2::new(f64::from(ix) / f64::from(ws), 1.0 - f64::from(iy) / f64::from(hs));
            arena.push_vertex(DVec3::new(x, y, 0.0), DVec3::Z, uv);
        }
    }

    let at = |ix: u32, iy: u32| ix + columns * iy;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = at(ix, iy);
            let b = at(ix, iy + 1);
            let c = at(ix + 1, iy + 1);
            let d = at(ix + 1, iy);
            arena.push_triangle(a, b, d);
            arena.push_triangle(b, c, d);
        }
    }

    // Perimeter, CCW: bottom edge, right edge, top edge, left edge.
    let mut perimeter = Vec::with_capacity(profile.boundary_vertex_count());
    perimeter.extend((0..ws).map(|ix| at(ix, hs)));
    perimeter.extend((1..=hs).rev().map(|iy| at(ws, iy)));
    perimeter.extend((1..=ws).rev().map(|ix| at(ix, 0)));
    perimeter.extend((0..hs).map(|iy| at(0, iy)));

    Ok(Cap {
        mesh: arena.finish(Vec::new())?,
        boundaries: vec![Boundary {
            vertices: perimeter,
            closed: true,
            facing: Facing::Outward,
        }],
    })
}
