//! Pre-sized vertex arena used by the builders.
//!
//! Every builder knows its exact vertex and index counts before emitting
//! anything, so buffers are allocated once and never grow.

use super::{AttributeBuffer, AttributeName, Group, Mesh};
use crate::error::MeshResult;
use glam::{DVec2, DVec3};
use std::collections::BTreeMap;

/// Position/normal/uv accumulation with exact capacities.
#[derive(Debug)]
pub(crate) struct VertexArena {
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    index: Vec<u32>,
    vertex_capacity: usize,
    index_capacity: usize,
}

impl VertexArena {
    pub(crate) fn new(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            index: Vec::with_capacity(index_count),
            vertex_capacity: vertex_count,
            index_capacity: index_count,
        }
    }

    /// Number of vertices pushed so far.
    #[inline]
    pub(crate) fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Adds a vertex and returns its index.
    pub(crate) fn push_vertex(&mut self, position: DVec3, normal: DVec3, uv: DVec2) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        self.uvs.extend_from_slice(&[uv.x as f32, uv.y as f32]);
        index
    }

    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.index.extend_from_slice(&[a, b, c]);
    }

    /// Hands the buffers to a validated [`Mesh`].
    pub(crate) fn finish(self, groups: Vec<Group>) -> MeshResult<Mesh> {
        debug_assert_eq!(self.vertex_count(), self.vertex_capacity, "vertex count estimate");
        debug_assert_eq!(self.index.len(), self.index_capacity, "index count estimate");

        let mut attributes = BTreeMap::new();
        attributes.insert(AttributeName::Position, AttributeBuffer::float32(self.positions, 3)?);
        attributes.insert(AttributeName::Normal, AttributeBuffer::float32(self.normals, 3)?);
        attributes.insert(AttributeName::Uv, AttributeBuffer::float32(self.uvs, 2)?);
        Mesh::new(attributes, self.index, groups)
    }
}
