//! # Mesh Data Structure
//!
//! Immutable indexed triangle mesh with named attribute channels, optional
//! morph targets and material groups.
//!
//! ## Structure
//!
//! - [`AttributeBuffer`] - flat per-vertex channel with an item size
//! - [`Group`] - contiguous index range rendered with one material
//! - [`Mesh`] - attributes + index + groups, validated on construction
//!
//! ## Example
//!
//! ```rust
//! use extrude_mesh::{AttributeBuffer, AttributeName, Mesh};
//! use std::collections::BTreeMap;
//!
//! let mut attributes = BTreeMap::new();
//! attributes.insert(
//!     AttributeName::Position,
//!     AttributeBuffer::float32(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], 3).unwrap(),
//! );
//! let mesh = Mesh::new(attributes, vec![0, 1, 2], Vec::new()).unwrap();
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

mod arena;
mod attribute;

pub(crate) use arena::VertexArena;
pub use attribute::{AttributeBuffer, AttributeName, AttributeValues};

use crate::error::{MeshError, MeshResult};
use config::constants::EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// GROUP
// =============================================================================

/// A contiguous range of the index buffer rendered with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// First index (not triangle) of the range.
    pub start: usize,
    /// Number of indices in the range.
    pub count: usize,
    /// Material slot the renderer binds for this range.
    pub material_index: u32,
}

impl Group {
    /// Creates a group.
    pub fn new(start: usize, count: usize, material_index: u32) -> Self {
        Self {
            start,
            count,
            material_index,
        }
    }

    /// One past the last index of the range, saturating at `usize::MAX`.
    #[inline]
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.count)
    }
}

// =============================================================================
// MESH STRUCT
// =============================================================================

/// Channel map keyed in canonical order.
pub type Attributes = BTreeMap<AttributeName, AttributeBuffer>;

/// Morph targets per channel; each target is shaped like its base channel.
pub type MorphAttributes = BTreeMap<AttributeName, Vec<AttributeBuffer>>;

/// Indexed triangle mesh.
///
/// Constructed once through [`Mesh::new`], which checks every invariant;
/// transformations return new meshes.
///
/// ## Invariants
///
/// - every channel (and morph target) holds `vertex_count` items
/// - `index.len()` is a multiple of 3 and every entry is `< vertex_count`
/// - groups, when present, tile the index buffer end-to-end
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    attributes: Attributes,
    morph_attributes: MorphAttributes,
    index: Vec<u32>,
    groups: Vec<Group>,
    vertex_count: usize,
}

impl Mesh {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Creates a mesh after validating channel sizes, indices and groups.
    pub fn new(attributes: Attributes, index: Vec<u32>, groups: Vec<Group>) -> MeshResult<Self> {
        let vertex_count = shared_vertex_count(&attributes)?;

        if index.len() % 3 != 0 {
            return Err(MeshError::invalid_index(format!(
                "index length {} is not a multiple of 3",
                index.len()
            )));
        }
        if let Some((slot, &bad)) = index
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::invalid_index(format!(
                "index[{slot}] = {bad} but mesh has {vertex_count} vertices"
            )));
        }
        check_groups_tile(&groups, index.len())?;

        Ok(Self {
            attributes,
            morph_attributes: MorphAttributes::new(),
            index,
            groups,
            vertex_count,
        })
    }

    /// Creates a mesh from a non-indexed triangle soup by synthesizing the
    /// identity index.
    pub fn unindexed(attributes: Attributes) -> MeshResult<Self> {
        let vertex_count = shared_vertex_count(&attributes)?;
        let index = (0..vertex_count as u32).collect();
        Self::new(attributes, index, Vec::new())
    }

    /// Attaches morph targets, checking each is shaped like its base channel.
    pub fn with_morph_attributes(mut self, morph_attributes: MorphAttributes) -> MeshResult<Self> {
        for (name, targets) in &morph_attributes {
            let Some(base) = self.attributes.get(name) else {
                return Err(MeshError::invalid_attribute(format!(
                    "morph targets for missing channel '{name}'"
                )));
            };
            for (i, target) in targets.iter().enumerate() {
                if target.item_size() != base.item_size() || target.count() != base.count() {
                    return Err(MeshError::invalid_attribute(format!(
                        "morph target {i} of '{name}' is {}x{}, base is {}x{}",
                        target.count(),
                        target.item_size(),
                        base.count(),
                        base.item_size()
                    )));
                }
            }
        }
        self.morph_attributes = morph_attributes;
        Ok(self)
    }

    /// Assembles a mesh whose invariants the caller already upholds.
    pub(crate) fn from_parts_unchecked(
        attributes: Attributes,
        morph_attributes: MorphAttributes,
        index: Vec<u32>,
        groups: Vec<Group>,
        vertex_count: usize,
    ) -> Self {
        debug_assert!(attributes.values().all(|b| b.count() == vertex_count));
        debug_assert!(index.iter().all(|&i| (i as usize) < vertex_count));
        debug_assert!(check_groups_tile(&groups, index.len()).is_ok());
        Self {
            attributes,
            morph_attributes,
            index,
            groups,
            vertex_count,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Number of stored vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.index.len() / 3
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All channels in canonical order.
    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// One channel, if present.
    pub fn attribute(&self, name: &AttributeName) -> Option<&AttributeBuffer> {
        self.attributes.get(name)
    }

    /// All morph targets.
    #[inline]
    pub fn morph_attributes(&self) -> &MorphAttributes {
        &self.morph_attributes
    }

    /// Triangle list index buffer.
    #[inline]
    pub fn index(&self) -> &[u32] {
        &self.index
    }

    /// Material groups.
    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Flattened `[x, y, z, ..]` positions; empty if the channel is absent.
    pub fn positions(&self) -> &[f32] {
        self.float_channel(&AttributeName::Position)
    }

    /// Flattened `[nx, ny, nz, ..]` normals; empty if the channel is absent.
    pub fn normals(&self) -> &[f32] {
        self.float_channel(&AttributeName::Normal)
    }

    /// Flattened `[u, v, ..]` texture coordinates; empty if absent.
    pub fn uvs(&self) -> &[f32] {
        self.float_channel(&AttributeName::Uv)
    }

    fn float_channel(&self, name: &AttributeName) -> &[f32] {
        self.attributes
            .get(name)
            .and_then(AttributeBuffer::as_f32)
            .unwrap_or(&[])
    }

    /// Position of vertex `i`.
    ///
    /// # Panics
    ///
    /// If `i >= vertex_count()`, or the mesh has no float32 position
    /// channel. See [`Mesh::try_position`] for a checked read.
    pub fn position(&self, i: usize) -> DVec3 {
        let p = &self.positions()[i * 3..i * 3 + 3];
        DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
    }

    /// Position of vertex `i`, or `None` if it is out of range or the mesh
    /// has no float32 position channel.
    pub fn try_position(&self, i: usize) -> Option<DVec3> {
        let start = i.checked_mul(3)?;
        let p = self.positions().get(start..start.checked_add(3)?)?;
        Some(DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
    }

    /// Returns the triangle at the given index.
    ///
    /// # Panics
    ///
    /// If `t >= triangle_count()`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        [self.index[t * 3], self.index[t * 3 + 1], self.index[t * 3 + 2]]
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertex_count == 0 || self.positions().is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }
        (1..self.vertex_count).fold((self.position(0), self.position(0)), |(min, max), i| {
            let p = self.position(i);
            (min.min(p), max.max(p))
        })
    }

    /// Checks that no triangle is degenerate.
    ///
    /// Checks:
    /// - No triangle repeats a vertex index
    /// - No triangle has zero area
    pub fn validate(&self) -> bool {
        if self.positions().is_empty() {
            return self.index.is_empty();
        }
        (0..self.triangle_count()).all(|t| {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return false;
            }
            let (p0, p1, p2) = (
                self.position(a as usize),
                self.position(b as usize),
                self.position(c as usize),
            );
            (p1 - p0).cross(p2 - p0).length() > EPSILON
        })
    }

    // =========================================================================
    // TRANSFORMATIONS
    // =========================================================================

    /// Returns a copy moved by `offset`. Morph position targets are
    /// absolute and move with the base.
    pub fn translated(&self, offset: DVec3) -> MeshResult<Mesh> {
        let shift = |buffer: &AttributeBuffer| -> MeshResult<AttributeBuffer> {
            let Some(values) = buffer.as_f32() else {
                return Err(MeshError::invalid_attribute("position channel must be float32"));
            };
            let delta = [offset.x as f32, offset.y as f32, offset.z as f32];
            let moved = values
                .iter()
                .enumerate()
                .map(|(i, &v)| v + delta[i % 3])
                .collect();
            AttributeBuffer::float32(moved, 3)
        };

        let mut result = self.clone();
        if let Some(position) = self.attributes.get(&AttributeName::Position) {
            result
                .attributes
                .insert(AttributeName::Position, shift(position)?);
        }
        if let Some(targets) = self.morph_attributes.get(&AttributeName::Position) {
            let moved = targets.iter().map(shift).collect::<MeshResult<Vec<_>>>()?;
            result.morph_attributes.insert(AttributeName::Position, moved);
        }
        Ok(result)
    }

    /// Splits the mesh back into its parts.
    pub fn into_parts(self) -> (Attributes, MorphAttributes, Vec<u32>, Vec<Group>) {
        (self.attributes, self.morph_attributes, self.index, self.groups)
    }
}

// =============================================================================
// VALIDATION HELPERS
// =============================================================================

fn shared_vertex_count(attributes: &Attributes) -> MeshResult<usize> {
    let mut counts = attributes.iter().map(|(name, buffer)| (name, buffer.count()));
    let Some((_, expected)) = counts.next() else {
        return Ok(0);
    };
    for (name, count) in counts {
        if count != expected {
            return Err(MeshError::invalid_attribute(format!(
                "channel '{name}' has {count} vertices, expected {expected}"
            )));
        }
    }
    Ok(expected)
}

fn check_groups_tile(groups: &[Group], index_len: usize) -> MeshResult<()> {
    if groups.is_empty() {
        return Ok(());
    }
    let mut cursor = 0;
    for (i, group) in groups.iter().enumerate() {
        if group.start != cursor {
            return Err(MeshError::invalid_groups(format!(
                "group {i} starts at {} but previous range ends at {cursor}",
                group.start
            )));
        }
        let Some(end) = group.start.checked_add(group.count) else {
            return Err(MeshError::invalid_groups(format!(
                "group {i} range {}+{} overflows",
                group.start, group.count
            )));
        };
        cursor = end;
    }
    if cursor != index_len {
        return Err(MeshError::invalid_groups(format!(
            "groups cover {cursor} indices, index buffer has {index_len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
