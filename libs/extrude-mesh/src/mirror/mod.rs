//! # Cap Mirror
//!
//! Derives a back cap from a front cap without re-triangulating: the
//! mirrored axis component of positions and normals is negated, the uv
//! component orthogonal to the axis is negated so textures read the right
//! way round from behind, and each triangle's winding is reversed.
//!
//! Mirroring is an involution: applying it twice restores the input.

use crate::error::MeshResult;
use crate::mesh::{AttributeBuffer, AttributeName, Attributes, Mesh, MorphAttributes};
use serde::{Deserialize, Serialize};

/// Axis a cap is mirrored across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MirrorAxis {
    /// Mirror through the `z = 0` plane (the extrusion axis).
    #[default]
    Z,
}

impl MirrorAxis {
    /// Position/normal component negated by this axis.
    pub fn component(self) -> usize {
        match self {
            MirrorAxis::Z => 2,
        }
    }

    /// Uv component negated by this axis.
    pub fn uv_component(self) -> usize {
        match self {
            MirrorAxis::Z => 0,
        }
    }

    /// Component to negate for `name`, if the channel is affected.
    fn negated_component(self, name: &AttributeName) -> Option<usize> {
        match name {
            AttributeName::Position | AttributeName::Normal => Some(self.component()),
            AttributeName::Uv => Some(self.uv_component()),
            AttributeName::Color | AttributeName::Custom(_) => None,
        }
    }

    fn mirror_buffer(
        self,
        name: &AttributeName,
        buffer: &AttributeBuffer,
    ) -> MeshResult<AttributeBuffer> {
        match self.negated_component(name) {
            Some(component) => buffer.with_negated_component(component),
            None => Ok(buffer.clone()),
        }
    }
}

/// Mirrors `cap` across `axis`, returning a new mesh.
///
/// # Example
///
/// ```rust
/// use extrude_mesh::{build_cap, mirror_cap, DiscParams, MirrorAxis, ProfileParams};
///
/// let profile = ProfileParams::Disc(DiscParams { segments: 8, ..Default::default() });
/// let cap = build_cap(&profile).unwrap();
/// let back = mirror_cap(&cap.mesh, MirrorAxis::Z).unwrap();
/// assert_eq!(back.triangle(0), [0, 2, 1]);
/// assert_eq!(mirror_cap(&back, MirrorAxis::Z).unwrap(), cap.mesh);
/// ```
pub fn mirror_cap(cap: &Mesh, axis: MirrorAxis) -> MeshResult<Mesh> {
    let mut attributes = Attributes::new();
    for (name, buffer) in cap.attributes() {
        attributes.insert(name.clone(), axis.mirror_buffer(name, buffer)?);
    }

    let mut morph_attributes = MorphAttributes::new();
    for (name, targets) in cap.morph_attributes() {
        let mirrored = targets
            .iter()
            .map(|target| axis.mirror_buffer(name, target))
            .collect::<MeshResult<Vec<_>>>()?;
        morph_attributes.insert(name.clone(), mirrored);
    }

    let mut index = cap.index().to_vec();
    for triangle in index.chunks_exact_mut(3) {
        triangle.swap(1, 2);
    }

    Mesh::new(attributes, index, cap.groups().to_vec())?.with_morph_attributes(morph_attributes)
}
