//! # Attribute Buffers
//!
//! Named per-vertex channels stored as flat arrays with an item size,
//! mirroring the layout GPU vertex buffers expect.

use crate::error::{MeshError, MeshResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a per-vertex channel.
///
/// The derived ordering is the canonical channel order: welding walks
/// channels in this order when building keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeName {
    /// Vertex position, 3 components.
    Position,
    /// Vertex normal, 3 components.
    Normal,
    /// Texture coordinate, 2 components.
    Uv,
    /// Vertex color, 3 or 4 components.
    Color,
    /// Any other channel, ordered by name after the built-in ones.
    Custom(String),
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeName::Position => write!(f, "position"),
            AttributeName::Normal => write!(f, "normal"),
            AttributeName::Uv => write!(f, "uv"),
            AttributeName::Color => write!(f, "color"),
            AttributeName::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Numeric storage of a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    /// 32-bit floats (positions, normals, uvs).
    Float32(Vec<f32>),
    /// 16-bit unsigned integers (e.g. joint indices).
    Uint16(Vec<u16>),
    /// 8-bit unsigned integers (e.g. normalized colors).
    Uint8(Vec<u8>),
}

impl AttributeValues {
    /// Number of scalar components stored.
    pub fn len(&self) -> usize {
        match self {
            Self::Float32(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Uint8(v) => v.len(),
        }
    }

    /// Returns true if no components are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one scalar, widened to f64.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        match self {
            Self::Float32(v) => f64::from(v[i]),
            Self::Uint16(v) => f64::from(v[i]),
            Self::Uint8(v) => f64::from(v[i]),
        }
    }

    /// Empty storage of the same numeric type.
    fn empty_like(&self, capacity: usize) -> Self {
        match self {
            Self::Float32(_) => Self::Float32(Vec::with_capacity(capacity)),
            Self::Uint16(_) => Self::Uint16(Vec::with_capacity(capacity)),
            Self::Uint8(_) => Self::Uint8(Vec::with_capacity(capacity)),
        }
    }

    /// Appends `src[range]` at original precision. Both sides must share the
    /// numeric type, which `AttributeBuffer::empty_like` guarantees.
    fn extend_from(&mut self, src: &Self, range: std::ops::Range<usize>) {
        debug_assert_eq!(
            std::mem::discriminant(&*self),
            std::mem::discriminant(src),
            "attribute storage types diverged"
        );
        match (self, src) {
            (Self::Float32(dst), Self::Float32(src)) => dst.extend_from_slice(&src[range]),
            (Self::Uint16(dst), Self::Uint16(src)) => dst.extend_from_slice(&src[range]),
            (Self::Uint8(dst), Self::Uint8(src)) => dst.extend_from_slice(&src[range]),
            // Mismatched storage: nothing to copy.
            _ => {}
        }
    }
}

/// A named channel's data: flat values plus items-per-vertex.
///
/// ## Memory Layout
///
/// `values = [c0_v0, c1_v0, .., c0_v1, c1_v1, ..]` with `item_size`
/// components per vertex.
///
/// ## Example
///
/// ```rust
/// use extrude_mesh::AttributeBuffer;
///
/// let uv = AttributeBuffer::float32(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], 2).unwrap();
/// assert_eq!(uv.count(), 3);
/// assert_eq!(uv.get(1, 0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    values: AttributeValues,
    item_size: usize,
    normalized: bool,
}

impl AttributeBuffer {
    /// Creates a buffer, checking that `values` holds whole items.
    pub fn new(values: AttributeValues, item_size: usize, normalized: bool) -> MeshResult<Self> {
        if !(1..=4).contains(&item_size) {
            return Err(MeshError::invalid_attribute(format!(
                "item_size must be in 1..=4: {item_size}"
            )));
        }
        if values.len() % item_size != 0 {
            return Err(MeshError::invalid_attribute(format!(
                "{} components is not a multiple of item_size {item_size}",
                values.len()
            )));
        }
        Ok(Self {
            values,
            item_size,
            normalized,
        })
    }

    /// Creates a non-normalized f32 buffer.
    pub fn float32(values: Vec<f32>, item_size: usize) -> MeshResult<Self> {
        Self::new(AttributeValues::Float32(values), item_size, false)
    }

    /// Number of vertices (items) in the buffer.
    #[inline]
    pub fn count(&self) -> usize {
        self.values.len() / self.item_size
    }

    /// Components per vertex.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Whether integer values map to `[0, 1]` when read by the renderer.
    #[inline]
    pub fn normalized(&self) -> bool {
        self.normalized
    }

    /// Raw storage.
    #[inline]
    pub fn values(&self) -> &AttributeValues {
        &self.values
    }

    /// Raw storage as f32, if that is the numeric type.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.values {
            AttributeValues::Float32(v) => Some(v),
            _ => None,
        }
    }

    /// Component `component` of vertex `vertex`, widened to f64.
    #[inline]
    pub fn get(&self, vertex: usize, component: usize) -> f64 {
        self.values.get(vertex * self.item_size + component)
    }

    /// An empty buffer with the same numeric type, item size and
    /// normalization, pre-sized for `vertex_capacity` vertices.
    pub(crate) fn empty_like(&self, vertex_capacity: usize) -> Self {
        Self {
            values: self.values.empty_like(vertex_capacity * self.item_size),
            item_size: self.item_size,
            normalized: self.normalized,
        }
    }

    /// Appends vertex `vertex` of `src`, which must come from the buffer this
    /// one was created `empty_like` from.
    pub(crate) fn push_vertex_from(&mut self, src: &AttributeBuffer, vertex: usize) {
        debug_assert_eq!(self.item_size, src.item_size);
        let start = vertex * src.item_size;
        self.values.extend_from(&src.values, start..start + src.item_size);
    }

    /// A copy with one component of every vertex negated.
    ///
    /// Only float channels can be negated.
    pub fn with_negated_component(&self, component: usize) -> MeshResult<Self> {
        if component >= self.item_size {
            return Err(MeshError::invalid_attribute(format!(
                "component {component} out of range for item_size {}",
                self.item_size
            )));
        }
        let AttributeValues::Float32(values) = &self.values else {
            return Err(MeshError::invalid_attribute(
                "only float32 channels can be negated",
            ));
        };
        let negated = values
            .iter()
            .enumerate()
            .map(|(i, &v)| if i % self.item_size == component { -v } else { v })
            .collect();
        Ok(Self {
            values: AttributeValues::Float32(negated),
            item_size: self.item_size,
            normalized: self.normalized,
        })
    }
}
