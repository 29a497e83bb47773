//! # Vertex Welding
//!
//! Merges vertices whose every channel agrees within a tolerance, compacting
//! the attribute buffers and remapping the index.
//!
//! ## Algorithm
//!
//! 1. `m = 1 / tolerance`
//! 2. Walk the index buffer, so only referenced vertices are considered and
//!    vertices already shared by index collapse without a lookup.
//! 3. Key each vertex by `floor(value * m + 0.5)` for every component of every
//!    channel, channels in [`AttributeName`](crate::AttributeName) order.
//! 4. First occurrence copies the original values (base channels and morph
//!    targets) into the compacted buffers; repeats reuse its index.
//!
//! Rounding uses `floor`, so bucket edges sit at the same place on both
//! sides of zero. Two values closer than the tolerance usually share a
//! bucket but can straddle an edge; that is an accepted approximation.
//!
//! When `value * m` leaves the `i64` range (or the value is NaN) the
//! component is keyed on its exact bits, so such vertices only merge with
//! bit-identical ones.
//!
//! Morph targets follow their base vertex but do not take part in the key.

use crate::mesh::{AttributeBuffer, Attributes, Mesh, MorphAttributes};
use config::constants::{DEFAULT_WELD_TOLERANCE, MIN_WELD_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Welding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldOptions {
    /// Largest per-component difference treated as equal.
    pub tolerance: f64,
}

impl Default for WeldOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_WELD_TOLERANCE,
        }
    }
}

impl WeldOptions {
    /// Creates options with the given tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Tolerance actually used: floored at machine epsilon, default if NaN.
    pub fn effective_tolerance(&self) -> f64 {
        if self.tolerance.is_nan() {
            return DEFAULT_WELD_TOLERANCE;
        }
        self.tolerance.max(MIN_WELD_TOLERANCE)
    }
}

/// Vertex counts before and after a weld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeldReport {
    /// Stored vertices of the input mesh.
    pub input_vertices: usize,
    /// Stored vertices of the welded mesh.
    pub output_vertices: usize,
}

impl WeldReport {
    /// Vertices removed by the weld.
    pub fn merged(&self) -> usize {
        self.input_vertices.saturating_sub(self.output_vertices)
    }
}

/// Returns a welded copy of `mesh`.
///
/// # Example
///
/// ```rust
/// use extrude_mesh::{merge_vertices, AttributeBuffer, AttributeName, Mesh, WeldOptions};
/// use std::collections::BTreeMap;
///
/// // Two triangles sharing an edge, stored as a soup of six vertices.
/// let soup = vec![
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
///     1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
/// ];
/// let mut attributes = BTreeMap::new();
/// attributes.insert(AttributeName::Position, AttributeBuffer::float32(soup, 3).unwrap());
/// let mesh = Mesh::unindexed(attributes).unwrap();
///
/// let welded = merge_vertices(&mesh, &WeldOptions::default());
/// assert_eq!(welded.vertex_count(), 4);
/// assert_eq!(welded.index(), &[0, 1, 2, 1, 3, 2]);
/// ```
pub fn merge_vertices(mesh: &Mesh, options: &WeldOptions) -> Mesh {
    merge_vertices_with_report(mesh, options).0
}

/// [`merge_vertices`], also reporting how many vertices were merged.
pub fn merge_vertices_with_report(mesh: &Mesh, options: &WeldOptions) -> (Mesh, WeldReport) {
    let tolerance = options.effective_tolerance();
    let mut welder = VertexWelder::new(mesh, 1.0 / tolerance);

    let index: Vec<u32> = mesh.index().iter().map(|&i| welder.add(i)).collect();
    let (attributes, morph_attributes, vertex_count) = welder.finish();

    let report = WeldReport {
        input_vertices: mesh.vertex_count(),
        output_vertices: vertex_count,
    };
    log::debug!(
        "weld: {} -> {} vertices (tolerance {tolerance:e})",
        report.input_vertices,
        report.output_vertices
    );

    let welded = Mesh::from_parts_unchecked(
        attributes,
        morph_attributes,
        index,
        mesh.groups().to_vec(),
        vertex_count,
    );
    (welded, report)
}

// =============================================================================
// VERTEX WELDER
// =============================================================================

/// Incremental welder over one source mesh.
struct VertexWelder<'a> {
    source: &'a Mesh,
    multiplier: f64,
    /// Quantized key -> compacted index
    cache: HashMap<Vec<i64>, u32>,
    /// Source index -> compacted index, for vertices already seen by index
    remap: Vec<Option<u32>>,
    scratch: Vec<i64>,
    attributes: Attributes,
    morph_attributes: MorphAttributes,
    vertex_count: usize,
}

impl<'a> VertexWelder<'a> {
    fn new(source: &'a Mesh, multiplier: f64) -> Self {
        let capacity = source.vertex_count();
        let attributes: Attributes = source
            .attributes()
            .iter()
            .map(|(name, buffer)| (name.clone(), buffer.empty_like(capacity)))
            .collect();
        let morph_attributes: MorphAttributes = source
            .morph_attributes()
            .iter()
            .map(|(name, targets)| {
                let empty: Vec<_> = targets.iter().map(|t| t.empty_like(capacity)).collect();
                (name.clone(), empty)
            })
            .collect();
        let key_len = source.attributes().values().map(AttributeBuffer::item_size).sum();

        Self {
            source,
            multiplier,
            cache: HashMap::with_capacity(capacity),
            remap: vec![None; capacity],
            scratch: Vec::with_capacity(key_len),
            attributes,
            morph_attributes,
            vertex_count: 0,
        }
    }

    /// Compacted index for source vertex `vertex`.
    fn add(&mut self, vertex: u32) -> u32 {
        let v = vertex as usize;
        if let Some(compact) = self.remap[v] {
            return compact;
        }

        self.scratch.clear();
        for buffer in self.source.attributes().values() {
            for c in 0..buffer.item_size() {
                push_key_component(&mut self.scratch, buffer.get(v, c), self.multiplier);
            }
        }

        let compact = match self.cache.get(self.scratch.as_slice()).copied() {
            Some(existing) => existing,
            None => {
                let compact = self.push_vertex(v);
                self.cache.insert(self.scratch.clone(), compact);
                compact
            }
        };
        self.remap[v] = Some(compact);
        compact
    }

    fn push_vertex(&mut self, v: usize) -> u32 {
        for (name, buffer) in &mut self.attributes {
            if let Some(src) = self.source.attribute(name) {
                buffer.push_vertex_from(src, v);
            }
        }
        for (name, targets) in &mut self.morph_attributes {
            if let Some(src) = self.source.morph_attributes().get(name) {
                for (dst, src) in targets.iter_mut().zip(src) {
                    dst.push_vertex_from(src, v);
                }
            }
        }
        let compact = self.vertex_count as u32;
        self.vertex_count += 1;
        compact
    }

    fn finish(self) -> (Attributes, MorphAttributes, usize) {
        (self.attributes, self.morph_attributes, self.vertex_count)
    }
}

/// Appends the quantized bucket of `value`.
///
/// Buckets past the `i64` range (large values at tiny tolerances) and
/// non-finite values are keyed on their exact bits instead, behind an
/// `i64::MIN` marker that no in-range bucket can take.
fn push_key_component(key: &mut Vec<i64>, value: f64, multiplier: f64) {
    const LOWEST: f64 = i64::MIN as f64;
    let q = (value * multiplier + 0.5).floor();
    if q > LOWEST && q < -LOWEST {
        key.push(q as i64);
    } else {
        key.push(i64::MIN);
        key.push(value.to_bits() as i64);
    }
}

#[cfg(test)]
mod tests;
