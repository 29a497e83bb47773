//! # Material Groups
//!
//! Concatenates the front, back and side index buffers into one and
//! partitions it into three groups in that order. Group `i` always uses
//! material `i`; callers rely on group 2 being the side surface.

use crate::mesh::Group;

/// Material slot of each surface of an extruded solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MaterialSlot {
    /// Front cap, facing `+Z`
    Front = 0,
    /// Mirrored back cap, facing `-Z`
    Back = 1,
    /// Side skirt
    Side = 2,
}

impl MaterialSlot {
    /// Slots in emission order.
    pub const ALL: [MaterialSlot; 3] = [
        MaterialSlot::Front,
        MaterialSlot::Back,
        MaterialSlot::Side,
    ];

    /// Material index stored in the group.
    #[inline]
    pub fn material_index(self) -> u32 {
        self as u32
    }
}

/// One surface's local index buffer and vertex count.
#[derive(Debug, Clone, Copy)]
pub struct Surface<'a> {
    /// Indices local to this surface's vertices
    pub indices: &'a [u32],
    /// Vertices this surface contributes to the combined buffers
    pub vertex_count: usize,
}

/// Combined index buffer and its groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedIndex {
    /// Front, back and side indices, offset into the combined vertex buffers
    pub index: Vec<u32>,
    /// `[front, back, side]`
    pub groups: Vec<Group>,
}

/// Concatenates the three surfaces' indices, offsetting each by the vertex
/// count of the surfaces before it, and emits one group per surface.
///
/// # Example
///
/// ```rust
/// use extrude_mesh::{assign_groups, Group, Surface};
///
/// let tri = [0, 1, 2];
/// let grouped = assign_groups(
///     Surface { indices: &tri, vertex_count: 3 },
///     Surface { indices: &tri, vertex_count: 3 },
///     Surface { indices: &[0, 1, 2, 2, 1, 3], vertex_count: 4 },
/// );
/// assert_eq!(grouped.index, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 8, 7, 9]);
/// assert_eq!(grouped.groups[2], Group::new(6, 6, 2));
/// ```
pub fn assign_groups(front: Surface<'_>, back: Surface<'_>, side: Surface<'_>) -> GroupedIndex {
    let surfaces = [front, back, side];
    let total: usize = surfaces.iter().map(|s| s.indices.len()).sum();

    let mut index = Vec::with_capacity(total);
    let mut groups = Vec::with_capacity(surfaces.len());
    let mut vertex_offset = 0u32;

    for (surface, slot) in surfaces.iter().zip(MaterialSlot::ALL) {
        let start = index.len();
        index.extend(surface.indices.iter().map(|&i| i + vertex_offset));
        groups.push(Group::new(start, surface.indices.len(), slot.material_index()));
        vertex_offset += surface.vertex_count as u32;
    }

    debug_assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), index.len());
    GroupedIndex { index, groups }
}
