//! # Extrude Mesh
//!
//! Procedural extruded solids and tolerance-based vertex welding.
//! Turns 2D profile parameters into one render-ready indexed mesh.
//!
//! ## Architecture
//!
//! ```text
//! ProfileParams → build_cap → mirror_cap → build_skirt → assign_groups → Mesh
//!                                                              ↓ (optional)
//!                                                       merge_vertices
//! ```
//!
//! ## Modules
//!
//! - **profile**: disc, fan, ring and rectangle caps with boundary loops
//! - **mirror**: back cap from the front cap (negate axis, flip winding)
//! - **skirt**: side wall between the caps, optional radial depth taper
//! - **groups**: front/back/side material groups
//! - **weld**: quantized-key vertex deduplication over any mesh
//! - **assembly**: the pipeline, single and batched
//!
//! ## Usage
//!
//! ```rust
//! use extrude_mesh::{build, DiscParams, ProfileParams};
//!
//! let params = DiscParams { radius: 1.0, segments: 8, ..Default::default() };
//! let profile = ProfileParams::Disc(params);
//! let solid = build(&profile, 1.0, 1.0).unwrap();
//! assert_eq!(solid.index().len(), 96);
//! assert_eq!(solid.groups().len(), 3);
//! ```

pub mod assembly;
pub mod error;
pub mod groups;
pub mod mesh;
pub mod mirror;
pub mod profile;
pub mod skirt;
pub mod weld;

pub use assembly::{build, build_batch, build_solid, SolidParams};
pub use error::{MeshError, MeshResult};
pub use groups::{assign_groups, GroupedIndex, MaterialSlot, Surface};
pub use mesh::{
    AttributeBuffer, AttributeName, AttributeValues, Attributes, Group, Mesh, MorphAttributes,
};
pub use mirror::{mirror_cap, MirrorAxis};
pub use profile::{
    build_cap, Boundary, BoundaryRing, Cap, DiscParams, Facing, ProfileKind, ProfileParams,
    RectangleParams, RingParams,
};
pub use skirt::{build_skirt, DepthProfile};
pub use weld::{merge_vertices, merge_vertices_with_report, WeldOptions, WeldReport};
