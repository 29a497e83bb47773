use super::*;
use crate::mesh::{AttributeName, Group};
use crate::profile::{build_cap, ProfileParams, RingParams};

/// A 1x3 strip of quads spanning `x0..x0+1`, `y = 0..3`, as 8 own vertices.
fn strip(x0: f32, base: u32) -> (Vec<f32>, Vec<u32>) {
    let mut positions = Vec::new();
    for y in 0..4 {
        positions.extend_from_slice(&[x0, y as f32, 0.0, x0 + 1.0, y as f32, 0.0]);
    }
    let mut index = Vec::new();
    for row in 0..3u32 {
        let (a, b) = (base + 2 * row, base + 2 * row + 1);
        let (c, d) = (a + 2, b + 2);
        index.extend_from_slice(&[a, b, d, a, d, c]);
    }
    (positions, index)
}

/// Two strips sharing the `x = 1` edge, which holds 4 coincident pairs.
fn two_strips() -> Mesh {
    let (mut positions, mut index) = strip(0.0, 0);
    let (right, right_index) = strip(1.0, 8);
    positions.extend(right);
    index.extend(right_index);

    let mut attributes = Attributes::new();
    attributes.insert(AttributeName::Position, AttributeBuffer::float32(positions, 3).unwrap());
    attributes.insert(
        AttributeName::Normal,
        AttributeBuffer::float32([0.0, 0.0, 1.0].repeat(16), 3).unwrap(),
    );
    Mesh::new(attributes, index, vec![Group::new(0, 18, 0), Group::new(18, 18, 1)]).unwrap()
}

fn positions_only(values: Vec<f32>) -> Mesh {
    let mut attributes = Attributes::new();
    attributes.insert(AttributeName::Position, AttributeBuffer::float32(values, 3).unwrap());
    Mesh::unindexed(attributes).unwrap()
}

#[test]
fn test_shared_edge_welds_four_pairs() {
    let mesh = two_strips();
    let (welded, report) = merge_vertices_with_report(&mesh, &WeldOptions::default());

    assert_eq!(report.input_vertices, 16);
    assert_eq!(report.output_vertices, 12);
    assert_eq!(report.merged(), 4);
    assert_eq!(welded.vertex_count(), 12);
    assert_eq!(welded.index().len(), mesh.index().len());
    assert!(welded.index().iter().all(|&i| (i as usize) < 12));
    assert!(welded.validate());
}

#[test]
fn test_weld_keeps_groups_and_geometry() {
    let mesh = two_strips();
    let welded = merge_vertices(&mesh, &WeldOptions::default());
    assert_eq!(welded.groups(), mesh.groups());
    for (slot, (&before, &after)) in mesh.index().iter().zip(welded.index()).enumerate() {
        assert_eq!(
            mesh.position(before as usize),
            welded.position(after as usize),
            "slot {slot} moved"
        );
    }
}

#[test]
fn test_weld_is_idempotent_and_never_grows() {
    let cap = build_cap(&ProfileParams::Ring(RingParams {
        theta_segments: 12,
        phi_segments: 3,
        ..Default::default()
    }))
    .unwrap()
    .mesh;

    for mesh in [two_strips(), cap] {
        let options = WeldOptions::default();
        let once = merge_vertices(&mesh, &options);
        let twice = merge_vertices(&once, &options);
        assert!(once.vertex_count() <= mesh.vertex_count());
        assert_eq!(twice.vertex_count(), once.vertex_count());
        assert_eq!(twice, once);
    }
}

#[test]
fn test_differing_channel_keeps_vertices_apart() {
    let mesh = two_strips();
    let (attributes, _, index, groups) = mesh.into_parts();
    let mut attributes = attributes;
    // Left strip u = 0, right strip u = 1: the seam no longer matches.
    let uvs: Vec<f32> = (0..16).flat_map(|v| [if v < 8 { 0.0 } else { 1.0 }, 0.0]).collect();
    attributes.insert(AttributeName::Uv, AttributeBuffer::float32(uvs, 2).unwrap());
    let mesh = Mesh::new(attributes, index, groups).unwrap();

    assert_eq!(merge_vertices(&mesh, &WeldOptions::default()).vertex_count(), 16);
}

#[test]
fn test_unreferenced_vertices_are_dropped() {
    let mut attributes = Attributes::new();
    attributes.insert(
        AttributeName::Position,
        AttributeBuffer::float32(
            vec![0.0, 0.0, 0.0, 9.0, 9.0, 9.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            3,
        )
        .unwrap(),
    );
    let mesh = Mesh::new(attributes, vec![0, 2, 3], Vec::new()).unwrap();
    let welded = merge_vertices(&mesh, &WeldOptions::default());
    assert_eq!(welded.vertex_count(), 3);
    assert_eq!(welded.index(), &[0, 1, 2]);
}

#[test]
fn test_morph_targets_follow_their_vertex() {
    let mesh = positions_only(vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
        1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    ]);
    let target: Vec<f32> = (0..18).map(|i| i as f32).collect();
    let mut morph = MorphAttributes::new();
    morph.insert(
        AttributeName::Position,
        vec![AttributeBuffer::float32(target, 3).unwrap()],
    );
    let mesh = mesh.with_morph_attributes(morph).unwrap();

    let welded = merge_vertices(&mesh, &WeldOptions::default());
    assert_eq!(welded.vertex_count(), 4);

    let target = &welded.morph_attributes()[&AttributeName::Position][0];
    assert_eq!(target.count(), 4);
    // Compacted vertex 3 is source vertex 4 (the first unseen one in the
    // second triangle), so it carries that vertex's target values.
    assert_eq!(target.get(3, 0), 12.0);
    assert_eq!(target.get(1, 0), 3.0);
}

#[test]
fn test_tolerance_is_floored() {
    assert_eq!(WeldOptions::new(0.0).effective_tolerance(), f64::EPSILON);
    assert_eq!(WeldOptions::new(-1.0).effective_tolerance(), f64::EPSILON);
    assert_eq!(WeldOptions::new(f64::NAN).effective_tolerance(), 1e-4);

    // Exact duplicates still collapse at the smallest tolerance.
    let welded = merge_vertices(&two_strips(), &WeldOptions::new(0.0));
    assert_eq!(welded.vertex_count(), 12);
}

#[test]
fn test_rounding_is_symmetric_around_zero() {
    let near = positions_only(vec![
        -0.00004, 0.0, 0.0, 0.00004, 0.0, 0.0, 0.0, 1.0, 0.0, //
        0.0, 2.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0,
    ]);
    // Both x values round to bucket 0 at 1e-4.
    let welded = merge_vertices(&near, &WeldOptions::default());
    assert_eq!(welded.vertex_count(), 5);

    let apart = positions_only(vec![
        -0.00006, 0.0, 0.0, 0.00006, 0.0, 0.0, 0.0, 1.0, 0.0,
    ]);
    // -0.6 and 0.6 land in buckets -1 and 1.
    assert_eq!(merge_vertices(&apart, &WeldOptions::default()).vertex_count(), 3);
}

#[test]
fn test_options_deserialize_with_default() {
    let options: WeldOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, WeldOptions::default());
    let options: WeldOptions = serde_json::from_str(r#"{"tolerance": 0.01}"#).unwrap();
    assert_eq!(options.tolerance, 0.01);
}

#[test]
fn test_large_coordinates_stay_apart_at_smallest_tolerance() {
    let far = positions_only(vec![
        3000.0, 0.0, 0.0, 5000.0, 0.0, 0.0, 4000.0, 1.0, 0.0,
    ]);
    let welded = merge_vertices(&far, &WeldOptions::new(0.0));
    assert_eq!(welded.vertex_count(), 3);
    assert!(welded.validate());

    // Bit-identical large values still collapse.
    let repeated = positions_only(vec![
        3000.0, 0.0, 0.0, 5000.0, 0.0, 0.0, 4000.0, 1.0, 0.0, //
        5000.0, 0.0, 0.0, 3000.0, 0.0, 0.0, 4000.0, -1.0, 0.0,
    ]);
    assert_eq!(merge_vertices(&repeated, &WeldOptions::new(0.0)).vertex_count(), 4);
}

#[test]
fn test_nan_component_does_not_weld_with_origin() {
    let mesh = positions_only(vec![
        0.0, 0.0, 0.0, f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0,
    ]);
    let welded = merge_vertices(&mesh, &WeldOptions::default());
    assert_eq!(welded.vertex_count(), 3);
    assert!(welded.position(1).x.is_nan());
}

#[test]
fn test_key_component_escapes_out_of_range_buckets() {
    let mut key = Vec::new();
    push_key_component(&mut key, -0.25, 4.0);
    assert_eq!(key, vec![-1]);

    key.clear();
    push_key_component(&mut key, 3000.0, 1.0 / f64::EPSILON);
    assert_eq!(key, vec![i64::MIN, 3000.0_f64.to_bits() as i64]);

    key.clear();
    push_key_component(&mut key, f64::NAN, 1.0);
    assert_eq!(key[0], i64::MIN);
}
