use super::*;

fn triangle_attributes() -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        AttributeName::Position,
        AttributeBuffer::float32(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], 3).unwrap(),
    );
    attributes.insert(
        AttributeName::Uv,
        AttributeBuffer::float32(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], 2).unwrap(),
    );
    attributes
}

#[test]
fn test_mesh_new() {
    let mesh = Mesh::new(triangle_attributes(), vec![0, 1, 2], Vec::new()).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.uvs().len(), 6);
    assert!(mesh.normals().is_empty());
    assert!(mesh.validate());
}

#[test]
fn test_mesh_rejects_mismatched_channels() {
    let mut attributes = triangle_attributes();
    attributes.insert(
        AttributeName::Normal,
        AttributeBuffer::float32(vec![0.0, 0.0, 1.0], 3).unwrap(),
    );
    let err = Mesh::new(attributes, vec![0, 1, 2], Vec::new()).unwrap_err();
    assert!(matches!(err, MeshError::InvalidAttribute { .. }));
}

#[test]
fn test_mesh_rejects_bad_index() {
    let err = Mesh::new(triangle_attributes(), vec![0, 1], Vec::new()).unwrap_err();
    assert!(matches!(err, MeshError::InvalidIndex { .. }));

    let err = Mesh::new(triangle_attributes(), vec![0, 1, 3], Vec::new()).unwrap_err();
    assert!(err.to_string().contains("index[2] = 3"));
}

#[test]
fn test_mesh_groups_must_tile() {
    let attributes = triangle_attributes();
    let gap = vec![Group::new(0, 0, 0), Group::new(1, 2, 1)];
    assert!(matches!(
        Mesh::new(attributes.clone(), vec![0, 1, 2], gap).unwrap_err(),
        MeshError::InvalidGroups { .. }
    ));

    let short = vec![Group::new(0, 2, 0)];
    assert!(Mesh::new(attributes.clone(), vec![0, 1, 2], short).is_err());

    let ok = vec![Group::new(0, 3, 0), Group::new(3, 0, 1)];
    assert!(Mesh::new(attributes.clone(), vec![0, 1, 2], ok).is_ok());

    for overflowing in [
        vec![Group::new(0, 3, 0), Group::new(3, usize::MAX, 1)],
        vec![Group::new(0, usize::MAX, 0), Group::new(usize::MAX, 4, 1)],
    ] {
        assert!(matches!(
            Mesh::new(attributes.clone(), vec![0, 1, 2], overflowing).unwrap_err(),
            MeshError::InvalidGroups { .. }
        ));
    }
}

#[test]
fn test_mesh_unindexed_builds_identity_index() {
    let mesh = Mesh::unindexed(triangle_attributes()).unwrap();
    assert_eq!(mesh.index(), &[0, 1, 2]);
}

#[test]
fn test_morph_targets_must_match_base() {
    let mesh = Mesh::new(triangle_attributes(), vec![0, 1, 2], Vec::new()).unwrap();

    let mut wrong = MorphAttributes::new();
    wrong.insert(
        AttributeName::Position,
        vec![AttributeBuffer::float32(vec![0.0; 6], 3).unwrap()],
    );
    assert!(mesh.clone().with_morph_attributes(wrong).is_err());

    let mut missing = MorphAttributes::new();
    missing.insert(
        AttributeName::Normal,
        vec![AttributeBuffer::float32(vec![0.0; 9], 3).unwrap()],
    );
    assert!(mesh.clone().with_morph_attributes(missing).is_err());

    let mut good = MorphAttributes::new();
    good.insert(
        AttributeName::Position,
        vec![AttributeBuffer::float32(vec![0.5; 9], 3).unwrap()],
    );
    let morphed = mesh.with_morph_attributes(good).unwrap();
    assert_eq!(morphed.morph_attributes()[&AttributeName::Position].len(), 1);
}

#[test]
fn test_mesh_bounding_box() {
    let mesh = Mesh::new(triangle_attributes(), vec![0, 1, 2], Vec::new()).unwrap();
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::ZERO);
    assert_eq!(max, DVec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_mesh_validate_degenerate() {
    let mesh = Mesh::new(triangle_attributes(), vec![0, 1, 1], Vec::new()).unwrap();
    assert!(!mesh.validate());
}

#[test]
fn test_translated_leaves_source_untouched() {
    let mesh = Mesh::new(triangle_attributes(), vec![0, 1, 2], Vec::new()).unwrap();
    let moved = mesh.translated(DVec3::new(0.0, 0.0, 2.0)).unwrap();
    assert_eq!(moved.position(1), DVec3::new(1.0, 0.0, 2.0));
    assert_eq!(mesh.position(1), DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(moved.uvs(), mesh.uvs());
}

#[test]
fn test_try_position_is_checked() {
    let mesh = Mesh::new(triangle_attributes(), vec![0, 1, 2], Vec::new()).unwrap();
    assert_eq!(mesh.try_position(2), Some(DVec3::new(0.0, 1.0, 0.0)));
    assert_eq!(mesh.try_position(3), None);
    assert_eq!(mesh.try_position(usize::MAX), None);

    let mut attributes = Attributes::new();
    attributes.insert(
        AttributeName::Uv,
        AttributeBuffer::float32(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], 2).unwrap(),
    );
    let no_positions = Mesh::unindexed(attributes).unwrap();
    assert_eq!(no_positions.try_position(0), None);
}

#[test]
#[should_panic]
fn test_position_panics_out_of_range() {
    let mesh = Mesh::unindexed(triangle_attributes()).unwrap();
    mesh.position(3);
}

#[test]
fn test_integer_channels_copy_per_vertex() {
    let colors = AttributeBuffer::new(
        AttributeValues::Uint8(vec![255, 0, 0, 255, 0, 128, 0, 255]),
        4,
        true,
    )
    .unwrap();
    let mut copy = colors.empty_like(2);
    copy.push_vertex_from(&colors, 1);
    assert_eq!(copy.count(), 1);
    assert!(copy.normalized());
    assert_eq!(copy.get(0, 1), 128.0);

    let ids = AttributeBuffer::new(AttributeValues::Uint16(vec![7, 9]), 1, false).unwrap();
    let mut copy = ids.empty_like(2);
    copy.push_vertex_from(&ids, 1);
    copy.push_vertex_from(&ids, 0);
    assert_eq!((copy.get(0, 0), copy.get(1, 0)), (9.0, 7.0));
}

#[test]
fn test_attribute_buffer_shape_checks() {
    assert!(AttributeBuffer::float32(vec![0.0; 5], 3).is_err());
    assert!(AttributeBuffer::float32(vec![0.0; 5], 5).is_err());
    let colors =
        AttributeBuffer::new(AttributeValues::Uint8(vec![255, 0, 0, 255]), 4, true).unwrap();
    assert_eq!(colors.count(), 1);
    assert!(colors.normalized());
    assert_eq!(colors.get(0, 0), 255.0);
    assert!(colors.with_negated_component(0).is_err());
}

#[test]
fn test_negated_component() {
    let uv = AttributeBuffer::float32(vec![0.25, 0.5, 0.75, 1.0], 2).unwrap();
    let flipped = uv.with_negated_component(0).unwrap();
    assert_eq!(flipped.as_f32().unwrap(), &[-0.25, 0.5, -0.75, 1.0]);
    assert!(uv.with_negated_component(2).is_err());
}

#[test]
fn test_attribute_name_order_is_canonical() {
    let mut names = vec![
        AttributeName::Custom("skin".into()),
        AttributeName::Uv,
        AttributeName::Color,
        AttributeName::Position,
        AttributeName::Normal,
    ];
    names.sort();
    assert_eq!(names[0], AttributeName::Position);
    assert_eq!(names[1], AttributeName::Normal);
    assert_eq!(names[2], AttributeName::Uv);
    assert_eq!(names[3], AttributeName::Color);
    assert_eq!(names[4].to_string(), "skin");
}
