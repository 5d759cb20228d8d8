use glb_io::{load, Collection, Container, GlbError, SceneIndex};
use serde_json::json;

/// Build a GLB container around the given JSON document, padding the JSON
/// chunk with spaces to the 4-byte boundary as the format requires.
fn glb(document: &serde_json::Value, binary: Option<&[u8]>) -> Vec<u8> {
    let mut json = serde_json::to_vec(document).unwrap();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let mut data = Vec::new();
    data.extend_from_slice(b"glTF");
    data.extend_from_slice(&2u32.to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&(json.len() as u32).to_le_bytes());
    data.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
    data.extend_from_slice(&json);
    if let Some(bin) = binary {
        assert_eq!(bin.len() % 4, 0, "test binary payloads must be aligned");
        data.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        data.extend_from_slice(&0x004E_4942u32.to_le_bytes());
        data.extend_from_slice(bin);
    }
    let total = data.len() as u32;
    data[8..12].copy_from_slice(&total.to_le_bytes());
    data
}

#[test]
fn named_scene_summary() {
    // One node "Root" holding mesh "Cube" with material "Red", no animations.
    let document = json!({
        "asset": {"version": "2.0"},
        "nodes": [{"name": "Root", "mesh": 0}],
        "meshes": [{
            "name": "Cube",
            "primitives": [{"attributes": {"POSITION": 0}, "material": 0}]
        }],
        "materials": [{"name": "Red"}],
        "accessors": [{"componentType": 5126, "count": 24, "type": "VEC3"}]
    });

    let summary = load(&glb(&document, None)).unwrap();
    assert_eq!(summary.nodes, vec!["Root"]);
    assert_eq!(summary.meshes, vec!["Cube"]);
    assert_eq!(summary.materials, vec!["Red"]);
    assert!(summary.animations.is_empty());
}

#[test]
fn unnamed_animation_gets_display_name_and_true_counts() {
    let document = json!({
        "asset": {"version": "2.0"},
        "nodes": [{"name": "Joint"}],
        "accessors": [
            {"componentType": 5126, "count": 2, "type": "SCALAR"},
            {"componentType": 5126, "count": 2, "type": "VEC3"}
        ],
        "animations": [{
            "channels": [
                {"sampler": 0, "target": {"node": 0, "path": "translation"}},
                {"sampler": 1, "target": {"node": 0, "path": "rotation"}},
                {"sampler": 0, "target": {"node": 0, "path": "scale"}}
            ],
            "samplers": [
                {"input": 0, "output": 1},
                {"input": 0, "output": 1}
            ]
        }]
    });

    let summary = load(&glb(&document, None)).unwrap();
    assert_eq!(summary.animations.len(), 1);
    let animation = &summary.animations[0];
    assert_eq!(animation.name, "Unnamed Animation");
    assert_eq!(animation.channels, 3);
    assert_eq!(animation.samplers, 2);
}

#[test]
fn unnamed_entities_are_omitted_from_name_lists() {
    let document = json!({
        "nodes": [{"name": "A"}, {}, {"name": "B"}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "accessors": [{"componentType": 5126, "count": 3, "type": "VEC3"}]
    });

    let summary = load(&glb(&document, None)).unwrap();
    assert_eq!(summary.nodes, vec!["A", "B"]);
    assert!(summary.meshes.is_empty());
}

#[test]
fn parsing_is_idempotent() {
    let document = json!({
        "nodes": [{"name": "Root", "children": [1]}, {"name": "Child"}],
        "animations": [{"name": "Spin", "channels": [], "samplers": []}]
    });
    let data = glb(&document, None);
    assert_eq!(load(&data).unwrap(), load(&data).unwrap());
}

#[test]
fn dangling_mesh_reference_reports_exact_index() {
    // Mesh index equals the sequence length: one past the end.
    let document = json!({
        "nodes": [{"mesh": 1}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "accessors": [{"componentType": 5126, "count": 3, "type": "VEC3"}]
    });

    assert_eq!(
        load(&glb(&document, None)).unwrap_err(),
        GlbError::DanglingReference {
            entity: "nodes",
            field: "mesh",
            index: 1,
            bound: 1,
        }
    );
}

#[test]
fn node_containing_itself_is_cyclic() {
    let document = json!({"nodes": [{"name": "Ouroboros", "children": [0]}]});
    assert_eq!(
        load(&glb(&document, None)).unwrap_err(),
        GlbError::CyclicNodeGraph { node: 0 }
    );
}

#[test]
fn uri_less_buffer_requires_binary_chunk() {
    let document = json!({"buffers": [{"byteLength": 4}]});
    assert_eq!(
        load(&glb(&document, None)).unwrap_err(),
        GlbError::MissingBinaryChunk { buffer: 0 }
    );

    // With the binary chunk present the same document is fine.
    assert!(load(&glb(&document, Some(&[0; 4]))).is_ok());
}

#[test]
fn container_keeps_binary_blob_and_serves_index_queries() {
    let document = json!({
        "nodes": [{"name": "Root"}, {"name": "Root"}],
        "buffers": [{"byteLength": 8}]
    });
    let container = Container::from_bytes(&glb(&document, Some(&[7; 8]))).unwrap();
    assert_eq!(container.binary(), Some(&[7u8; 8][..]));

    let index = SceneIndex::new(container.document());
    assert_eq!(index.find_by_name(Collection::Nodes, "Root"), Some(0));
    assert_eq!(index.count(Collection::Nodes), 2);
}
