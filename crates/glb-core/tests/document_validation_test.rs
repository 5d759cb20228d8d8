use glb_core::{Collection, Document, GlbError, SceneIndex};

#[test]
fn full_document_parses_and_indexes() {
    let json = br#"{
        "asset": {"version": "2.0"},
        "nodes": [
            {"name": "Root", "children": [1, 2]},
            {"name": "Body", "mesh": 0},
            {"name": "Lamp"}
        ],
        "meshes": [{
            "name": "Body",
            "primitives": [
                {"attributes": {"POSITION": 0, "NORMAL": 1}, "indices": 2, "material": 0}
            ]
        }],
        "materials": [{"name": "Steel", "doubleSided": true}],
        "animations": [{
            "name": "Walk",
            "channels": [{"sampler": 0, "target": {"node": 1, "path": "translation"}}],
            "samplers": [{"input": 3, "output": 0, "interpolation": "LINEAR"}]
        }],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 8, "type": "VEC3"},
            {"bufferView": 0, "componentType": 5126, "count": 8, "type": "VEC3"},
            {"bufferView": 1, "componentType": 5123, "count": 36, "type": "SCALAR"},
            {"componentType": 5126, "count": 2, "type": "SCALAR"}
        ],
        "buffers": [{"byteLength": 256, "uri": "payload.bin"}],
        "bufferViews": [
            {"buffer": 0, "byteLength": 192},
            {"buffer": 0, "byteOffset": 192, "byteLength": 64}
        ]
    }"#;

    let doc = Document::from_json(json).unwrap();
    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.animations[0].channels.len(), 1);
    assert_eq!(doc.accessors[2].component_type, 5123);
    assert_eq!(doc.buffer_views[1].byte_offset, 192);

    let index = SceneIndex::new(&doc);
    assert_eq!(index.find_by_name(Collection::Nodes, "Body"), Some(1));
    assert_eq!(index.find_by_name(Collection::Meshes, "Body"), Some(0));
    assert_eq!(index.find_by_name(Collection::Animations, "Walk"), Some(0));
    assert_eq!(
        index.names_of(Collection::Nodes),
        vec![Some("Root"), Some("Body"), Some("Lamp")]
    );
}

#[test]
fn sampler_accessor_out_of_bounds_is_dangling() {
    let json = br#"{
        "animations": [{
            "channels": [{"sampler": 0, "target": {"path": "weights"}}],
            "samplers": [{"input": 0, "output": 5}]
        }],
        "accessors": [{"componentType": 5126, "count": 2, "type": "SCALAR"}]
    }"#;

    assert_eq!(
        Document::from_json(json).unwrap_err(),
        GlbError::DanglingReference {
            entity: "animations",
            field: "samplers.output",
            index: 5,
            bound: 1,
        }
    );
}

#[test]
fn buffer_view_without_buffer_is_dangling() {
    let json = br#"{"bufferViews": [{"buffer": 0, "byteLength": 16}]}"#;
    assert_eq!(
        Document::from_json(json).unwrap_err(),
        GlbError::DanglingReference {
            entity: "bufferViews",
            field: "buffer",
            index: 0,
            bound: 0,
        }
    );
}

#[test]
fn grandchild_cycle_is_detected() {
    let json = br#"{
        "nodes": [
            {"name": "A", "children": [1]},
            {"name": "B", "children": [2]},
            {"name": "C", "children": [1]}
        ]
    }"#;
    assert!(matches!(
        Document::from_json(json).unwrap_err(),
        GlbError::CyclicNodeGraph { .. }
    ));
}
