//! Typed glTF document model and JSON projection.
//!
//! The document chunk is deserialized generically into a `serde_json::Value`
//! tree first, then projected field by field into the strongly-typed
//! [`Document`]. The projection tracks a human-readable path (for example
//! `meshes[2].primitives[0].indices`) so every error points at the exact
//! field that caused it.
//!
//! Projection policies:
//! - Unknown fields are ignored (forward compatibility).
//! - Missing optional fields resolve to their documented default.
//! - Missing required fields fail with [`GlbError::MissingRequiredField`].
//! - Index fields holding a non-integer or negative value fail with
//!   [`GlbError::InvalidIndex`].
//!
//! [`Document::from_json`] finishes with the cross-reference validation pass
//! from [`crate::validate`], so a returned `Document` is fully validated and
//! query code never needs to re-check bounds.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{GlbError, Result};
use crate::validate;

/// The deserialized structured payload of a GLB container.
///
/// Every cross-entity reference is a plain `usize` index into one of the
/// owned sequences below. All sequences are immutable after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub animations: Vec<Animation>,
    pub accessors: Vec<Accessor>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
}

/// A node in the scene graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    /// Child node indices. Must not contain the node itself or form a cycle.
    pub children: Vec<usize>,
    /// Index into [`Document::meshes`].
    pub mesh: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

/// One drawable part of a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive {
    /// Attribute semantic (`"POSITION"`, `"NORMAL"`, ...) to accessor index.
    pub attributes: BTreeMap<String, usize>,
    /// Index-buffer accessor index, if the primitive is indexed.
    pub indices: Option<usize>,
    /// Index into [`Document::materials`].
    pub material: Option<usize>,
}

/// A material. Only the name is interpreted; all other properties (texture
/// references, factors, extensions) are retained as an opaque JSON map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    pub name: Option<String>,
    pub channels: Vec<Channel>,
    pub samplers: Vec<Sampler>,
}

/// An animation channel, binding a sampler to a target node property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    /// Index into the owning animation's samplers.
    pub sampler: usize,
    /// Index into [`Document::nodes`]. The format permits a target without a
    /// node (extension targets), so this is optional.
    pub target_node: Option<usize>,
}

/// An animation sampler pairing input (keyframe time) and output (value)
/// accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sampler {
    pub input: usize,
    pub output: usize,
}

/// A structural record describing a typed view over buffer bytes. Numeric
/// payload interpretation is out of scope; the fields exist so references
/// can be validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accessor {
    pub buffer_view: Option<usize>,
    pub component_type: u32,
    pub count: usize,
    /// Element type string (`"SCALAR"`, `"VEC3"`, ...), kept verbatim.
    pub element_type: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    pub byte_length: usize,
    /// Absent on the buffer backed by the container's binary chunk.
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
}

impl Document {
    /// Parse and validate a document from the raw bytes of the JSON chunk.
    ///
    /// On success the returned document has passed the full cross-reference
    /// validation pass; every index field resolves within bounds and the node
    /// graph is acyclic.
    pub fn from_json(bytes: &[u8]) -> Result<Document> {
        let root: Value = serde_json::from_slice(bytes).map_err(|e| GlbError::MalformedDocument {
            path: "$".to_string(),
            detail: e.to_string(),
        })?;
        let root = as_object(&root, "$")?;

        let doc = Document {
            nodes: parse_seq(root, "nodes", parse_node)?,
            meshes: parse_seq(root, "meshes", parse_mesh)?,
            materials: parse_seq(root, "materials", parse_material)?,
            animations: parse_seq(root, "animations", parse_animation)?,
            accessors: parse_seq(root, "accessors", parse_accessor)?,
            buffers: parse_seq(root, "buffers", parse_buffer)?,
            buffer_views: parse_seq(root, "bufferViews", parse_buffer_view)?,
        };

        validate::validate(&doc)?;
        Ok(doc)
    }
}

// ============================================================================
// Entity projections
// ============================================================================

fn parse_node(obj: &Map<String, Value>, path: &str) -> Result<Node> {
    Ok(Node {
        name: opt_string(obj, "name", path)?,
        children: opt_index_list(obj, "children", path)?,
        mesh: opt_index(obj, "mesh", path)?,
    })
}

fn parse_mesh(obj: &Map<String, Value>, path: &str) -> Result<Mesh> {
    let primitives = req_seq(obj, "primitives", path, parse_primitive)?;
    Ok(Mesh {
        name: opt_string(obj, "name", path)?,
        primitives,
    })
}

fn parse_primitive(obj: &Map<String, Value>, path: &str) -> Result<Primitive> {
    let attrs_path = format!("{path}.attributes");
    let attrs = match obj.get("attributes") {
        None => return Err(GlbError::MissingRequiredField { path: attrs_path }),
        Some(v) => as_object(v, &attrs_path)?,
    };
    let mut attributes = BTreeMap::new();
    for (semantic, value) in attrs {
        let field_path = format!("{attrs_path}.{semantic}");
        attributes.insert(semantic.clone(), value_as_index(value, &field_path)?);
    }
    Ok(Primitive {
        attributes,
        indices: opt_index(obj, "indices", path)?,
        material: opt_index(obj, "material", path)?,
    })
}

fn parse_material(obj: &Map<String, Value>, path: &str) -> Result<Material> {
    let name = opt_string(obj, "name", path)?;
    // Everything else passes through untouched.
    let properties = obj
        .iter()
        .filter(|(k, _)| k.as_str() != "name")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok(Material { name, properties })
}

fn parse_animation(obj: &Map<String, Value>, path: &str) -> Result<Animation> {
    Ok(Animation {
        name: opt_string(obj, "name", path)?,
        channels: opt_seq(obj, "channels", path, parse_channel)?,
        samplers: opt_seq(obj, "samplers", path, parse_animation_sampler)?,
    })
}

fn parse_channel(obj: &Map<String, Value>, path: &str) -> Result<Channel> {
    let target_path = format!("{path}.target");
    let target = match obj.get("target") {
        None => return Err(GlbError::MissingRequiredField { path: target_path }),
        Some(v) => as_object(v, &target_path)?,
    };
    Ok(Channel {
        sampler: req_index(obj, "sampler", path)?,
        target_node: opt_index(target, "node", &target_path)?,
    })
}

fn parse_animation_sampler(obj: &Map<String, Value>, path: &str) -> Result<Sampler> {
    Ok(Sampler {
        input: req_index(obj, "input", path)?,
        output: req_index(obj, "output", path)?,
    })
}

fn parse_accessor(obj: &Map<String, Value>, path: &str) -> Result<Accessor> {
    let component_type = req_uint(obj, "componentType", path)?;
    let component_type = u32::try_from(component_type)
        .map_err(|_| malformed(join(path, "componentType"), "value exceeds the u32 range"))?;
    Ok(Accessor {
        buffer_view: opt_index(obj, "bufferView", path)?,
        component_type,
        count: req_uint(obj, "count", path)?,
        element_type: req_string(obj, "type", path)?,
    })
}

fn parse_buffer(obj: &Map<String, Value>, path: &str) -> Result<Buffer> {
    Ok(Buffer {
        byte_length: req_uint(obj, "byteLength", path)?,
        uri: opt_string(obj, "uri", path)?,
    })
}

fn parse_buffer_view(obj: &Map<String, Value>, path: &str) -> Result<BufferView> {
    Ok(BufferView {
        buffer: req_index(obj, "buffer", path)?,
        byte_offset: opt_uint(obj, "byteOffset", path)?.unwrap_or(0),
        byte_length: req_uint(obj, "byteLength", path)?,
    })
}

// ============================================================================
// Projection helpers
// ============================================================================

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn malformed(path: impl Into<String>, detail: impl Into<String>) -> GlbError {
    GlbError::MalformedDocument {
        path: path.into(),
        detail: detail.into(),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(path, format!("expected object, found {}", kind_of(value))))
}

/// Parse an optional top-level sequence; an absent key is an empty sequence.
fn parse_seq<T>(
    root: &Map<String, Value>,
    key: &str,
    parse: fn(&Map<String, Value>, &str) -> Result<T>,
) -> Result<Vec<T>> {
    opt_seq(root, key, "", parse)
}

fn opt_seq<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    parse: fn(&Map<String, Value>, &str) -> Result<T>,
) -> Result<Vec<T>> {
    let field_path = join(path, key);
    match obj.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = format!("{field_path}[{i}]");
                parse(as_object(item, &item_path)?, &item_path)
            })
            .collect(),
        Some(other) => Err(malformed(
            field_path,
            format!("expected array, found {}", kind_of(other)),
        )),
    }
}

fn req_seq<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    parse: fn(&Map<String, Value>, &str) -> Result<T>,
) -> Result<Vec<T>> {
    if !obj.contains_key(key) {
        return Err(GlbError::MissingRequiredField { path: join(path, key) });
    }
    opt_seq(obj, key, path, parse)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn opt_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(malformed(
            join(path, key),
            format!("expected string, found {}", kind_of(other)),
        )),
    }
}

fn req_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    opt_string(obj, key, path)?
        .ok_or_else(|| GlbError::MissingRequiredField { path: join(path, key) })
}

/// Interpret a value as a non-negative integer index. Values that do not
/// fit the platform's `usize` can never be valid indices either.
fn value_as_index(value: &Value, path: &str) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| GlbError::InvalidIndex { path: path.to_string() })
}

fn opt_index(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<usize>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => value_as_index(v, &join(path, key)).map(Some),
    }
}

fn req_index(obj: &Map<String, Value>, key: &str, path: &str) -> Result<usize> {
    match obj.get(key) {
        None => Err(GlbError::MissingRequiredField { path: join(path, key) }),
        Some(v) => value_as_index(v, &join(path, key)),
    }
}

fn opt_index_list(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Vec<usize>> {
    let field_path = join(path, key);
    match obj.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| value_as_index(item, &format!("{field_path}[{i}]")))
            .collect(),
        Some(other) => Err(malformed(
            field_path,
            format!("expected array, found {}", kind_of(other)),
        )),
    }
}

/// Non-negative integer that is a size or count rather than an index. Must
/// fit the platform's `usize`; no silent truncation.
fn opt_uint(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<usize>> {
    let value = match obj.get(key) {
        None => return Ok(None),
        Some(v) => v,
    };
    let n = value.as_u64().ok_or_else(|| {
        malformed(
            join(path, key),
            format!("expected non-negative integer, found {}", kind_of(value)),
        )
    })?;
    let n = usize::try_from(n)
        .map_err(|_| malformed(join(path, key), "value exceeds the platform size limit"))?;
    Ok(Some(n))
}

fn req_uint(obj: &Map<String, Value>, key: &str, path: &str) -> Result<usize> {
    opt_uint(obj, key, path)?
        .ok_or_else(|| GlbError::MissingRequiredField { path: join(path, key) })
}

// ============================================================================
// Tests
// ============================================================================
