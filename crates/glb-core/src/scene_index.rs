//! Name-to-index lookups over a parsed document.
//!
//! The index borrows the [`Document`] and holds one name map per named
//! collection. Duplicate names are permitted by the format; the map keeps the
//! first occurrence's index.

use std::collections::HashMap;

use crate::document::Document;

/// The four named collections a document exposes for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Nodes,
    Meshes,
    Materials,
    Animations,
}

/// Read-only lookup structures over a document. Must not outlive it.
#[derive(Debug)]
pub struct SceneIndex<'a> {
    doc: &'a Document,
    nodes: HashMap<&'a str, usize>,
    meshes: HashMap<&'a str, usize>,
    materials: HashMap<&'a str, usize>,
    animations: HashMap<&'a str, usize>,
}

impl<'a> SceneIndex<'a> {
    pub fn new(doc: &'a Document) -> Self {
        SceneIndex {
            doc,
            nodes: index_names(doc.nodes.iter().map(|n| n.name.as_deref())),
            meshes: index_names(doc.meshes.iter().map(|m| m.name.as_deref())),
            materials: index_names(doc.materials.iter().map(|m| m.name.as_deref())),
            animations: index_names(doc.animations.iter().map(|a| a.name.as_deref())),
        }
    }

    /// Number of entities in the collection.
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Nodes => self.doc.nodes.len(),
            Collection::Meshes => self.doc.meshes.len(),
            Collection::Materials => self.doc.materials.len(),
            Collection::Animations => self.doc.animations.len(),
        }
    }

    /// One entry per entity in original index order; `None` where the entity
    /// has no name. Nothing is synthesized for missing names.
    pub fn names_of(&self, collection: Collection) -> Vec<Option<&'a str>> {
        match collection {
            Collection::Nodes => self.doc.nodes.iter().map(|n| n.name.as_deref()).collect(),
            Collection::Meshes => self.doc.meshes.iter().map(|m| m.name.as_deref()).collect(),
            Collection::Materials => {
                self.doc.materials.iter().map(|m| m.name.as_deref()).collect()
            }
            Collection::Animations => {
                self.doc.animations.iter().map(|a| a.name.as_deref()).collect()
            }
        }
    }

    /// Look up an entity index by name. Duplicates resolve to the first
    /// occurrence.
    pub fn find_by_name(&self, collection: Collection, name: &str) -> Option<usize> {
        let map = match collection {
            Collection::Nodes => &self.nodes,
            Collection::Meshes => &self.meshes,
            Collection::Materials => &self.materials,
            Collection::Animations => &self.animations,
        };
        map.get(name).copied()
    }
}

fn index_names<'a>(names: impl Iterator<Item = Option<&'a str>>) -> HashMap<&'a str, usize> {
    let mut map = HashMap::new();
    for (i, name) in names.enumerate() {
        if let Some(name) = name {
            map.entry(name).or_insert(i);
        }
    }
    map
}
