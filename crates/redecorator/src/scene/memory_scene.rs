//! In-memory scene graph
//!
//! A plain name tree of objects, each carrying a list of materials. Object
//! and material handles are slotmap keys, so they stay valid for the
//! lifetime of the scene.

use std::collections::{HashMap, VecDeque};

use slotmap::{new_key_type, SlotMap};

use super::{SceneHost, TextureSlot};
use crate::assets::TextureHandle;

new_key_type! {
    /// Handle to a scene object
    pub struct NodeKey;
    /// Handle to a material instance
    pub struct MaterialKey;
}

/// What a material slot currently points at
#[derive(Debug, Clone)]
pub enum Binding {
    /// A texture owned by the scene, known only by name
    Original(String),
    /// A pack texture bound by the resolver
    Replaced(TextureHandle),
}

impl Binding {
    /// Name of the bound texture
    pub fn name(&self) -> &str {
        match self {
            Self::Original(name) => name,
            Self::Replaced(texture) => texture.name(),
        }
    }
}

#[derive(Debug)]
struct SceneNode {
    name: String,
    children: Vec<NodeKey>,
    materials: Vec<MaterialKey>,
}

#[derive(Debug)]
struct SceneMaterial {
    /// Declared properties; `None` means declared but unbound
    slots: HashMap<TextureSlot, Option<Binding>>,
    bind_count: usize,
}

/// Slotmap-backed scene implementing [`SceneHost`]
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: SlotMap<NodeKey, SceneNode>,
    roots: Vec<NodeKey>,
    materials: SlotMap<MaterialKey, SceneMaterial>,
}

impl MemoryScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level object
    pub fn add_root(&mut self, name: impl Into<String>) -> NodeKey {
        let key = self.insert_node(name.into());
        self.roots.push(key);
        key
    }

    /// Add an object under `parent`; `None` if `parent` does not exist
    pub fn add_child(&mut self, parent: NodeKey, name: impl Into<String>) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let key = self.insert_node(name.into());
        self.nodes.get_mut(parent)?.children.push(key);
        Some(key)
    }

    fn insert_node(&mut self, name: String) -> NodeKey {
        self.nodes.insert(SceneNode {
            name,
            children: Vec::new(),
            materials: Vec::new(),
        })
    }

    /// Add a material to `node` with every [`TextureSlot`] declared and unbound
    pub fn add_material(&mut self, node: NodeKey) -> Option<MaterialKey> {
        self.add_material_with_slots(node, &TextureSlot::ALL)
    }

    /// Add a material declaring only `slots`
    pub fn add_material_with_slots(
        &mut self,
        node: NodeKey,
        slots: &[TextureSlot],
    ) -> Option<MaterialKey> {
        if !self.nodes.contains_key(node) {
            return None;
        }
        let key = self.materials.insert(SceneMaterial {
            slots: slots.iter().map(|&slot| (slot, None)).collect(),
            bind_count: 0,
        });
        self.nodes.get_mut(node)?.materials.push(key);
        Some(key)
    }

    /// Bind a scene-owned texture by name; ignored for undeclared slots
    pub fn set_original(&mut self, material: MaterialKey, slot: TextureSlot, name: impl Into<String>) {
        if let Some(binding) = self
            .materials
            .get_mut(material)
            .and_then(|mat| mat.slots.get_mut(&slot))
        {
            *binding = Some(Binding::Original(name.into()));
        }
    }

    /// Current binding of `slot`
    pub fn binding(&self, material: MaterialKey, slot: TextureSlot) -> Option<&Binding> {
        self.materials.get(material)?.slots.get(&slot)?.as_ref()
    }

    /// Number of [`SceneHost::bind_texture`] calls made on `material`
    pub fn bind_count(&self, material: MaterialKey) -> usize {
        self.materials.get(material).map_or(0, |mat| mat.bind_count)
    }

    /// Object name
    pub fn name(&self, node: NodeKey) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    /// Top-level objects in insertion order
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    fn collect_materials(&self, node: NodeKey, out: &mut Vec<MaterialKey>) {
        let Some(scene_node) = self.nodes.get(node) else {
            return;
        };
        out.extend_from_slice(&scene_node.materials);
        for &child in &scene_node.children {
            self.collect_materials(child, out);
        }
    }
}

impl SceneHost for MemoryScene {
    type Target = NodeKey;
    type Material = MaterialKey;

    fn object_name(&self, target: &NodeKey) -> String {
        self.name(*target).unwrap_or_default().to_string()
    }

    fn find_live_instances(&self, name: &str) -> Vec<NodeKey> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.name == name)
            .map(|(key, _)| key)
            .collect()
    }

    fn find_named_child(&self, root: &NodeKey, name: &str) -> Option<NodeKey> {
        let mut queue: VecDeque<NodeKey> = self.nodes.get(*root)?.children.iter().copied().collect();

        while let Some(key) = queue.pop_front() {
            let node = self.nodes.get(key)?;
            if node.name == name {
                return Some(key);
            }
            queue.extend(node.children.iter().copied());
        }

        None
    }

    fn materials_of(&self, target: &NodeKey, recursive: bool) -> Vec<MaterialKey> {
        if !recursive {
            return self
                .nodes
                .get(*target)
                .map(|node| node.materials.clone())
                .unwrap_or_default();
        }

        let mut out = Vec::new();
        self.collect_materials(*target, &mut out);
        out
    }

    fn bound_texture_name(&self, material: &MaterialKey, slot: TextureSlot) -> Option<String> {
        self.binding(*material, slot).map(|binding| binding.name().to_string())
    }

    fn bind_texture(&mut self, material: &MaterialKey, slot: TextureSlot, texture: &TextureHandle) {
        let Some(mat) = self.materials.get_mut(*material) else {
            return;
        };
        if let Some(binding) = mat.slots.get_mut(&slot) {
            *binding = Some(Binding::Replaced(TextureHandle::clone(texture)));
            mat.bind_count += 1;
        } else {
            log::debug!("Material has no {} property, skipping bind", slot.property_name());
        }
    }
}
