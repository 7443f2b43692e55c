//! Host scene interface
//!
//! The engine does not own a scene graph. Whatever owns the live objects
//! implements [`SceneHost`] and hands it to the engine once the scene is
//! ready. [`MemoryScene`] is a self-contained implementation used by tools
//! and tests.

mod memory_scene;
mod target_cache;

pub use memory_scene::{Binding, MaterialKey, MemoryScene, NodeKey};
pub use target_cache::TargetCache;

use crate::assets::TextureHandle;

/// Material texture inputs the resolver knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base color map
    Diffuse,
    /// Normal map
    Normal,
    /// Metallic/gloss map
    Specular,
    /// Ambient occlusion map
    Occlusion,
    /// Emission map; never rebound
    Emission,
}

impl TextureSlot {
    /// Every slot, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Diffuse,
        Self::Normal,
        Self::Specular,
        Self::Occlusion,
        Self::Emission,
    ];

    /// Conventional shader property name for this slot
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::Diffuse => "_MainTex",
            Self::Normal => "_BumpMap",
            Self::Specular => "_MetallicGlossMap",
            Self::Occlusion => "_OcclusionMap",
            Self::Emission => "_EmissionMap",
        }
    }
}

/// Capabilities the engine needs from the host scene
pub trait SceneHost {
    /// Handle to a live scene object
    type Target: Clone;
    /// Handle to a material instance
    type Material;

    /// Name of a live object, for diagnostics
    fn object_name(&self, target: &Self::Target) -> String;

    /// All live objects whose name is exactly `name`
    fn find_live_instances(&self, name: &str) -> Vec<Self::Target>;

    /// Breadth-first search below `root` for a descendant named `name`
    fn find_named_child(&self, root: &Self::Target, name: &str) -> Option<Self::Target>;

    /// Materials on `target` itself, or on its whole subtree when `recursive`
    fn materials_of(&self, target: &Self::Target, recursive: bool) -> Vec<Self::Material>;

    /// Name of the texture bound to `slot`, if the material has one
    fn bound_texture_name(&self, material: &Self::Material, slot: TextureSlot) -> Option<String>;

    /// Bind `texture` to `slot`
    fn bind_texture(&mut self, material: &Self::Material, slot: TextureSlot, texture: &TextureHandle);
}
