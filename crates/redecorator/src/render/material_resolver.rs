//! Material resolver
//!
//! Rebinds material textures on one target from one pack's texture tree.
//!
//! A material is only eligible if it has a diffuse texture bound. The
//! diffuse name gives the naming prefix (`hull_2d` → `hull`), and companion
//! maps are looked up first by the exact name already bound in their slot,
//! then by `<prefix>_n` / `<prefix>_s`. The specular match is also bound to
//! the occlusion slot. Emission is left alone.

use crate::assets::{TextureHandle, TextureSet};
use crate::core::config::UnresolvedNodePolicy;
use crate::scene::{SceneHost, TextureSlot};

/// Suffix of normal maps in the naming convention
pub const NORMAL_SUFFIX: &str = "_n";
/// Suffix of specular maps in the naming convention
pub const SPECULAR_SUFFIX: &str = "_s";

/// Naming prefix of a diffuse texture name
///
/// Returns the shortest non-empty prefix followed by `_d` or `_<digits>d`,
/// e.g. `hull_2d` and `hull_d` both give `hull`. `None` when the name does
/// not follow the convention.
pub fn diffuse_prefix(name: &str) -> Option<&str> {
    name.char_indices()
        .filter(|&(index, ch)| index > 0 && ch == '_')
        .find(|&(index, _)| {
            let rest = name[index + 1..].trim_start_matches(|c: char| c.is_ascii_digit());
            rest.starts_with('d')
        })
        .map(|(index, _)| &name[..index])
}

/// Applies texture trees to live targets
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialResolver {
    policy: UnresolvedNodePolicy,
}

impl MaterialResolver {
    /// Create a resolver with the given unresolved node policy
    pub const fn new(policy: UnresolvedNodePolicy) -> Self {
        Self { policy }
    }

    /// Repaint `target` from `set` and its children
    ///
    /// Returns whether any texture was bound anywhere in the subtree.
    pub fn repaint<H: SceneHost>(&self, set: &TextureSet, target: &H::Target, host: &mut H) -> bool {
        let effective = if set.is_root() {
            Some(target.clone())
        } else {
            host.find_named_child(target, set.name())
        };

        let mut changed = false;

        let parent_for_children = match effective {
            Some(effective) => {
                if set.has_textures() {
                    changed |= Self::repaint_materials(set, &effective, host);
                }
                effective
            }
            None => match self.policy {
                UnresolvedNodePolicy::SkipBranch => {
                    log::debug!(
                        "No child {} under {}, skipping its textures and children",
                        set.name(),
                        host.object_name(target)
                    );
                    return false;
                }
                UnresolvedNodePolicy::SearchParent => {
                    log::debug!(
                        "No child {} under {}, resolving its children from there",
                        set.name(),
                        host.object_name(target)
                    );
                    target.clone()
                }
            },
        };

        for child in set.children() {
            changed |= self.repaint(child, &parent_for_children, host);
        }

        changed
    }

    /// Rebind the materials of one resolved target
    ///
    /// A node with children only touches materials directly on the target;
    /// nested objects are left to their own nodes.
    fn repaint_materials<H: SceneHost>(set: &TextureSet, target: &H::Target, host: &mut H) -> bool {
        let materials = host.materials_of(target, !set.has_children());

        let mut changed = false;
        for material in &materials {
            changed |= Self::apply_to_material(set, material, host);
        }

        let target_name = host.object_name(target);
        if changed {
            log::info!("Applied new texture to {}", target_name);
        } else {
            log::info!("Found {} but couldn't match any textures", target_name);
        }

        changed
    }

    fn apply_to_material<H: SceneHost>(set: &TextureSet, material: &H::Material, host: &mut H) -> bool {
        let Some(diffuse_name) = host.bound_texture_name(material, TextureSlot::Diffuse) else {
            return false;
        };
        let prefix = diffuse_prefix(&diffuse_name).unwrap_or_default();

        let mut changed = false;

        if let Some(texture) = set.texture(&diffuse_name) {
            host.bind_texture(material, TextureSlot::Diffuse, texture);
            changed = true;
        }

        if let Some(texture) = Self::companion(set, material, host, TextureSlot::Normal, prefix, NORMAL_SUFFIX) {
            host.bind_texture(material, TextureSlot::Normal, texture);
            changed = true;
        }

        if let Some(texture) = Self::companion(set, material, host, TextureSlot::Specular, prefix, SPECULAR_SUFFIX) {
            host.bind_texture(material, TextureSlot::Specular, texture);
            host.bind_texture(material, TextureSlot::Occlusion, texture);
            changed = true;
        }

        changed
    }

    /// Exact match on the currently bound name, else `<prefix><suffix>`
    fn companion<'s, H: SceneHost>(
        set: &'s TextureSet,
        material: &H::Material,
        host: &H,
        slot: TextureSlot,
        prefix: &str,
        suffix: &str,
    ) -> Option<&'s TextureHandle> {
        host.bound_texture_name(material, slot)
            .and_then(|bound| set.texture(&bound))
            .or_else(|| set.texture(&format!("{prefix}{suffix}")))
    }
}
