//! Hierarchical texture sets
//!
//! A [`TextureSet`] mirrors one object folder inside a pack: the images that
//! sit directly in the folder become the node's textures, and every
//! sub-folder becomes a child node named after it. The root node of an
//! object has an empty name and applies to the target object itself.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::image_loader::{ImageData, ImageDecoder};
use super::AssetError;
use crate::core::config::DecoratorConfig;

/// A decoded pack image, named after its file stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    name: String,
    image: ImageData,
}

impl Texture {
    /// Wrap decoded image data under `name`
    pub fn new(name: impl Into<String>, image: ImageData) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    /// Texture name (the file stem it was loaded from)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded pixels
    pub const fn image(&self) -> &ImageData {
        &self.image
    }
}

/// Shared handle to an immutable texture
pub type TextureHandle = Arc<Texture>;

/// One node of a pack's texture tree
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    name: String,
    textures: HashMap<String, TextureHandle>,
    children: Vec<TextureSet>,
}

impl TextureSet {
    /// Create an empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a node from `dir`
    ///
    /// Files whose extension is accepted by `config` are decoded into
    /// textures keyed by file stem; every sub-directory becomes a child node.
    /// Entries are visited in name order. Any read or decode failure aborts
    /// the whole load.
    pub fn load_from_directory(
        name: impl Into<String>,
        dir: &Path,
        decoder: &dyn ImageDecoder,
        config: &DecoratorConfig,
    ) -> Result<Self, AssetError> {
        if !dir.is_dir() {
            return Err(AssetError::NotADirectory(dir.to_path_buf()));
        }

        let mut set = Self::new(name);

        for path in sorted_entries(dir)? {
            if path.is_dir() {
                let child_name = file_name_of(&path);
                let child = Self::load_from_directory(child_name, &path, decoder, config)?;
                set.children.push(child);
                continue;
            }

            let accepted = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| config.accepts_extension(ext));
            if !accepted {
                continue;
            }

            let bytes = fs::read(&path).map_err(|source| AssetError::Io {
                path: path.clone(),
                source,
            })?;
            let image = decoder.decode(&bytes).map_err(|source| AssetError::Decode {
                path: path.clone(),
                source,
            })?;

            let texture_name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            log::debug!(
                "Loaded texture {} ({}x{}) from {}",
                texture_name,
                image.width,
                image.height,
                path.display()
            );

            if set.textures.contains_key(&texture_name) {
                log::warn!("Duplicate texture name {} in {}, keeping the last one", texture_name, dir.display());
            }
            set.textures
                .insert(texture_name.clone(), Arc::new(Texture::new(texture_name, image)));
        }

        Ok(set)
    }

    /// Copy `source`'s textures and children into a node named `new_name`
    ///
    /// The collections are cloned, the texture handles are shared.
    pub fn copy_with_name(new_name: impl Into<String>, source: &Self) -> Self {
        Self {
            name: new_name.into(),
            textures: source.textures.clone(),
            children: source.children.clone(),
        }
    }

    /// Add a texture while building a set in code
    #[must_use]
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.textures
            .insert(texture.name().to_string(), Arc::new(texture));
        self
    }

    /// Add a child node while building a set in code
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Object name this node applies to; empty for the root
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is an object root (applies to the target itself)
    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Look up a texture by name
    pub fn texture(&self, name: &str) -> Option<&TextureHandle> {
        self.textures.get(name)
    }

    /// All textures of this node
    pub const fn textures(&self) -> &HashMap<String, TextureHandle> {
        &self.textures
    }

    /// Child nodes in load order
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Whether this node holds at least one texture
    pub fn has_textures(&self) -> bool {
        !self.textures.is_empty()
    }

    /// Whether this node has at least one child
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of textures held directly by this node
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Directory entries sorted by file name
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let io_err = |source: std::io::Error| AssetError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort();
    Ok(entries)
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DefaultImageDecoder;

    fn write_png(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]))
            .save(path)
            .unwrap();
    }

    fn solid(name: &str) -> Texture {
        Texture::new(name, ImageData::solid_color(1, 1, [0, 0, 0, 255]))
    }

    #[test]
    fn test_load_counts_files_and_folders() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("House");
        write_png(&root.join("roof_d.png"));
        write_png(&root.join("roof_n.png"));
        write_png(&root.join("Garage").join("door_d.png"));
        write_png(&root.join("Shed").join("Window").join("glass_d.png"));
        fs::write(root.join("notes.txt"), "not an image").unwrap();

        let set = TextureSet::load_from_directory("", &root, &DefaultImageDecoder, &DecoratorConfig::default())
            .unwrap();

        assert!(set.is_root());
        assert_eq!(set.texture_count(), 2);
        assert_eq!(set.child_count(), 2);
        assert!(set.texture("roof_d").is_some());
        assert_eq!(set.texture("roof_n").unwrap().name(), "roof_n");

        let names: Vec<&str> = set.children().iter().map(TextureSet::name).collect();
        assert_eq!(names, vec!["Garage", "Shed"]);

        let shed = &set.children()[1];
        assert!(!shed.has_textures());
        assert!(shed.has_children());
        assert_eq!(shed.children()[0].name(), "Window");
        assert_eq!(shed.children()[0].texture_count(), 1);
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("hull_d.png"));
        fs::rename(dir.path().join("hull_d.png"), dir.path().join("hull_d.PNG")).unwrap();

        let set = TextureSet::load_from_directory("", dir.path(), &DefaultImageDecoder, &DecoratorConfig::default())
            .unwrap();
        assert!(set.texture("hull_d").is_some());
    }

    #[test]
    fn test_undecodable_file_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("good_d.png"));
        fs::write(dir.path().join("bad_d.png"), b"garbage").unwrap();

        let result = TextureSet::load_from_directory("", dir.path(), &DefaultImageDecoder, &DecoratorConfig::default());
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let result = TextureSet::load_from_directory(
            "",
            Path::new("no/such/folder"),
            &DefaultImageDecoder,
            &DecoratorConfig::default(),
        );
        assert!(matches!(result, Err(AssetError::NotADirectory(_))));
    }

    #[test]
    fn test_copy_is_structurally_independent() {
        let source = TextureSet::new("")
            .with_texture(solid("roof_d"))
            .with_child(TextureSet::new("Garage").with_texture(solid("door_d")));

        let mut copy = TextureSet::copy_with_name("Barn", &source);
        assert_eq!(copy.name(), "Barn");
        assert!(Arc::ptr_eq(copy.texture("roof_d").unwrap(), source.texture("roof_d").unwrap()));

        copy.textures.clear();
        copy.children.push(TextureSet::new("Silo"));
        copy.children[0].textures.clear();

        assert_eq!(source.texture_count(), 1);
        assert_eq!(source.child_count(), 1);
        assert_eq!(source.children()[0].texture_count(), 1);
    }

    #[test]
    fn test_presence_checks_mean_non_empty() {
        let empty = TextureSet::new("Garage");
        assert!(!empty.has_textures());
        assert!(!empty.has_children());

        let filled = TextureSet::new("Garage").with_texture(solid("door_d"));
        assert!(filled.has_textures());
    }
}
