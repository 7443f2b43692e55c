//! Pack registry
//!
//! Packs on disk are laid out pack-first:
//!
//! ```text
//! <TexturesRoot>/<PackName>/<ObjectName>/.../<ImageName>.png
//! <TexturesRoot>/<PackName>/aliases.txt
//! ```
//!
//! The registry turns that around and keeps, per object name, the list of
//! packs that carry textures for it. Every registered object name is also a
//! target name the host is asked for when the scene is ready.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::alias_parser::{AliasError, AliasParser};
use super::image_loader::ImageDecoder;
use super::texture_set::{file_name_of, sorted_entries, TextureSet};
use super::AssetError;
use crate::core::config::DecoratorConfig;

/// One pack's texture tree for one object
#[derive(Debug, Clone)]
pub struct PackEntry {
    pack_id: usize,
    pack_name: String,
    textures: TextureSet,
}

impl PackEntry {
    /// Create an entry
    pub fn new(pack_id: usize, pack_name: impl Into<String>, textures: TextureSet) -> Self {
        Self {
            pack_id,
            pack_name: pack_name.into(),
            textures,
        }
    }

    /// Load sequence id; distinct even for packs sharing a name
    pub const fn pack_id(&self) -> usize {
        self.pack_id
    }

    /// Pack folder name
    pub fn pack_name(&self) -> &str {
        &self.pack_name
    }

    /// Root texture set for the object
    pub const fn textures(&self) -> &TextureSet {
        &self.textures
    }
}

/// All packs registered for one object name
#[derive(Debug, Clone)]
pub struct ObjectRegistration {
    object_name: String,
    packs: Vec<PackEntry>,
}

impl ObjectRegistration {
    fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            packs: Vec::new(),
        }
    }

    /// Scene object name
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Registered packs in registration order
    pub fn packs(&self) -> &[PackEntry] {
        &self.packs
    }

    /// Most recent entry registered by `pack_id`
    pub fn pack(&self, pack_id: usize) -> Option<&PackEntry> {
        self.packs.iter().rev().find(|entry| entry.pack_id == pack_id)
    }
}

/// Summary of a registry load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Pack directories scanned
    pub packs_loaded: usize,
    /// Pack entries registered from object folders
    pub entries_registered: usize,
    /// Pack entries synthesized from alias rules
    pub aliases_applied: usize,
    /// Alias lines that were skipped
    pub alias_errors: Vec<AliasError>,
}

/// Object name → packs, plus the set of target names
#[derive(Debug, Default)]
pub struct PackRegistry {
    registrations: Vec<ObjectRegistration>,
    index: HashMap<String, usize>,
    target_names: HashSet<String>,
    next_pack_id: usize,
}

impl PackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `config.textures_root` and load every pack in it
    ///
    /// A missing root yields an empty registry. Asset failures abort the
    /// load; alias problems are logged and collected in the report.
    pub fn load(
        config: &DecoratorConfig,
        decoder: &dyn ImageDecoder,
    ) -> Result<(Self, LoadReport), AssetError> {
        let mut registry = Self::new();
        let mut report = LoadReport::default();
        let root = &config.textures_root;

        if !root.is_dir() {
            log::info!("No texture folder at {}, nothing to load", root.display());
            return Ok((registry, report));
        }

        for pack_dir in sorted_entries(root)? {
            if pack_dir.is_dir() {
                registry.load_pack(&pack_dir, config, decoder, &mut report)?;
            }
        }

        log::info!(
            "Loaded {} pack(s): {} object entries, {} alias entries, {} alias error(s)",
            report.packs_loaded,
            report.entries_registered,
            report.aliases_applied,
            report.alias_errors.len()
        );

        Ok((registry, report))
    }

    /// Load one pack directory, then apply its alias file if present
    pub fn load_pack(
        &mut self,
        pack_dir: &Path,
        config: &DecoratorConfig,
        decoder: &dyn ImageDecoder,
        report: &mut LoadReport,
    ) -> Result<usize, AssetError> {
        let pack_name = file_name_of(pack_dir);
        let pack_id = self.allocate_pack_id();
        log::info!("Loading texture pack {}", pack_name);

        for object_dir in sorted_entries(pack_dir)? {
            if !object_dir.is_dir() {
                continue;
            }

            let object_name = file_name_of(&object_dir);
            let textures = TextureSet::load_from_directory("", &object_dir, decoder, config)?;
            self.register(&object_name, PackEntry::new(pack_id, pack_name.as_str(), textures));
            report.entries_registered += 1;
        }

        let alias_path = pack_dir.join(&config.alias_file_name);
        if alias_path.is_file() {
            let contents = fs::read_to_string(&alias_path).map_err(|source| AssetError::Io {
                path: alias_path.clone(),
                source,
            })?;
            self.apply_aliases(pack_id, &pack_name, &contents, report);
        }

        report.packs_loaded += 1;
        Ok(pack_id)
    }

    /// Apply alias declarations for the pack `pack_id`
    ///
    /// Sources are looked up in this pack only. Each applied alias is
    /// registered before the next line is resolved, so aliases can chain.
    pub fn apply_aliases(
        &mut self,
        pack_id: usize,
        pack_name: &str,
        contents: &str,
        report: &mut LoadReport,
    ) {
        for parsed in AliasParser::parse(pack_name, contents) {
            let rule = match parsed {
                Ok(rule) => rule,
                Err(err) => {
                    log::warn!("Skipping alias: {}", err);
                    report.alias_errors.push(err);
                    continue;
                }
            };

            let source_set = self
                .registration(&rule.source)
                .and_then(|registration| registration.pack(pack_id))
                .map(|entry| TextureSet::copy_with_name(entry.textures().name(), entry.textures()));

            let Some(textures) = source_set else {
                let err = AliasError::MissingSource {
                    pack: pack_name.to_string(),
                    line: rule.line,
                    alias: rule.alias,
                    source_name: rule.source,
                };
                log::warn!("Skipping alias: {}", err);
                report.alias_errors.push(err);
                continue;
            };

            log::debug!("Pack {}: {} uses the textures of {}", pack_name, rule.alias, rule.source);
            self.register(&rule.alias, PackEntry::new(pack_id, pack_name, textures));
            report.aliases_applied += 1;
        }
    }

    /// Reserve the id for a new pack
    pub fn allocate_pack_id(&mut self) -> usize {
        let id = self.next_pack_id;
        self.next_pack_id += 1;
        id
    }

    /// Register `entry` under `object_name`
    pub fn register(&mut self, object_name: &str, entry: PackEntry) {
        let slot = match self.index.get(object_name) {
            Some(&slot) => slot,
            None => {
                self.registrations.push(ObjectRegistration::new(object_name));
                let slot = self.registrations.len() - 1;
                self.index.insert(object_name.to_string(), slot);
                slot
            }
        };

        self.registrations[slot].packs.push(entry);
        self.target_names.insert(object_name.to_string());
    }

    /// Registrations in first-seen order
    pub fn registrations(&self) -> &[ObjectRegistration] {
        &self.registrations
    }

    /// Registration for `object_name`
    pub fn registration(&self, object_name: &str) -> Option<&ObjectRegistration> {
        self.index
            .get(object_name)
            .map(|&slot| &self.registrations[slot])
    }

    /// Every object name with at least one pack
    pub const fn target_names(&self) -> &HashSet<String> {
        &self.target_names
    }

    /// Number of registered object names
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DefaultImageDecoder;
    use std::path::PathBuf;

    fn write_png(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]))
            .save(path)
            .unwrap();
    }

    fn load(root: PathBuf) -> (PackRegistry, LoadReport) {
        PackRegistry::load(&DecoratorConfig::new(root), &DefaultImageDecoder).unwrap()
    }

    #[test]
    fn test_objects_collect_packs_across_pack_folders() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("A/House/roof_d.png"));
        write_png(&dir.path().join("A/Barn/wall_d.png"));
        write_png(&dir.path().join("B/House/roof_d.png"));
        fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

        let (registry, report) = load(dir.path().to_path_buf());

        assert_eq!(report.packs_loaded, 2);
        assert_eq!(report.entries_registered, 3);
        assert_eq!(registry.len(), 2);

        let house = registry.registration("House").unwrap();
        let packs: Vec<&str> = house.packs().iter().map(PackEntry::pack_name).collect();
        assert_eq!(packs, vec!["A", "B"]);
        assert!(house.packs()[0].textures().is_root());

        assert!(registry.target_names().contains("House"));
        assert!(registry.target_names().contains("Barn"));
    }

    #[test]
    fn test_missing_root_is_empty() {
        let (registry, report) = load(PathBuf::from("no/textures/here"));
        assert!(registry.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_decode_failure_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("A/House/roof_d.png"));
        fs::create_dir_all(dir.path().join("B/House")).unwrap();
        fs::write(dir.path().join("B/House/roof_d.png"), b"broken").unwrap();

        let result = PackRegistry::load(&DecoratorConfig::new(dir.path()), &DefaultImageDecoder);
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }

    #[test]
    fn test_alias_copies_source_within_pack() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("A/House/roof_d.png"));
        write_png(&dir.path().join("A/House/Garage/door_d.png"));
        fs::write(dir.path().join("A/aliases.txt"), "Barn=House\n").unwrap();

        let (registry, report) = load(dir.path().to_path_buf());
        assert_eq!(report.aliases_applied, 1);
        assert!(report.alias_errors.is_empty());

        let barn = registry.registration("Barn").unwrap();
        assert_eq!(barn.packs().len(), 1);
        assert_eq!(barn.packs()[0].pack_name(), "A");

        let copy = barn.packs()[0].textures();
        let original = registry.registration("House").unwrap().packs()[0].textures();
        assert!(copy.is_root());
        assert_eq!(copy.texture_count(), original.texture_count());
        assert_eq!(copy.children()[0].name(), "Garage");
        assert!(copy.texture("roof_d").is_some());
        assert!(registry.target_names().contains("Barn"));
    }

    #[test]
    fn test_alias_source_must_be_in_same_pack() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("A/House/roof_d.png"));
        write_png(&dir.path().join("B/Shed/wall_d.png"));
        fs::write(dir.path().join("B/aliases.txt"), "Barn=House\n").unwrap();

        let (registry, report) = load(dir.path().to_path_buf());

        assert!(registry.registration("Barn").is_none());
        assert_eq!(
            report.alias_errors,
            vec![AliasError::MissingSource {
                pack: "B".to_string(),
                line: 1,
                alias: "Barn".to_string(),
                source_name: "House".to_string(),
            }]
        );
    }

    #[test]
    fn test_bad_alias_lines_do_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("A/House/roof_d.png"));
        fs::write(
            dir.path().join("A/aliases.txt"),
            "this line is wrong\nBarn=Nowhere\n\nShed=House\nSilo=Shed\n",
        )
        .unwrap();

        let (registry, report) = load(dir.path().to_path_buf());

        assert_eq!(report.aliases_applied, 2);
        assert_eq!(report.alias_errors.len(), 2);
        assert!(matches!(report.alias_errors[0], AliasError::Malformed { line: 1, .. }));
        assert!(matches!(report.alias_errors[1], AliasError::MissingSource { line: 2, .. }));
        assert!(registry.registration("Shed").is_some());
        assert!(registry.registration("Silo").is_some());
    }

    #[test]
    fn test_same_pack_name_twice_stays_distinct() {
        let mut registry = PackRegistry::new();
        let mut report = LoadReport::default();
        let first = registry.allocate_pack_id();
        let second = registry.allocate_pack_id();

        registry.register("House", PackEntry::new(first, "A", TextureSet::new("")));
        registry.register(
            "House",
            PackEntry::new(second, "A", TextureSet::new("").with_child(TextureSet::new("Garage"))),
        );
        registry.apply_aliases(first, "A", "Barn=House", &mut report);

        let barn = registry.registration("Barn").unwrap();
        assert_eq!(registry.registration("House").unwrap().packs().len(), 2);
        assert_eq!(barn.packs()[0].pack_id(), first);
        assert!(!barn.packs()[0].textures().has_children());
    }
}
