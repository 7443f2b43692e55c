//! # Redecorator
//!
//! Texture pack resolution for live scenes.
//!
//! Packs are folders of images organised by object name. Each object can be
//! covered by several packs; when the host scene is ready, every live
//! instance of an object gets one of its packs (shuffled, then dealt
//! round-robin) and the matching textures are rebound on its materials.
//!
//! ## Pipeline
//!
//! ```text
//! filesystem → TextureSet trees → PackRegistry (+ aliases)
//!            → assignment (pack per instance) → MaterialResolver → host materials
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redecorator::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DecoratorConfig::load_from_file("decorator.toml")?;
//!     redecorator::foundation::logging::init_with_level(&config.log_level);
//!
//!     let mut decorator = Decorator::load(config)?;
//!
//!     // Later, once the host scene has finished loading:
//!     let mut scene = MemoryScene::new();
//!     if let Some(report) = decorator.on_ready(&mut scene) {
//!         println!("{} instance(s) repainted", report.applied_count());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{Decorator, DecoratorState, EngineError, RepaintOutcome, RepaintReport};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{
            AliasError, AssetError, DefaultImageDecoder, ImageData, ImageDecoder, LoadReport, PackEntry,
            PackRegistry, Texture, TextureHandle, TextureSet,
        },
        core::config::{Config, ConfigError, DecoratorConfig, UnresolvedNodePolicy},
        render::{diffuse_prefix, MaterialResolver},
        scene::{MemoryScene, SceneHost, TargetCache, TextureSlot},
        Decorator, DecoratorState, EngineError, RepaintOutcome, RepaintReport,
    };
}
