//! Engine context
//!
//! [`Decorator`] owns everything the repaint needs: the loaded pack
//! registry, the resolver settings and the shuffle RNG. It is built once by
//! loading packs from disk and repaints exactly once, when the host reports
//! that its scene is ready.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::assets::{AssetError, DefaultImageDecoder, ImageDecoder, LoadReport, ObjectRegistration, PackRegistry};
use crate::core::config::{ConfigError, DecoratorConfig};
use crate::render::{assign_round_robin, MaterialResolver};
use crate::scene::{SceneHost, TargetCache};

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Pack loading failed; no engine was built
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration was rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Lifecycle of the one-shot repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoratorState {
    /// Waiting for the host's ready signal
    NotStarted,
    /// Repaint in progress
    Running,
    /// Repaint done; further ready signals are ignored
    Completed,
}

/// What happened to one registration or one instance during the repaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepaintOutcome {
    /// At least one texture was bound on the instance
    Applied {
        /// Object name
        object: String,
        /// Pack assigned to the instance
        pack: String,
        /// Position of the instance in host order
        instance: usize,
    },
    /// The instance was found but no material matched
    NoMatch {
        /// Object name
        object: String,
        /// Pack assigned to the instance
        pack: String,
        /// Position of the instance in host order
        instance: usize,
    },
    /// No live instance carries this name
    TargetNotFound {
        /// Object name
        object: String,
    },
    /// The registration has no packs
    NoPacks {
        /// Object name
        object: String,
    },
}

/// Result of a full repaint pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepaintReport {
    /// Outcomes in registration order, then instance order
    pub outcomes: Vec<RepaintOutcome>,
}

impl RepaintReport {
    /// Instances that received at least one texture
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RepaintOutcome::Applied { .. }))
            .count()
    }

    /// Instances that matched nothing
    pub fn no_match_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RepaintOutcome::NoMatch { .. }))
            .count()
    }

    /// Object names with no live instance
    pub fn missing_targets(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RepaintOutcome::TargetNotFound { object } => Some(object.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pack assigned to instance `instance` of `object`
    pub fn pack_for(&self, object: &str, instance: usize) -> Option<&str> {
        self.outcomes.iter().find_map(|outcome| match outcome {
            RepaintOutcome::Applied { object: o, pack, instance: i }
            | RepaintOutcome::NoMatch { object: o, pack, instance: i }
                if o == object && *i == instance =>
            {
                Some(pack.as_str())
            }
            _ => None,
        })
    }
}

/// Texture pack engine context
pub struct Decorator {
    config: DecoratorConfig,
    registry: PackRegistry,
    load_report: LoadReport,
    resolver: MaterialResolver,
    rng: StdRng,
    state: DecoratorState,
}

impl Decorator {
    /// Load every pack under `config.textures_root` with the default decoder
    pub fn load(config: DecoratorConfig) -> Result<Self, EngineError> {
        Self::load_with_decoder(config, &DefaultImageDecoder)
    }

    /// Load every pack with a host-provided decoder
    pub fn load_with_decoder(config: DecoratorConfig, decoder: &dyn ImageDecoder) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Loading texture packs from {}", config.textures_root.display());

        let (registry, load_report) = PackRegistry::load(&config, decoder).map_err(|e| {
            log::error!("Texture pack loading failed: {}", e);
            e
        })?;

        Ok(Self::with_registry(config, registry, load_report))
    }

    /// Wrap an already built registry
    pub fn with_registry(config: DecoratorConfig, registry: PackRegistry, load_report: LoadReport) -> Self {
        let rng = config
            .shuffle_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self {
            resolver: MaterialResolver::new(config.unresolved_node_policy),
            config,
            registry,
            load_report,
            rng,
            state: DecoratorState::NotStarted,
        }
    }

    /// Host ready signal
    ///
    /// The first call snapshots the live targets and repaints them; every
    /// later call does nothing and returns `None`.
    pub fn on_ready<H: SceneHost>(&mut self, host: &mut H) -> Option<RepaintReport> {
        if self.state != DecoratorState::NotStarted {
            log::debug!("Ready signal ignored, repaint already {:?}", self.state);
            return None;
        }
        self.state = DecoratorState::Running;

        let cache = TargetCache::snapshot(&*host, self.registry.target_names());
        let report = self.repaint_all(&cache, host);

        self.state = DecoratorState::Completed;
        log::info!(
            "Repaint finished: {} applied, {} without match, {} missing target(s)",
            report.applied_count(),
            report.no_match_count(),
            report.missing_targets().len()
        );
        Some(report)
    }

    /// Repaint every registration against `cache`
    pub fn repaint_all<H: SceneHost>(&mut self, cache: &TargetCache<H::Target>, host: &mut H) -> RepaintReport {
        let mut report = RepaintReport::default();
        for registration in self.registry.registrations() {
            Self::repaint_registration(registration, cache, host, &self.resolver, &mut self.rng, &mut report);
        }
        report
    }

    fn repaint_registration<H: SceneHost>(
        registration: &ObjectRegistration,
        cache: &TargetCache<H::Target>,
        host: &mut H,
        resolver: &MaterialResolver,
        rng: &mut StdRng,
        report: &mut RepaintReport,
    ) {
        let object = registration.object_name();

        let instances = cache.instances(object);
        if instances.is_empty() {
            log::warn!("Failed to find any target object {}", object);
            report.outcomes.push(RepaintOutcome::TargetNotFound {
                object: object.to_string(),
            });
            return;
        }

        if registration.packs().is_empty() {
            log::warn!("Something's wrong - object {} has no textures loaded", object);
            report.outcomes.push(RepaintOutcome::NoPacks {
                object: object.to_string(),
            });
            return;
        }

        for (instance, (target, pack)) in assign_round_robin(instances, registration.packs(), rng)
            .into_iter()
            .enumerate()
        {
            log::debug!("{} #{} gets pack {}", object, instance, pack.pack_name());
            let changed = resolver.repaint(pack.textures(), &target, host);

            let object = object.to_string();
            let pack = pack.pack_name().to_string();
            report.outcomes.push(if changed {
                RepaintOutcome::Applied { object, pack, instance }
            } else {
                RepaintOutcome::NoMatch { object, pack, instance }
            });
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DecoratorState {
        self.state
    }

    /// Loaded pack registry
    pub const fn registry(&self) -> &PackRegistry {
        &self.registry
    }

    /// Summary of the pack load
    pub const fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Active configuration
    pub const fn config(&self) -> &DecoratorConfig {
        &self.config
    }
}
