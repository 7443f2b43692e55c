//! # Core Module
//!
//! Shared configuration types used by the loader, the resolver and the
//! engine context.

pub mod config;

pub use config::{Config, ConfigError, DecoratorConfig, UnresolvedNodePolicy};
