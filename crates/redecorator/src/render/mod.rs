//! # Repaint
//!
//! Pack assignment and material rebinding. Assignment decides which pack
//! each live instance gets; the resolver applies that pack's texture tree
//! to the instance's materials.

pub mod assignment;
pub mod material_resolver;

pub use assignment::{assign_round_robin, shuffle, shuffled_order};
pub use material_resolver::{diffuse_prefix, MaterialResolver};
