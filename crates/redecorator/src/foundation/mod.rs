//! Foundation module - Core utilities shared by every subsystem

pub mod logging;
