//! # Weft Core
//!
//! Foundation shared by every stage of the weft generator.
//!
//! This crate provides:
//! - The naming law turning storage names into public names
//! - Deterministic names for every generated artifact
//! - The annotation vocabulary read by the classifier
//! - Generator configuration

pub mod annotations;
pub mod config;
pub mod error;
pub mod naming;

pub use config::GeneratorConfig;
pub use error::{ConfigError, Result};
pub use naming::{extract_variant_name, is_identifier, normalize_public_name};
