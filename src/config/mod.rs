// src/config/mod.rs

//! Plan file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML/JSON-backed data model (`model.rs`).
//! - Load a plan file from disk (`loader.rs`).
//! - Validate learner, topic and planner values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{PlanFile, PlannerSection, RawPlanFile};
pub use validate::{validate_planner_section, validate_request};
