//! Configuration module for Sign-to-Text.
//!
//! Provides `AppConfig` (top-level settings with per-mode threshold
//! bundles), `AppPaths` for cross-platform data directories, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ModeProfile, PipelineMode};
