//! Configuration module for the resilience tracker
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings (display, logging, generative backend)

pub mod paths;
pub mod settings;

pub use paths::ResiliencePaths;
pub use settings::{GeminiSettings, Settings};
