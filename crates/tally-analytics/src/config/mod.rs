// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the analytics SDK.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`TALLY_ANALYTICS_*`)
//! 2. Config file
//! 3. Built-in defaults
//!
//! ```toml
//! app_version = "1.2.0"
//! debug_mode = false
//! enabled = true
//! gate_incomplete_sessions = true
//! tracked_fields = ["appVersion", "client", "userEmail", "userId", "language"]
//! ```

pub mod error;
pub mod sources;

pub use error::ConfigError;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use serde::{Deserialize, Serialize};
use tally_analytics_core::{RequiredKeys, DEFAULT_TRACKED_FIELDS};
use tracing::{debug, info};

/// Analytics configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
	/// Seeds `appVersion` in the session context.
	pub app_version: Option<String>,
	/// Report swallowed send failures through `tracing`.
	pub debug_mode: bool,
	/// When false every send returns `None` without touching collaborators.
	pub enabled: bool,
	/// When true sends no-op while the session is incomplete.
	pub gate_incomplete_sessions: bool,
	/// Session fields that must be known before a gated send records.
	pub tracked_fields: Vec<String>,
}

impl Default for AnalyticsConfig {
	fn default() -> Self {
		AnalyticsConfigLayer::default().finalize()
	}
}

impl AnalyticsConfig {
	/// The tracked fields as a required-key set.
	pub fn tracked_keys(&self) -> RequiredKeys {
		self.tracked_fields.iter().map(String::as_str).collect()
	}
}

/// Analytics configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfigLayer {
	#[serde(default)]
	pub app_version: Option<String>,
	#[serde(default)]
	pub debug_mode: Option<bool>,
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub gate_incomplete_sessions: Option<bool>,
	#[serde(default)]
	pub tracked_fields: Option<Vec<String>>,
}

impl AnalyticsConfigLayer {
	/// Overlays `other`; its set values win.
	pub fn merge(&mut self, other: AnalyticsConfigLayer) {
		if other.app_version.is_some() {
			self.app_version = other.app_version;
		}
		if other.debug_mode.is_some() {
			self.debug_mode = other.debug_mode;
		}
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.gate_incomplete_sessions.is_some() {
			self.gate_incomplete_sessions = other.gate_incomplete_sessions;
		}
		if other.tracked_fields.is_some() {
			self.tracked_fields = other.tracked_fields;
		}
	}

	/// Fills unset values with defaults.
	pub fn finalize(self) -> AnalyticsConfig {
		let tracked_fields = self
			.tracked_fields
			.filter(|fields| fields.iter().any(|f| !f.is_empty()))
			.unwrap_or_else(|| DEFAULT_TRACKED_FIELDS.iter().map(|f| f.to_string()).collect());

		AnalyticsConfig {
			app_version: self.app_version.filter(|v| !v.is_empty()),
			debug_mode: self.debug_mode.unwrap_or(false),
			enabled: self.enabled.unwrap_or(true),
			gate_incomplete_sessions: self.gate_incomplete_sessions.unwrap_or(true),
			tracked_fields,
		}
	}
}

/// Load configuration from all sources with standard precedence, reading
/// the config file at `config_path`.
pub fn load_config(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<AnalyticsConfig, ConfigError> {
	load_config_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	])
}

/// Load configuration from an explicit set of sources.
pub fn load_config_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<AnalyticsConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AnalyticsConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = merged.finalize();
	info!(
		enabled = config.enabled,
		debug_mode = config.debug_mode,
		gated = config.gate_incomplete_sessions,
		"analytics configuration loaded"
	);
	Ok(config)
}
