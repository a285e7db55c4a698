// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::error::ConfigError;
use super::AnalyticsConfigLayer;

pub const ENV_APP_VERSION: &str = "TALLY_ANALYTICS_APP_VERSION";
pub const ENV_DEBUG: &str = "TALLY_ANALYTICS_DEBUG";
pub const ENV_ENABLED: &str = "TALLY_ANALYTICS_ENABLED";
pub const ENV_GATED: &str = "TALLY_ANALYTICS_GATED";
pub const ENV_TRACKED_FIELDS: &str = "TALLY_ANALYTICS_TRACKED_FIELDS";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<AnalyticsConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<AnalyticsConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(AnalyticsConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<AnalyticsConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(AnalyticsConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path)?;

		let layer: AnalyticsConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Convention: `TALLY_ANALYTICS_<FIELD>`
pub struct EnvSource {
	lookup: EnvLookup,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn new() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup` instead of the process environment.
	pub fn with_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name)
			.map(|v| v.trim().to_string())
			.filter(|v| !v.is_empty())
	}

	fn bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		match self.var(name) {
			Some(v) => parse_bool(&v).map(Some).ok_or_else(|| {
				ConfigError::invalid_value(name, format!("invalid boolean value '{v}'"))
			}),
			None => Ok(None),
		}
	}

	fn list(&self, name: &str) -> Option<Vec<String>> {
		self.var(name).map(|v| {
			v.split(',')
				.map(|s| s.trim().to_string())
				.filter(|s| !s.is_empty())
				.collect()
		})
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<AnalyticsConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(AnalyticsConfigLayer {
			app_version: self.var(ENV_APP_VERSION),
			debug_mode: self.bool(ENV_DEBUG)?,
			enabled: self.bool(ENV_ENABLED)?,
			gate_incomplete_sessions: self.bool(ENV_GATED)?,
			tracked_fields: self.list(ENV_TRACKED_FIELDS),
		})
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	if value.eq_ignore_ascii_case("true") || value == "1" {
		Some(true)
	} else if value.eq_ignore_ascii_case("false") || value == "0" {
		Some(false)
	} else {
		None
	}
}
