// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics SDK.

use tally_analytics_core::EventError;
use thiserror::Error;

use crate::config::ConfigError;

/// Analytics SDK errors.
///
/// None of these escape a send operation: emitters report them to the
/// [`DiagnosticSink`](crate::DiagnosticSink) and return `false` or `None`.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// The event payload failed validation or assembly.
	#[error(transparent)]
	Event(#[from] EventError),

	/// The identity lookup rejected.
	#[error("identity lookup failed: {0}")]
	IdentityLookup(String),

	/// The external recorder rejected the event.
	#[error("recorder failed: {0}")]
	Recorder(String),

	/// A mandatory collaborator was not supplied to the builder.
	#[error("missing collaborator: {0}")]
	MissingCollaborator(&'static str),

	/// Configuration could not be loaded.
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),
}

impl AnalyticsError {
	/// Create an identity lookup error
	pub fn identity_lookup(msg: impl Into<String>) -> Self {
		Self::IdentityLookup(msg.into())
	}

	/// Create a recorder error
	pub fn recorder(msg: impl Into<String>) -> Self {
		Self::Recorder(msg.into())
	}

	/// Returns true if the error came from the caller's parameters rather
	/// than a collaborator.
	pub fn is_validation(&self) -> bool {
		matches!(self, AnalyticsError::Event(_))
	}
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
