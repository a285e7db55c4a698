// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Result type alias for event shaping operations.
pub type Result<T> = std::result::Result<T, EventError>;

/// Reasons an event payload cannot be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
	/// No parameters were supplied at all.
	#[error("event params are required")]
	MissingParams,

	/// Neither the caller nor the validator supplied any required keys.
	#[error("required params were not defined")]
	MissingRequiredList,

	/// A required key is absent, not a string, or empty.
	#[error("{field} property is required")]
	MissingField { field: String },

	/// A custom event was sent without a name.
	#[error("event name is required")]
	MissingEventName,

	/// The free-form data could not be serialized.
	#[error("serialization error: {0}")]
	Serialization(String),
}

impl EventError {
	/// Create a missing field error
	pub fn missing_field(field: impl Into<String>) -> Self {
		Self::MissingField {
			field: field.into(),
		}
	}
}

impl From<serde_json::Error> for EventError {
	fn from(err: serde_json::Error) -> Self {
		EventError::Serialization(err.to_string())
	}
}
