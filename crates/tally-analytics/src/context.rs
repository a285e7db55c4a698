// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity, device and network attributes shared by every event.

use serde::{Deserialize, Serialize};
use tally_analytics_core::{field, is_truthy, EventParams, RequiredKeys, SESSION_FIELDS};

use crate::collaborators::Identity;

/// The session attributes attached to every event of one analytics instance.
///
/// Backed by [`EventParams`] so a host can seed extra session attributes
/// (for instance a warehouse code) that custom events later require.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionContext {
	fields: EventParams,
}

impl SessionContext {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a context from caller-supplied seed values (shallow copy).
	pub fn from_seed(seed: EventParams) -> Self {
		Self { fields: seed }
	}

	/// Sets `appVersion` (builder pattern).
	pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
		self.set_field(field::APP_VERSION, app_version);
		self
	}

	/// Gets `appVersion` if it is set.
	pub fn app_version(&self) -> Option<&str> {
		self.get_str(field::APP_VERSION)
	}

	/// Gets a non-empty string field.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.fields.get_str(key).filter(|s| !s.is_empty())
	}

	/// Sets a string field. An empty value removes the field instead.
	pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
		let value = value.into();
		if value.is_empty() {
			self.fields.remove(key);
		} else {
			self.fields.set(key, value);
		}
	}

	/// Returns the keys of `keys` that are absent or falsy, in key order.
	pub fn missing(&self, keys: &RequiredKeys) -> Vec<String> {
		keys.iter()
			.filter(|key| !self.fields.get(key).is_some_and(is_truthy))
			.map(str::to_string)
			.collect()
	}

	/// Returns true if every key of `keys` holds a truthy value.
	pub fn is_complete(&self, keys: &RequiredKeys) -> bool {
		self.missing(keys).is_empty()
	}

	/// Merges looked-up identity attributes, skipping empty ones.
	pub fn apply_identity(&mut self, identity: &Identity) {
		let mapping = [
			(field::USER_EMAIL, &identity.email),
			(field::USER_ID, &identity.subject),
			(field::CLIENT, &identity.tenant_code),
			(field::LANGUAGE, &identity.locale),
		];

		for (key, value) in mapping {
			if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
				self.fields.set(key, value);
			}
		}
	}

	/// Drops everything except `appVersion`.
	pub fn reset_to_app_version(&mut self) {
		let app_version = self.fields.remove(field::APP_VERSION);
		self.fields = EventParams::new();
		if let Some(app_version) = app_version {
			self.fields.set(field::APP_VERSION, app_version);
		}
	}

	/// The standard session fields, with `""` for any that are unknown.
	pub fn basic_fields(&self) -> EventParams {
		SESSION_FIELDS
			.into_iter()
			.map(|key| (key, self.get_str(key).unwrap_or_default().to_string()))
			.collect()
	}

	/// The values this context holds for `keys`, skipping absent and falsy ones.
	pub fn project(&self, keys: &RequiredKeys) -> EventParams {
		keys.iter()
			.filter_map(|key| {
				self.fields
					.get(key)
					.filter(|value| is_truthy(value))
					.map(|value| (key, value.clone()))
			})
			.collect()
	}

	/// Borrows the underlying parameters.
	pub fn as_params(&self) -> &EventParams {
		&self.fields
	}

	/// Returns the number of fields held.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if no field is held.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl From<EventParams> for SessionContext {
	fn from(seed: EventParams) -> Self {
		Self::from_seed(seed)
	}
}
