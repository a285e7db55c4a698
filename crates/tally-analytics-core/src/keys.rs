// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Well-known field names and required-key sets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names of the fields the SDK reads or writes.
pub mod field {
	pub const APP_VERSION: &str = "appVersion";
	pub const USER_EMAIL: &str = "userEmail";
	pub const USER_ID: &str = "userId";
	pub const CLIENT: &str = "client";
	pub const LANGUAGE: &str = "language";
	pub const CONNECTION: &str = "connection";
	pub const DEVICE_ID: &str = "deviceId";

	pub const ACTION_NAME: &str = "actionName";
	pub const SCREEN_NAME: &str = "screenName";

	pub const APP_NAME: &str = "appName";
	pub const DEVICE: &str = "device";
	pub const OS_VERSION: &str = "osVersion";
	pub const SCREEN_SIZE: &str = "screenSize";
	pub const SCREEN_WIDTH: &str = "screenWidth";
	pub const SCREEN_HEIGHT: &str = "screenHeight";

	/// Serialized free-form data of generic events.
	pub const DATA_EVENT: &str = "dataEvent";

	/// Screen-view payload keys, in the recorder's own naming.
	pub const SCREEN_VIEW_NAME: &str = "screen_name";
	pub const SCREEN_VIEW_CLASS: &str = "screen_class";
}

/// Session fields that must all be present for a session to count as complete.
pub const DEFAULT_TRACKED_FIELDS: [&str; 5] = [
	field::APP_VERSION,
	field::CLIENT,
	field::USER_EMAIL,
	field::USER_ID,
	field::LANGUAGE,
];

/// Session attributes copied onto every event.
pub const SESSION_FIELDS: [&str; 7] = [
	field::USER_EMAIL,
	field::USER_ID,
	field::CLIENT,
	field::APP_VERSION,
	field::LANGUAGE,
	field::CONNECTION,
	field::DEVICE_ID,
];

/// An ordered set of required parameter keys.
///
/// Construction filters its input: empty keys and duplicates are dropped and
/// the first occurrence order is kept. Once built the set is an ordinary
/// immutable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RequiredKeys {
	keys: Vec<String>,
}

impl RequiredKeys {
	/// Creates an empty key set.
	pub fn new() -> Self {
		Self { keys: Vec::new() }
	}

	/// Builds a key set from a dynamic JSON value.
	///
	/// Only the non-empty string elements of an array are kept; any other
	/// value produces an empty set.
	pub fn from_json(value: &Value) -> Self {
		match value {
			Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
			_ => Self::new(),
		}
	}

	/// The default tracked session fields.
	pub fn tracked_session() -> Self {
		DEFAULT_TRACKED_FIELDS.into_iter().collect()
	}

	/// Adds a key (builder pattern). Empty and duplicate keys are ignored.
	pub fn with(mut self, key: impl Into<String>) -> Self {
		self.push(key.into());
		self
	}

	/// Returns `self` followed by every key of `other` not already present.
	pub fn union(&self, other: &RequiredKeys) -> Self {
		let mut merged = self.clone();
		for key in &other.keys {
			merged.push(key.clone());
		}
		merged
	}

	/// Returns true if `key` is in the set.
	pub fn contains(&self, key: &str) -> bool {
		self.keys.iter().any(|k| k == key)
	}

	/// Returns true if the set holds no keys.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Returns the number of keys.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Iterates over the keys in order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	fn push(&mut self, key: String) {
		if !key.is_empty() && !self.contains(&key) {
			self.keys.push(key);
		}
	}
}

impl<S: Into<String>> FromIterator<S> for RequiredKeys {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut keys = Self::new();
		for key in iter {
			keys.push(key.into());
		}
		keys
	}
}

impl From<Vec<String>> for RequiredKeys {
	fn from(keys: Vec<String>) -> Self {
		keys.into_iter().collect()
	}
}

impl From<RequiredKeys> for Vec<String> {
	fn from(keys: RequiredKeys) -> Self {
		keys.keys
	}
}

/// The kinds of events the SDK emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
	Action,
	Custom,
	UserInfo,
	ScreenView,
}

impl EventKind {
	/// The event name handed to the recorder.
	///
	/// Custom events are recorded under a caller-chosen name and screen views
	/// through their own recorder call, so both return `None`.
	pub fn event_name(&self) -> Option<&'static str> {
		match self {
			EventKind::Action => Some("action"),
			EventKind::UserInfo => Some("user_info"),
			EventKind::Custom | EventKind::ScreenView => None,
		}
	}

	/// Keys that must be present, as non-empty strings, on every event of this kind.
	pub fn default_required_keys(&self) -> RequiredKeys {
		let keys: &[&str] = match self {
			EventKind::Action => &[
				field::ACTION_NAME,
				field::SCREEN_NAME,
				field::CLIENT,
				field::USER_EMAIL,
				field::USER_ID,
				field::APP_VERSION,
			],
			EventKind::Custom => &[
				field::CLIENT,
				field::USER_EMAIL,
				field::USER_ID,
				field::APP_VERSION,
			],
			EventKind::UserInfo => &[
				field::APP_NAME,
				field::APP_VERSION,
				field::CLIENT,
				field::USER_EMAIL,
				field::USER_ID,
			],
			EventKind::ScreenView => &[field::SCREEN_NAME],
		};
		keys.iter().copied().collect()
	}
}
