// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered key/value parameters attached to an analytics event.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat, insertion-ordered map of event parameters.
///
/// Values may be strings, numbers, booleans, arrays or nested objects. The
/// order in which keys were first inserted is preserved, which keeps the
/// serialized `dataEvent` field and recorder payloads deterministic.
///
/// # Example
///
/// ```
/// use tally_analytics_core::EventParams;
///
/// let params = EventParams::new()
///     .insert("role", "picker")
///     .insert("warehouse", "palermo")
///     .insert("attempts", 3);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventParams {
	inner: Map<String, Value>,
}

impl EventParams {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair (builder pattern).
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.set(key, value);
		self
	}

	/// Inserts a key-value pair in place, returning the previous value.
	pub fn set<K, V>(&mut self, key: K, value: V) -> Option<Value>
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into())
	}

	/// Merges another map into this one.
	///
	/// If both contain the same key, the value from `other` takes precedence.
	pub fn merge(mut self, other: EventParams) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Removes a key, returning its value if it was present.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	/// Returns true if there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns true if `key` is present, whatever its value.
	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Gets a value by key if it is a string.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.inner.get(key).and_then(Value::as_str)
	}

	/// Iterates over the keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &String> {
		self.inner.keys()
	}

	/// Iterates over the parameters in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.inner.iter()
	}

	/// Converts the parameters into a `serde_json::Value` object.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}

	/// Serializes the parameters as compact JSON.
	pub fn to_json_string(&self) -> serde_json::Result<String> {
		serde_json::to_string(&self.inner)
	}
}

impl From<EventParams> for Value {
	fn from(params: EventParams) -> Self {
		params.into_value()
	}
}

impl From<Value> for EventParams {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for EventParams {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for EventParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();
		for (k, v) in iter {
			params.set(k, v);
		}
		params
	}
}

impl IntoIterator for EventParams {
	type Item = (String, Value);
	type IntoIter = serde_json::map::IntoIter;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.into_iter()
	}
}

/// Returns whether a value counts as present.
///
/// `null`, `false`, zero and the empty string are falsy. Arrays and objects
/// are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}
