// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partitioning of event parameters into required and free-form fields.

use serde_json::Value;

use crate::error::Result;
use crate::format::{lowercase_value, ValueFormatter};
use crate::keys::{field, RequiredKeys};
use crate::params::{is_truthy, EventParams};

/// Event parameters partitioned by a required-key set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSplit {
	/// Required fields, already normalized to strings.
	pub required: EventParams,
	/// Everything else with a truthy value, untouched.
	pub remaining: EventParams,
}

impl ParamSplit {
	/// Splits `params` by `keys`.
	///
	/// Required values go through `formatter`, or are lowercased when no
	/// formatter is given; a key whose value normalizes to nothing is left
	/// out. Other keys are kept verbatim when their value is truthy. Both
	/// partitions keep the insertion order of `params`.
	///
	/// With no keys at all, every parameter is returned as remaining.
	pub fn split(
		params: &EventParams,
		keys: &RequiredKeys,
		formatter: Option<ValueFormatter>,
	) -> Self {
		if params.is_empty() {
			return Self::default();
		}

		if keys.is_empty() {
			return Self {
				required: EventParams::new(),
				remaining: params.clone(),
			};
		}

		let normalize = formatter.unwrap_or(lowercase_value);
		let mut split = Self::default();

		for (key, value) in params.iter() {
			if keys.contains(key) {
				if let Some(normalized) = normalize(value).filter(|s| !s.is_empty()) {
					split.required.set(key.clone(), normalized);
				}
			} else if is_truthy(value) {
				split.remaining.set(key.clone(), value.clone());
			}
		}

		split
	}

	/// Builds a generic event payload.
	///
	/// Required fields are copied as top-level keys. Remaining fields, when
	/// there are any, are serialized as one JSON string under `dataEvent`.
	pub fn into_event_payload(self) -> Result<EventParams> {
		let ParamSplit {
			mut required,
			remaining,
		} = self;

		if !remaining.is_empty() {
			let data = remaining.to_json_string()?;
			required.set(field::DATA_EVENT, Value::String(data));
		}

		Ok(required)
	}

	/// Builds a flat payload with remaining fields next to the required ones.
	///
	/// Required values win over remaining values of the same key.
	pub fn into_flat_payload(self) -> EventParams {
		self.remaining.merge(self.required)
	}
}
