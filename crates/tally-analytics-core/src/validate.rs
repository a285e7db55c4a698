// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Presence and type checks for required event fields.

use crate::error::{EventError, Result};
use crate::keys::RequiredKeys;
use crate::params::EventParams;

/// Checks that every required key is present as a non-empty string.
///
/// A validator may carry a default key set. Caller-supplied keys extend the
/// defaults; a validator without defaults rejects an empty caller list with
/// [`EventError::MissingRequiredList`].
#[derive(Debug, Clone, Default)]
pub struct RequiredFieldValidator {
	defaults: RequiredKeys,
}

impl RequiredFieldValidator {
	/// Creates a validator that always enforces `defaults`.
	pub fn new(defaults: RequiredKeys) -> Self {
		Self { defaults }
	}

	/// Creates a validator with no default keys.
	pub fn strict() -> Self {
		Self::default()
	}

	/// The keys enforced on every call.
	pub fn defaults(&self) -> &RequiredKeys {
		&self.defaults
	}

	/// Returns the key set a call with `extra` would enforce.
	pub fn effective_keys(&self, extra: &RequiredKeys) -> Result<RequiredKeys> {
		let keys = self.defaults.union(extra);
		if keys.is_empty() {
			return Err(EventError::MissingRequiredList);
		}
		Ok(keys)
	}

	/// Validates `params` against the defaults plus `extra`.
	///
	/// Fails on the first offending key, in key-set order. Never mutates
	/// `params`.
	pub fn validate(&self, params: &EventParams, extra: &RequiredKeys) -> Result<()> {
		if params.is_empty() {
			return Err(EventError::MissingParams);
		}

		let keys = self.effective_keys(extra)?;
		let missing = keys.iter().find(|key| !has_string_value(params, key));
		match missing {
			Some(key) => Err(EventError::missing_field(key)),
			None => Ok(()),
		}
	}
}

fn has_string_value(params: &EventParams, key: &str) -> bool {
	params.get_str(key).is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn valid_params() -> EventParams {
		EventParams::new()
			.insert("appVersion", "1.21.0")
			.insert("client", "janis")
			.insert("userEmail", "janis@janis.im")
			.insert("userId", "1234")
			.insert("language", "en-US")
			.insert("deviceId", "12345")
			.insert("connection", "wifi")
	}

	fn keys(list: &[&str]) -> RequiredKeys {
		list.iter().copied().collect()
	}

	#[test]
	fn test_empty_params_fail() {
		let validator = RequiredFieldValidator::strict();
		assert_eq!(
			validator.validate(&EventParams::new(), &keys(&["a"])),
			Err(EventError::MissingParams)
		);
	}

	#[test]
	fn test_empty_key_list_without_defaults_fails() {
		let validator = RequiredFieldValidator::strict();
		let params = EventParams::new().insert("a", "x");
		assert_eq!(
			validator.validate(&params, &RequiredKeys::new()),
			Err(EventError::MissingRequiredList)
		);
	}

	#[test]
	fn test_empty_key_list_falls_back_to_defaults() {
		let validator = RequiredFieldValidator::new(keys(&["a"]));
		let params = EventParams::new().insert("a", "x");
		assert_eq!(validator.validate(&params, &RequiredKeys::new()), Ok(()));
	}

	#[test]
	fn test_all_required_present_passes() {
		let validator = RequiredFieldValidator::strict();
		let required = keys(&["appVersion", "client", "userEmail"]);
		assert_eq!(validator.validate(&valid_params(), &required), Ok(()));
	}

	#[test]
	fn test_empty_string_value_fails() {
		let validator = RequiredFieldValidator::strict();
		let params = valid_params().insert("appVersion", "");
		assert_eq!(
			validator.validate(&params, &keys(&["appVersion", "client", "userEmail"])),
			Err(EventError::missing_field("appVersion"))
		);
	}

	#[test]
	fn test_non_string_value_fails() {
		let validator = RequiredFieldValidator::strict();
		let params = valid_params().insert("userId", 1234);
		assert_eq!(
			validator.validate(&params, &keys(&["userId"])),
			Err(EventError::missing_field("userId"))
		);
	}

	#[test]
	fn test_defaults_are_extended_by_extra_keys() {
		let validator = RequiredFieldValidator::new(keys(&["client"]));
		let result = validator.validate(&valid_params(), &keys(&["warehouse"]));
		assert_eq!(result, Err(EventError::missing_field("warehouse")));
	}

	#[test]
	fn test_first_missing_key_in_order_is_reported() {
		let validator = RequiredFieldValidator::new(keys(&["client", "warehouse"]));
		let params = EventParams::new().insert("client", "janis");
		assert_eq!(
			validator.validate(&params, &keys(&["shift"])),
			Err(EventError::missing_field("warehouse"))
		);
	}

	#[test]
	fn test_validation_does_not_mutate() {
		let validator = RequiredFieldValidator::strict();
		let params = valid_params();
		let before = params.clone();
		let _ = validator.validate(&params, &keys(&["missing"]));
		assert_eq!(params, before);
	}

	proptest! {
		#[test]
		fn missing_key_is_named(missing in "[a-z]{3,12}") {
			prop_assume!(!valid_params().contains_key(&missing));
			let validator = RequiredFieldValidator::strict();
			let result = validator.validate(&valid_params(), &keys(&["client", &missing]));
			prop_assert_eq!(result, Err(EventError::missing_field(missing.clone())));
		}
	}
}
