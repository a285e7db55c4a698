// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tally_analytics_core::{
	EventError, EventKind, EventParams, ParamSplit, RequiredFieldValidator, RequiredKeys,
};

use super::EmitterBase;
use crate::session::Resolution;

const OPERATION: &str = "send_custom_event";

/// Records caller-named events.
///
/// Callers may require keys beyond the defaults; those are validated on the
/// assembled parameters like any other required key.
#[derive(Clone)]
pub struct CustomEmitter {
	base: EmitterBase,
	validator: RequiredFieldValidator,
}

impl CustomEmitter {
	pub fn new(base: EmitterBase) -> Self {
		Self {
			base,
			validator: RequiredFieldValidator::new(EventKind::Custom.default_required_keys()),
		}
	}

	pub async fn send(
		&self,
		resolution: &Resolution,
		event_name: &str,
		params: &EventParams,
		extra_required: &RequiredKeys,
	) -> Option<bool> {
		if self.base.is_gated(OPERATION, resolution) {
			return None;
		}

		let payload = match self.build_payload(event_name, params, extra_required) {
			Ok(payload) => payload,
			Err(err) => return Some(self.base.fail(OPERATION, err.into())),
		};

		Some(self.base.record_event(OPERATION, event_name, payload).await)
	}

	pub fn build_payload(
		&self,
		event_name: &str,
		params: &EventParams,
		extra_required: &RequiredKeys,
	) -> tally_analytics_core::Result<EventParams> {
		if event_name.trim().is_empty() {
			return Err(EventError::MissingEventName);
		}

		self.validator.validate(params, extra_required)?;
		let keys = self.validator.effective_keys(extra_required)?;
		ParamSplit::split(params, &keys, None).into_event_payload()
	}
}
