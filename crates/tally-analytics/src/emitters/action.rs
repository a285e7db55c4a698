// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tally_analytics_core::{
	format_value, EventKind, EventParams, ParamSplit, RequiredFieldValidator, RequiredKeys,
};

use super::EmitterBase;
use crate::session::Resolution;

const OPERATION: &str = "send_action";

/// Records user interactions as `action` events.
///
/// Required values go through [`format_value`], so `"Button Press"` is
/// recorded as `button_press`. Everything else travels in `dataEvent`.
#[derive(Clone)]
pub struct ActionEmitter {
	base: EmitterBase,
	validator: RequiredFieldValidator,
}

impl ActionEmitter {
	pub fn new(base: EmitterBase) -> Self {
		Self {
			base,
			validator: RequiredFieldValidator::new(EventKind::Action.default_required_keys()),
		}
	}

	/// Sends an action event built from `params`.
	pub async fn send(&self, resolution: &Resolution, params: &EventParams) -> Option<bool> {
		if self.base.is_gated(OPERATION, resolution) {
			return None;
		}

		let payload = match self.build_payload(params) {
			Ok(payload) => payload,
			Err(err) => return Some(self.base.fail(OPERATION, err.into())),
		};

		let event_name = EventKind::Action.event_name().unwrap_or("action");
		Some(self.base.record_event(OPERATION, event_name, payload).await)
	}

	/// Validates and shapes `params` into the recorded payload.
	pub fn build_payload(&self, params: &EventParams) -> tally_analytics_core::Result<EventParams> {
		let extra = RequiredKeys::new();
		self.validator.validate(params, &extra)?;
		let keys = self.validator.effective_keys(&extra)?;
		ParamSplit::split(params, &keys, Some(format_value)).into_event_payload()
	}
}
