// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! App lifecycle events. These carry no session context and are never gated.

use tally_analytics_core::{EventError, EventParams};

use super::EmitterBase;

pub const LOG_OUT_EVENT: &str = "log_out";
pub const MODULE_START_EVENT: &str = "module_start";
pub const MODULE_END_EVENT: &str = "module_end";
pub const SELECTED_LANGUAGE_EVENT: &str = "selected_language";

/// Method recorded when a log out gives none.
pub const DEFAULT_LOG_OUT_METHOD: &str = "manual_logout";

#[derive(Clone)]
pub struct LifecycleEmitter {
	base: EmitterBase,
}

impl LifecycleEmitter {
	pub fn new(base: EmitterBase) -> Self {
		Self { base }
	}

	pub async fn send_app_open(&self) -> bool {
		self.base.record_app_open("send_app_open").await
	}

	pub async fn send_log_out(&self, method: Option<&str>) -> bool {
		let method = method
			.filter(|m| !m.is_empty())
			.unwrap_or(DEFAULT_LOG_OUT_METHOD);
		let payload = EventParams::new().insert("method", method);
		self.base
			.record_event("send_log_out", LOG_OUT_EVENT, payload)
			.await
	}

	pub async fn send_module_started(&self, module: &str, params: EventParams) -> bool {
		self.send_module("send_module_started", MODULE_START_EVENT, module, params)
			.await
	}

	pub async fn send_module_ended(&self, module: &str, params: EventParams) -> bool {
		self.send_module("send_module_ended", MODULE_END_EVENT, module, params)
			.await
	}

	pub async fn send_selected_language(&self, language: &str) -> bool {
		const OPERATION: &str = "send_selected_language";
		if language.is_empty() {
			return self
				.base
				.fail(OPERATION, EventError::missing_field("language").into());
		}

		let payload = EventParams::new().insert("language", language);
		self.base
			.record_event(OPERATION, SELECTED_LANGUAGE_EVENT, payload)
			.await
	}

	async fn send_module(
		&self,
		operation: &str,
		event_name: &str,
		module: &str,
		params: EventParams,
	) -> bool {
		if module.is_empty() {
			return self
				.base
				.fail(operation, EventError::missing_field("module").into());
		}

		let payload = EventParams::new().insert("module", module).merge(params);
		self.base.record_event(operation, event_name, payload).await
	}
}
