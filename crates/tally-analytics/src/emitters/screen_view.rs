// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tally_analytics_core::{
	field, is_truthy, EventKind, EventParams, RequiredFieldValidator, RequiredKeys,
};

use super::EmitterBase;
use crate::session::Resolution;

const OPERATION: &str = "send_screen_tracking";

/// Records screen views through the recorder's screen-view operation.
#[derive(Clone)]
pub struct ScreenViewEmitter {
	base: EmitterBase,
	validator: RequiredFieldValidator,
}

impl ScreenViewEmitter {
	pub fn new(base: EmitterBase) -> Self {
		Self {
			base,
			validator: RequiredFieldValidator::new(EventKind::ScreenView.default_required_keys()),
		}
	}

	pub async fn send(
		&self,
		resolution: &Resolution,
		screen_name: &str,
		screen_class: Option<&str>,
		session: &EventParams,
	) -> Option<bool> {
		if self.base.is_gated(OPERATION, resolution) {
			return None;
		}

		let payload = match self.build_payload(screen_name, screen_class, session) {
			Ok(payload) => payload,
			Err(err) => return Some(self.base.fail(OPERATION, err.into())),
		};

		Some(self.base.record_screen_view(OPERATION, payload).await)
	}

	/// Builds `{screen_name, screen_class?, ...session}`.
	///
	/// Names are recorded verbatim. Session values that are falsy are left
	/// out, and session keys never replace the screen fields.
	pub fn build_payload(
		&self,
		screen_name: &str,
		screen_class: Option<&str>,
		session: &EventParams,
	) -> tally_analytics_core::Result<EventParams> {
		let named = EventParams::new().insert(field::SCREEN_NAME, screen_name);
		self.validator.validate(&named, &RequiredKeys::new())?;

		let mut payload = EventParams::new().insert(field::SCREEN_VIEW_NAME, screen_name);
		if let Some(class) = screen_class.filter(|c| !c.is_empty()) {
			payload.set(field::SCREEN_VIEW_CLASS, class);
		}

		for (key, value) in session.iter() {
			if is_truthy(value) && !payload.contains_key(key) {
				payload.set(key.clone(), value.clone());
			}
		}

		Ok(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagnostics::DiagnosticSink;
	use crate::emitters::testing::{resolution, Call, MemoryRecorder};
	use crate::emitters::GateMode;
	use std::sync::Arc;
	use tally_analytics_core::EventError;

	fn session() -> EventParams {
		EventParams::new()
			.insert("userEmail", "a@b.com")
			.insert("userId", "u1")
			.insert("client", "t1")
			.insert("appVersion", "1.2.0")
			.insert("language", "en-US")
			.insert("connection", "wifi")
			.insert("deviceId", "")
	}

	fn emitter(recorder: Arc<MemoryRecorder>) -> ScreenViewEmitter {
		ScreenViewEmitter::new(EmitterBase::new(recorder, DiagnosticSink::default(), GateMode::Gated))
	}

	#[test]
	fn test_payload_shape() {
		let recorder = Arc::new(MemoryRecorder::default());
		let payload = emitter(recorder)
			.build_payload("Home", Some("HomeScreen"), &session())
			.unwrap();

		assert_eq!(payload.get_str("screen_name"), Some("Home"));
		assert_eq!(payload.get_str("screen_class"), Some("HomeScreen"));
		assert_eq!(payload.get_str("connection"), Some("wifi"));
		assert!(!payload.contains_key("deviceId"));
		assert_eq!(payload.len(), 8);
	}

	#[test]
	fn test_empty_class_is_omitted() {
		let recorder = Arc::new(MemoryRecorder::default());
		let payload = emitter(recorder)
			.build_payload("Home", Some(""), &EventParams::new())
			.unwrap();
		assert_eq!(payload, EventParams::new().insert("screen_name", "Home"));
	}

	#[test]
	fn test_empty_screen_name_is_rejected() {
		let recorder = Arc::new(MemoryRecorder::default());
		let err = emitter(recorder)
			.build_payload("", None, &session())
			.unwrap_err();
		assert_eq!(err, EventError::missing_field("screenName"));
	}

	#[tokio::test]
	async fn send_uses_screen_view_operation() {
		let recorder = Arc::new(MemoryRecorder::default());
		let result = emitter(recorder.clone())
			.send(&resolution(true), "Home", None, &session())
			.await;

		assert_eq!(result, Some(true));
		assert!(matches!(recorder.calls().as_slice(), [Call::ScreenView(_)]));
	}

	#[tokio::test]
	async fn empty_screen_name_returns_false() {
		let recorder = Arc::new(MemoryRecorder::default());
		let result = emitter(recorder.clone())
			.send(&resolution(true), "", None, &session())
			.await;
		assert_eq!(result, Some(false));
		assert!(recorder.calls().is_empty());
	}
}
