// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde_json::Value;
use tally_analytics_core::{
	canonical_string, field, is_truthy, EventKind, EventParams, ParamSplit,
	RequiredFieldValidator, RequiredKeys,
};

use super::EmitterBase;
use crate::session::Resolution;

const OPERATION: &str = "send_user_info";

/// Records app, device and user attributes as a flat `user_info` event.
#[derive(Clone)]
pub struct UserInfoEmitter {
	base: EmitterBase,
	validator: RequiredFieldValidator,
}

impl UserInfoEmitter {
	pub fn new(base: EmitterBase) -> Self {
		Self {
			base,
			validator: RequiredFieldValidator::new(EventKind::UserInfo.default_required_keys()),
		}
	}

	pub async fn send(&self, resolution: &Resolution, params: &EventParams) -> Option<bool> {
		if self.base.is_gated(OPERATION, resolution) {
			return None;
		}

		let payload = match self.build_payload(params) {
			Ok(payload) => payload,
			Err(err) => return Some(self.base.fail(OPERATION, err.into())),
		};

		let event_name = EventKind::UserInfo.event_name().unwrap_or("user_info");
		Some(self.base.record_event(OPERATION, event_name, payload).await)
	}

	/// Validates `params` and flattens them into one payload.
	///
	/// A `screenSize` object becomes `"<width> x <height>"` when both
	/// dimensions are truthy and is dropped otherwise.
	pub fn build_payload(&self, params: &EventParams) -> tally_analytics_core::Result<EventParams> {
		let extra = RequiredKeys::new();
		self.validator.validate(params, &extra)?;
		let keys = self.validator.effective_keys(&extra)?;

		let mut params = params.clone();
		if let Some(size) = params.remove(field::SCREEN_SIZE) {
			if let Some(collapsed) = collapse_screen_size(&size) {
				params.set(field::SCREEN_SIZE, collapsed);
			}
		}

		Ok(ParamSplit::split(&params, &keys, None).into_flat_payload())
	}
}

fn collapse_screen_size(size: &Value) -> Option<String> {
	let width = size.get(field::SCREEN_WIDTH).filter(|v| is_truthy(v))?;
	let height = size.get(field::SCREEN_HEIGHT).filter(|v| is_truthy(v))?;
	Some(format!("{} x {}", dimension(width), dimension(height)))
}

fn dimension(value: &Value) -> String {
	match value {
		Value::Number(n) => match (n.as_i64(), n.as_f64()) {
			(Some(i), _) => i.to_string(),
			(None, Some(f)) => f.to_string(),
			_ => n.to_string(),
		},
		other => canonical_string(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagnostics::DiagnosticSink;
	use crate::emitters::testing::{resolution, Call, MemoryRecorder};
	use crate::emitters::GateMode;
	use serde_json::json;
	use std::sync::Arc;
	use tally_analytics_core::EventError;

	fn params(screen: Value) -> EventParams {
		EventParams::new()
			.insert("userEmail", "a@b.com")
			.insert("userId", "u1")
			.insert("client", "t1")
			.insert("appVersion", "1.2.0")
			.insert("language", "en-US")
			.insert("connection", "")
			.insert("appName", "Picking App")
			.insert("device", "Pixel 7")
			.insert("osVersion", "14")
			.insert("screenSize", screen)
	}

	fn emitter(recorder: Arc<MemoryRecorder>) -> UserInfoEmitter {
		UserInfoEmitter::new(EmitterBase::new(recorder, DiagnosticSink::default(), GateMode::Gated))
	}

	#[test]
	fn test_flat_payload_with_collapsed_screen_size() {
		let recorder = Arc::new(MemoryRecorder::default());
		let payload = emitter(recorder)
			.build_payload(&params(json!({"screenWidth": 360.0, "screenHeight": 640})))
			.unwrap();

		let expected = EventParams::new()
			.insert("language", "en-US")
			.insert("device", "Pixel 7")
			.insert("osVersion", "14")
			.insert("screenSize", "360 x 640")
			.insert("userEmail", "a@b.com")
			.insert("userId", "u1")
			.insert("client", "t1")
			.insert("appVersion", "1.2.0")
			.insert("appName", "picking app");
		assert_eq!(payload, expected);
	}

	#[test]
	fn test_screen_size_with_zero_dimension_is_dropped() {
		let recorder = Arc::new(MemoryRecorder::default());
		let payload = emitter(recorder)
			.build_payload(&params(json!({"screenWidth": 0, "screenHeight": 640})))
			.unwrap();
		assert!(!payload.contains_key("screenSize"));
	}

	#[test]
	fn test_fractional_dimensions_are_kept() {
		assert_eq!(
			collapse_screen_size(&json!({"screenWidth": 392.5, "screenHeight": 803})),
			Some("392.5 x 803".to_string())
		);
		assert_eq!(collapse_screen_size(&json!("360 x 640")), None);
	}

	#[test]
	fn test_missing_app_name_is_rejected() {
		let recorder = Arc::new(MemoryRecorder::default());
		let mut params = params(Value::Null);
		params.set("appName", "");
		assert_eq!(
			emitter(recorder).build_payload(&params).unwrap_err(),
			EventError::missing_field("appName")
		);
	}

	#[tokio::test]
	async fn send_records_user_info() {
		let recorder = Arc::new(MemoryRecorder::default());
		let result = emitter(recorder.clone())
			.send(&resolution(true), &params(Value::Null))
			.await;

		assert_eq!(result, Some(true));
		assert!(matches!(
			recorder.calls().as_slice(),
			[Call::Event(name, _)] if name == "user_info"
		));
	}

	#[tokio::test]
	async fn incomplete_session_is_gated() {
		let recorder = Arc::new(MemoryRecorder::default());
		let result = emitter(recorder.clone())
			.send(&resolution(false), &params(Value::Null))
			.await;
		assert_eq!(result, None);
		assert!(recorder.calls().is_empty());
	}
}
